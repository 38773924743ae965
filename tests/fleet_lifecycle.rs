use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use fleet_tracker::dto::trip_dto::CompleteTripRequest;
use fleet_tracker::models::{IdentityContext, RequestStatus, UserRole, Vehicle, VehicleStatus};
use fleet_tracker::services::incident_workflow::{self, NewIncident};
use fleet_tracker::services::request_workflow::{self, NewVehicleRequest};
use fleet_tracker::services::trip_lifecycle;
use fleet_tracker::services::vehicle_registry::{self, NewVehicle};
use fleet_tracker::utils::errors::AppError;

fn worker() -> IdentityContext {
    IdentityContext::new(Uuid::new_v4(), "auditor1", UserRole::Worker)
}

fn registered_vehicle() -> Vehicle {
    let input = NewVehicle {
        license_plate: "ABC-123".to_string(),
        make: "Nissan".to_string(),
        model: "NP300".to_string(),
        current_odometer: 1000,
    };
    vehicle_registry::register(input, false, Utc::now())
        .unwrap()
        .vehicle
}

fn request_input(vehicle: &Vehicle) -> NewVehicleRequest {
    NewVehicleRequest {
        vehicle_id: vehicle.id,
        destination: "Oaxaca".to_string(),
        reason: "Auditoría anual".to_string(),
        responsible_name: "Lic. Pérez".to_string(),
        num_auditors: 2,
        auditors_names: "Ana, Luis".to_string(),
    }
}

fn incident() -> NewIncident {
    NewIncident {
        incident_type: "Ponchadura".to_string(),
        description: "Llanta delantera".to_string(),
        location: None,
    }
}

#[test]
fn test_full_trip_cycle() {
    let worker = worker();
    let vehicle = registered_vehicle();
    assert_eq!(vehicle.status, VehicleStatus::Available);

    let request = request_workflow::create(&worker, &vehicle, request_input(&vehicle), Utc::now()).unwrap();
    let approval = request_workflow::approve(&request, &vehicle, &worker.username, Utc::now()).unwrap();
    assert_eq!(approval.trip.start_odometer, 1000);
    assert_eq!(approval.vehicle_change.vehicle.status, VehicleStatus::InUse);

    let in_use = approval.vehicle_change.vehicle;
    let completion =
        trip_lifecycle::complete(&approval.trip, &in_use, &worker.username, 1150, Utc::now()).unwrap();

    assert_eq!(completion.trip.km_traveled, Some(150));
    assert_eq!(completion.trip.end_odometer, Some(1150));
    assert!(!completion.trip.is_active());
    assert_eq!(completion.vehicle_change.vehicle.status, VehicleStatus::Available);
    assert_eq!(completion.vehicle_change.vehicle.current_odometer, 1150);
}

#[test]
fn test_lower_end_odometer_leaves_trip_active() {
    let worker = worker();
    let vehicle = registered_vehicle();
    let request = request_workflow::create(&worker, &vehicle, request_input(&vehicle), Utc::now()).unwrap();
    let approval = request_workflow::approve(&request, &vehicle, &worker.username, Utc::now()).unwrap();
    let in_use = approval.vehicle_change.vehicle;

    let err = trip_lifecycle::complete(&approval.trip, &in_use, &worker.username, 900, Utc::now())
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidOdometer { start: 1000, end: 900 }));
    assert!(approval.trip.is_active());
    assert_eq!(in_use.status, VehicleStatus::InUse);
    assert_eq!(in_use.current_odometer, 1000);
}

#[test]
fn test_negative_end_odometer_is_invalid_odometer() {
    let worker = worker();
    let vehicle = registered_vehicle();
    let request = request_workflow::create(&worker, &vehicle, request_input(&vehicle), Utc::now()).unwrap();
    let approval = request_workflow::approve(&request, &vehicle, &worker.username, Utc::now()).unwrap();

    let body = CompleteTripRequest { end_odometer: -5 };
    assert!(body.validate().is_ok());

    let err = trip_lifecycle::complete(
        &approval.trip,
        &approval.vehicle_change.vehicle,
        &worker.username,
        body.end_odometer,
        Utc::now(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidOdometer { start: 1000, end: -5 }));
    assert!(approval.trip.is_active());
}

#[test]
fn test_completed_trip_cannot_complete_again() {
    let worker = worker();
    let vehicle = registered_vehicle();
    let request = request_workflow::create(&worker, &vehicle, request_input(&vehicle), Utc::now()).unwrap();
    let approval = request_workflow::approve(&request, &vehicle, &worker.username, Utc::now()).unwrap();
    let completion = trip_lifecycle::complete(
        &approval.trip,
        &approval.vehicle_change.vehicle,
        &worker.username,
        1150,
        Utc::now(),
    )
    .unwrap();

    let err = trip_lifecycle::complete(
        &completion.trip,
        &completion.vehicle_change.vehicle,
        &worker.username,
        1200,
        Utc::now(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::AlreadyProcessed(_)));
}

#[test]
fn test_request_is_processed_at_most_once() {
    let worker = worker();
    let vehicle = registered_vehicle();
    let request = request_workflow::create(&worker, &vehicle, request_input(&vehicle), Utc::now()).unwrap();

    let approval = request_workflow::approve(&request, &vehicle, &worker.username, Utc::now()).unwrap();
    assert_eq!(approval.request.status, RequestStatus::Approved);

    assert!(matches!(
        request_workflow::approve(&approval.request, &vehicle, &worker.username, Utc::now()),
        Err(AppError::AlreadyProcessed(_))
    ));
    assert!(matches!(
        request_workflow::reject(&approval.request),
        Err(AppError::AlreadyProcessed(_))
    ));
}

#[test]
fn test_reject_touches_nothing_else() {
    let worker = worker();
    let vehicle = registered_vehicle();
    let request = request_workflow::create(&worker, &vehicle, request_input(&vehicle), Utc::now()).unwrap();

    let rejected = request_workflow::reject(&request).unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(rejected.id, request.id);
    assert_eq!(vehicle.status, VehicleStatus::Available);
}

#[test]
fn test_vehicle_in_use_cannot_be_requested() {
    let worker = worker();
    let vehicle = registered_vehicle();
    let request = request_workflow::create(&worker, &vehicle, request_input(&vehicle), Utc::now()).unwrap();
    let in_use = request_workflow::approve(&request, &vehicle, &worker.username, Utc::now())
        .unwrap()
        .vehicle_change
        .vehicle;

    let err = request_workflow::create(&worker, &in_use, request_input(&in_use), Utc::now()).unwrap_err();
    assert!(matches!(err, AppError::VehicleUnavailable(_)));
}

#[test]
fn test_incident_reported_twice_logs_once() {
    let worker = worker();
    let vehicle = registered_vehicle();

    let first = incident_workflow::report(&vehicle, &worker, incident(), Utc::now());
    let damaged = first.vehicle_change.expect("primer reporte cambia el estado").vehicle;
    assert_eq!(damaged.status, VehicleStatus::Incident);

    let second = incident_workflow::report(&damaged, &worker, incident(), Utc::now());
    assert!(second.vehicle_change.is_none());
    assert_ne!(first.incident.id, second.incident.id);

    let resolution = incident_workflow::resolve(&first.incident, &damaged, Utc::now()).unwrap();
    let restored = resolution.vehicle_change.expect("vehículo vuelve a disponible");
    assert_eq!(restored.vehicle.status, VehicleStatus::Available);
    assert_eq!(restored.log.event, "Incidente Resuelto");

    // el segundo reporte ya no encuentra el vehículo en incidente
    let late = incident_workflow::resolve(&second.incident, &restored.vehicle, Utc::now()).unwrap();
    assert!(late.vehicle_change.is_none());
}

#[test]
fn test_maintenance_blocks_approval() {
    let worker = worker();
    let vehicle = registered_vehicle();
    let request = request_workflow::create(&worker, &vehicle, request_input(&vehicle), Utc::now()).unwrap();

    let maintenance = vehicle_registry::mark_maintenance(&vehicle, Utc::now()).unwrap();
    let err = request_workflow::approve(&request, &maintenance.vehicle, &worker.username, Utc::now())
        .unwrap_err();
    assert!(matches!(err, AppError::VehicleUnavailable(_)));

    let released = vehicle_registry::release_maintenance(&maintenance.vehicle, Utc::now()).unwrap();
    assert!(request_workflow::approve(&request, &released.vehicle, &worker.username, Utc::now()).is_ok());
}
