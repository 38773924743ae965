//! Pruebas contra PostgreSQL.
//!
//! Requieren `DATABASE_URL`; ejecutar con `cargo test -- --ignored`.

use sqlx::PgPool;

use fleet_tracker::controllers::incident_controller::IncidentController;
use fleet_tracker::controllers::report_controller::ReportController;
use fleet_tracker::controllers::request_controller::RequestController;
use fleet_tracker::controllers::trip_controller::TripController;
use fleet_tracker::controllers::vehicle_controller::VehicleController;
use fleet_tracker::dto::incident_dto::ReportIncidentRequest;
use fleet_tracker::dto::request_dto::CreateVehicleRequestBody;
use fleet_tracker::dto::trip_dto::CompleteTripRequest;
use fleet_tracker::dto::vehicle_dto::CreateVehicleRequest;
use fleet_tracker::models::{IdentityContext, RequestStatus, UserRole, Vehicle, VehicleStatus};
use fleet_tracker::repositories::{
    RequestRepository, TripRepository, UserRepository, VehicleLogRepository, VehicleRepository,
};
use fleet_tracker::utils::errors::AppError;

async fn user(pool: &PgPool, username: &str, role: UserRole) -> IdentityContext {
    let users = UserRepository::new(pool.clone());
    users.insert_if_absent(username, "hash", role).await.unwrap();
    let user = users.find_by_username(username).await.unwrap().unwrap();
    IdentityContext::from(&user)
}

async fn add_vehicle(pool: &PgPool, admin: &IdentityContext, plate: &str) -> Vehicle {
    VehicleController::new(pool.clone())
        .create(
            admin,
            CreateVehicleRequest {
                license_plate: plate.to_string(),
                make: "Nissan".to_string(),
                model: "NP300".to_string(),
                current_odometer: 1000,
            },
        )
        .await
        .unwrap()
}

fn request_body(vehicle: &Vehicle) -> CreateVehicleRequestBody {
    CreateVehicleRequestBody {
        vehicle_id: vehicle.id,
        destination: "Oaxaca".to_string(),
        reason: "Auditoría".to_string(),
        responsible_name: "Lic. Pérez".to_string(),
        num_auditors: 2,
        auditors_names: "Ana, Luis".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_trip_cycle_persists_every_mutation(pool: PgPool) {
    let admin = user(&pool, "admin", UserRole::Admin).await;
    let worker = user(&pool, "auditor1", UserRole::Worker).await;
    let vehicle = add_vehicle(&pool, &admin, "abc-123").await;
    assert_eq!(vehicle.license_plate, "ABC-123");

    let requests = RequestController::new(pool.clone());
    let request = requests.create(&worker, request_body(&vehicle)).await.unwrap();
    let trip = requests.approve(&admin, request.id).await.unwrap();
    assert_eq!(trip.request_id, Some(request.id));
    assert_eq!(trip.start_odometer, 1000);

    let stored = VehicleRepository::new(pool.clone()).find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored.status, VehicleStatus::InUse);

    let completed = TripController::new(pool.clone())
        .complete(&admin, trip.id, CompleteTripRequest { end_odometer: 1150 })
        .await
        .unwrap();
    assert_eq!(completed.km_traveled, Some(150));

    let stored = VehicleRepository::new(pool.clone()).find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored.status, VehicleStatus::Available);
    assert_eq!(stored.current_odometer, 1150);

    let events: Vec<String> = VehicleLogRepository::new(pool.clone())
        .find_by_vehicle(vehicle.id)
        .await
        .unwrap()
        .into_iter()
        .map(|log| log.event)
        .collect();
    assert_eq!(events, vec!["Disponible", "En uso", "Creado"]);

    let report = ReportController::new(pool.clone()).trip_report(&admin).await.unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].responsible, "Lic. Pérez");
    assert_eq!(report[0].km_traveled, Some(150));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_failed_completion_rolls_back(pool: PgPool) {
    let admin = user(&pool, "admin", UserRole::Admin).await;
    let worker = user(&pool, "auditor1", UserRole::Worker).await;
    let vehicle = add_vehicle(&pool, &admin, "XYZ-987").await;

    let requests = RequestController::new(pool.clone());
    let request = requests.create(&worker, request_body(&vehicle)).await.unwrap();
    let trip = requests.approve(&admin, request.id).await.unwrap();

    let err = TripController::new(pool.clone())
        .complete(&admin, trip.id, CompleteTripRequest { end_odometer: 900 })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidOdometer { start: 1000, end: 900 }));

    let stored_trip = TripRepository::new(pool.clone()).find_by_id(trip.id).await.unwrap().unwrap();
    assert!(stored_trip.is_active());
    let stored = VehicleRepository::new(pool.clone()).find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored.status, VehicleStatus::InUse);
    assert_eq!(stored.current_odometer, 1000);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_concurrent_approvals_produce_one_trip(pool: PgPool) {
    let admin = user(&pool, "admin", UserRole::Admin).await;
    let worker = user(&pool, "auditor1", UserRole::Worker).await;
    let vehicle = add_vehicle(&pool, &admin, "CON-001").await;

    let request = RequestController::new(pool.clone())
        .create(&worker, request_body(&vehicle))
        .await
        .unwrap();

    let first = RequestController::new(pool.clone());
    let second = RequestController::new(pool.clone());
    let (a, b) = tokio::join!(first.approve(&admin, request.id), second.approve(&admin, request.id));

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(AppError::AlreadyProcessed(_)))));

    let trips = TripRepository::new(pool.clone()).find_by_vehicle(vehicle.id).await.unwrap();
    assert_eq!(trips.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_reject_then_approve_is_refused(pool: PgPool) {
    let admin = user(&pool, "admin", UserRole::Admin).await;
    let worker = user(&pool, "auditor1", UserRole::Worker).await;
    let vehicle = add_vehicle(&pool, &admin, "REJ-002").await;

    let requests = RequestController::new(pool.clone());
    let request = requests.create(&worker, request_body(&vehicle)).await.unwrap();
    let rejected = requests.reject(&admin, request.id).await.unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);

    assert!(matches!(
        requests.approve(&admin, request.id).await,
        Err(AppError::AlreadyProcessed(_))
    ));
    let mine = RequestRepository::new(pool.clone()).find_by_user(worker.user_id).await.unwrap();
    assert_eq!(mine[0].status, RequestStatus::Rejected);
    assert!(TripRepository::new(pool.clone()).find_by_vehicle(vehicle.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_plate_is_rejected(pool: PgPool) {
    let admin = user(&pool, "admin", UserRole::Admin).await;
    add_vehicle(&pool, &admin, "DUP-100").await;

    let err = VehicleController::new(pool.clone())
        .create(
            &admin,
            CreateVehicleRequest {
                license_plate: "dup-100".to_string(),
                make: "Ford".to_string(),
                model: "Ranger".to_string(),
                current_odometer: 0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicatePlate(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_incident_round_trip(pool: PgPool) {
    let admin = user(&pool, "admin", UserRole::Admin).await;
    let worker = user(&pool, "auditor1", UserRole::Worker).await;
    let vehicle = add_vehicle(&pool, &admin, "INC-555").await;
    let incidents = IncidentController::new(pool.clone());

    let report = || ReportIncidentRequest {
        incident_type: "Choque".to_string(),
        description: "Golpe en defensa".to_string(),
        location: Some("Km 42".to_string()),
    };
    let first = incidents.report(&worker, vehicle.id, report()).await.unwrap();
    incidents.report(&worker, vehicle.id, report()).await.unwrap();

    let logs = VehicleLogRepository::new(pool.clone()).find_by_vehicle(vehicle.id).await.unwrap();
    assert_eq!(logs.iter().filter(|l| l.event == "Incidente reportado").count(), 1);

    incidents.resolve(&admin, first.id).await.unwrap();
    let stored = VehicleRepository::new(pool.clone()).find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored.status, VehicleStatus::Available);

    assert!(matches!(
        incidents.resolve(&admin, first.id).await,
        Err(AppError::AlreadyProcessed(_))
    ));
}
