//! Agregador del reporte de viajes
//!
//! Sólo lectura: une cada viaje completado con la solicitud que lo originó.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::report::{CompletedTripRow, TripReportRow};
use crate::models::VehicleRequest;

pub const NOT_AVAILABLE: &str = "N/A";
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Solicitudes indexadas para el join del reporte
struct RequestIndex<'a> {
    by_id: HashMap<Uuid, &'a VehicleRequest>,
    by_natural_key: HashMap<(Uuid, Uuid, String), &'a VehicleRequest>,
}

impl<'a> RequestIndex<'a> {
    fn new(requests: &'a [VehicleRequest]) -> Self {
        let mut by_natural_key = HashMap::new();
        for request in requests {
            // la primera coincidencia gana
            by_natural_key
                .entry((request.user_id, request.vehicle_id, request.destination.clone()))
                .or_insert(request);
        }
        Self {
            by_id: requests.iter().map(|r| (r.id, r)).collect(),
            by_natural_key,
        }
    }

    /// Por llave foránea; sin ella, por (usuario, vehículo, destino)
    fn origin_of(&self, trip: &CompletedTripRow) -> Option<&'a VehicleRequest> {
        match trip.request_id {
            Some(request_id) => self.by_id.get(&request_id).copied(),
            None => self
                .by_natural_key
                .get(&(trip.user_id, trip.vehicle_id, trip.destination.clone()))
                .copied(),
        }
    }
}

/// Construir las filas del reporte. Los viajes activos se ignoran.
pub fn build_trip_report(
    trips: &[CompletedTripRow],
    requests: &[VehicleRequest],
) -> Vec<TripReportRow> {
    let index = RequestIndex::new(requests);

    trips
        .iter()
        .filter_map(|trip| {
            let end_time = trip.end_time?;
            let origin = index.origin_of(trip);
            Some(TripReportRow {
                trip_id: trip.trip_id,
                departure: trip.start_time.format(REPORT_DATE_FORMAT).to_string(),
                return_time: end_time.format(REPORT_DATE_FORMAT).to_string(),
                custodian: trip.username.clone(),
                license_plate: trip.license_plate.clone(),
                make: trip.make.clone(),
                model: trip.model.clone(),
                start_odometer: trip.start_odometer,
                end_odometer: trip.end_odometer,
                km_traveled: trip.km_traveled,
                responsible: origin
                    .map(|r| r.responsible_name.clone())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                num_auditors: origin
                    .map(|r| r.num_auditors.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                auditors_names: origin
                    .map(|r| r.auditors_names.clone())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                destination: trip.destination.clone(),
                reason: trip.reason.clone(),
            })
        })
        .collect()
}
