//! Controlador de formularios de viaje
//!
//! Validación previa a cualquier petición: alta de viaje, cierre con
//! odómetro de llegada y cancelación con motivo.

use validator::Validate;

use crate::models::{CreateTripRequest, FuelLevel, Trip, TripDestination, TripEvent, Vehicle};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{validate_not_empty, validate_odometer};

/// Formulario de nuevo viaje
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTripForm {
    pub odometer_start: String,
    pub origin: String,
    pub destination: String,
    pub purpose: String,
    pub fuel_level: Option<FuelLevel>,
}

impl NewTripForm {
    /// Validar y construir el request de alta
    pub fn validate(&self, driver_id: i64, vehicle: &Vehicle) -> AppResult<CreateTripRequest> {
        let missing: Vec<&str> = [
            ("departure odometer", &self.odometer_start),
            ("origin", &self.origin),
            ("destination", &self.destination),
        ]
        .into_iter()
        .filter(|(_, value)| validate_not_empty(value).is_err())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(validation_error(&format!(
                "Fill in the required fields: {}",
                missing.join(", ")
            )));
        }

        let odometer_start = validate_odometer(&self.odometer_start)
            .map_err(|_| validation_error("Departure odometer must be a whole number of km"))?;

        let purpose = self.purpose.trim();
        let request = CreateTripRequest {
            driver_id,
            vehicle_id: vehicle.id,
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            odometer_start,
            purpose: (!purpose.is_empty()).then(|| purpose.to_string()),
            fuel_level: self.fuel_level,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Distancia recorrida; `None` si la llegada es menor que la salida
pub fn compute_distance(departure: u32, arrival: u32) -> Option<u32> {
    arrival.checked_sub(departure)
}

/// Validar el cierre de un viaje con el odómetro de llegada
pub fn finish_trip(trip: &Trip, arrival: &str) -> AppResult<TripDestination> {
    trip.status.transition(TripEvent::Finish)?;

    if validate_not_empty(arrival).is_err() {
        return Err(validation_error("Enter the arrival odometer"));
    }

    let odometer_end = validate_odometer(arrival)
        .map_err(|_| validation_error("Arrival odometer must be a whole number of km"))?;

    let distance_km = compute_distance(trip.odometer_start, odometer_end).ok_or_else(|| {
        validation_error(&format!(
            "Arrival odometer ({}) cannot be lower than departure odometer ({})",
            odometer_end, trip.odometer_start
        ))
    })?;

    Ok(TripDestination::Finish {
        odometer_end,
        distance_km,
    })
}

/// Validar la cancelación de un viaje
pub fn cancel_trip(trip: &Trip, reason: &str) -> AppResult<TripDestination> {
    trip.status.transition(TripEvent::Cancel)?;

    if validate_not_empty(reason).is_err() {
        return Err(validation_error("Enter the reason for cancelling the trip"));
    }

    Ok(TripDestination::Cancel {
        reason: reason.trim().to_string(),
    })
}
