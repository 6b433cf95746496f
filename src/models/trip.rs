//! Modelo de Trip
//!
//! Este módulo contiene el struct Trip, su ciclo de vida y los requests
//! que lo crean y lo cierran.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::fuel::FuelLevel;
use super::status::{HasStatusColor, StatusColor};
use crate::utils::errors::{AppError, AppResult};

/// Estado del viaje
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Open,
    Finished,
    Cancelled,
}

/// Eventos que cierran un viaje
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripEvent {
    Finish,
    Cancel,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Open => "open",
            TripStatus::Finished => "finished",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Solo un viaje abierto puede cerrarse; los cerrados son finales
    pub fn transition(self, event: TripEvent) -> AppResult<TripStatus> {
        match (self, event) {
            (TripStatus::Open, TripEvent::Finish) => Ok(TripStatus::Finished),
            (TripStatus::Open, TripEvent::Cancel) => Ok(TripStatus::Cancelled),
            (closed, _) => Err(AppError::Conflict(format!(
                "Trip is already {}",
                closed.as_str()
            ))),
        }
    }

    pub fn is_open(&self) -> bool {
        *self == TripStatus::Open
    }
}

/// Trip principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub driver_id: i64,
    pub vehicle_id: i64,
    pub origin: String,
    pub destination: String,
    pub odometer_start: u32,
    #[serde(default)]
    pub odometer_end: Option<u32>,
    #[serde(default)]
    pub distance_km: Option<u32>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub fuel_level: Option<FuelLevel>,
    pub status: TripStatus,
    #[serde(default)]
    pub departure_address: Option<String>,
    #[serde(default)]
    pub cancel_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl HasStatusColor for Trip {
    fn status_color(&self) -> StatusColor {
        match self.status {
            TripStatus::Open => StatusColor::Amber,
            TripStatus::Finished => StatusColor::Green,
            TripStatus::Cancelled => StatusColor::Red,
        }
    }
}

/// Request para crear un nuevo viaje
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateTripRequest {
    pub driver_id: i64,
    pub vehicle_id: i64,

    #[validate(length(min = 1, max = 255))]
    pub origin: String,

    #[validate(length(min = 1, max = 255))]
    pub destination: String,

    pub odometer_start: u32,

    #[validate(length(max = 500))]
    pub purpose: Option<String>,

    pub fuel_level: Option<FuelLevel>,
}

/// Request para guardar la dirección de salida geocodificada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripAddressUpdate {
    pub departure_address: String,
}

/// Cierre de un viaje enviado al endpoint de destino
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum TripDestination {
    Finish { odometer_end: u32, distance_km: u32 },
    Cancel { reason: String },
}
