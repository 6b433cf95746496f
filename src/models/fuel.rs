//! Modelo de repostajes
//!
//! Contiene el nivel de depósito (compartido con viajes e inspecciones),
//! el tipo de combustible y el registro de repostaje.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Nivel del depósito marcado por el conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelLevel {
    Empty,
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl FuelLevel {
    pub const ALL: [FuelLevel; 5] = [
        FuelLevel::Empty,
        FuelLevel::Quarter,
        FuelLevel::Half,
        FuelLevel::ThreeQuarters,
        FuelLevel::Full,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelLevel::Empty => "empty",
            FuelLevel::Quarter => "quarter",
            FuelLevel::Half => "half",
            FuelLevel::ThreeQuarters => "three_quarters",
            FuelLevel::Full => "full",
        }
    }
}

/// Tipo de combustible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gasoline,
    Ethanol,
    Diesel,
    Cng,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [FuelType::Gasoline, FuelType::Ethanol, FuelType::Diesel, FuelType::Cng];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Ethanol => "ethanol",
            FuelType::Diesel => "diesel",
            FuelType::Cng => "cng",
        }
    }
}

/// Repostaje registrado en el backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelUp {
    pub id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub liters: f64,
    pub fuel_type: FuelType,
    pub odometer: u32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Request para crear un repostaje
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFuelUpRequest {
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub liters: f64,
    pub fuel_type: FuelType,
    pub odometer: u32,
}
