//! Modelo de Inspection
//!
//! Una inspección se guarda como una cabecera (datos mecánicos y de
//! documentación) más un item por cada posición de neumático.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::fuel::FuelLevel;
use super::status::{HasStatusColor, StatusColor};

/// Estado del neumático
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TireCondition {
    Good,
    Fair,
    Poor,
}

impl TireCondition {
    pub const ALL: [TireCondition; 3] = [TireCondition::Good, TireCondition::Fair, TireCondition::Poor];

    pub fn as_str(&self) -> &'static str {
        match self {
            TireCondition::Good => "good",
            TireCondition::Fair => "fair",
            TireCondition::Poor => "poor",
        }
    }
}

/// Posición del neumático inspeccionado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TirePosition {
    Front,
    Rear,
    Spare,
}

/// Estado de revisión de la inspección en el backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionStatus {
    Pending,
    Approved,
    Rejected,
}

/// Inspection registrada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub odometer: u32,
    pub oil_change_odometer: u32,
    pub oil_change_date: NaiveDate,
    #[serde(default)]
    pub fuel_level: Option<FuelLevel>,
    pub documents_valid: bool,
    pub has_fuel_card: bool,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: InspectionStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl HasStatusColor for Inspection {
    fn status_color(&self) -> StatusColor {
        match self.status {
            InspectionStatus::Pending => StatusColor::Amber,
            InspectionStatus::Approved => StatusColor::Green,
            InspectionStatus::Rejected => StatusColor::Red,
        }
    }
}

/// Request para crear la cabecera de una inspección
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInspectionRequest {
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub odometer: u32,
    pub oil_change_odometer: u32,
    pub oil_change_date: NaiveDate,
    pub fuel_level: Option<FuelLevel>,
    pub documents_valid: bool,
    pub has_fuel_card: bool,
    pub notes: Option<String>,
}

/// Request para crear un item (neumático) de una inspección
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInspectionItemRequest {
    pub inspection_id: i64,
    pub position: TirePosition,
    pub condition: TireCondition,
}
