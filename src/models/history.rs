//! Entradas del historial del conductor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{HasStatusColor, StatusColor};

/// Tipo de registro que aparece en el historial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Trip,
    FuelUp,
    Inspection,
    Maintenance,
}

/// Entrada del historial tal como la devuelve el backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub kind: HistoryKind,
    pub description: String,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl HasStatusColor for HistoryEntry {
    fn status_color(&self) -> StatusColor {
        StatusColor::for_label(&self.status)
    }
}
