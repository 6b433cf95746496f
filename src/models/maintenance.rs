//! Modelo de solicitudes de mantenimiento

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::status::{HasStatusColor, StatusColor};

/// Tipo de mantenimiento solicitado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceKind {
    Preventive,
    Corrective,
    Tires,
    Electrical,
    Bodywork,
    Other,
}

impl MaintenanceKind {
    pub const ALL: [MaintenanceKind; 6] = [
        MaintenanceKind::Preventive,
        MaintenanceKind::Corrective,
        MaintenanceKind::Tires,
        MaintenanceKind::Electrical,
        MaintenanceKind::Bodywork,
        MaintenanceKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceKind::Preventive => "preventive",
            MaintenanceKind::Corrective => "corrective",
            MaintenanceKind::Tires => "tires",
            MaintenanceKind::Electrical => "electrical",
            MaintenanceKind::Bodywork => "bodywork",
            MaintenanceKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Done,
    Rejected,
}

/// Solicitud de mantenimiento registrada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub kind: MaintenanceKind,
    pub note: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl HasStatusColor for MaintenanceRequest {
    fn status_color(&self) -> StatusColor {
        match self.status {
            MaintenanceStatus::Pending | MaintenanceStatus::InProgress => StatusColor::Amber,
            MaintenanceStatus::Done => StatusColor::Green,
            MaintenanceStatus::Rejected => StatusColor::Red,
        }
    }
}

/// Campos de texto de una solicitud de mantenimiento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub kind: MaintenanceKind,

    #[validate(length(min = 1, max = 1000))]
    pub note: String,
}

/// Foto adjunta a una solicitud (parte multipart opcional)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Photo {
    /// Tipo MIME a partir de la extensión del archivo
    pub fn mime_for(file_name: &str) -> &'static str {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".png") {
            "image/png"
        } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
            "image/jpeg"
        } else if lower.ends_with(".heic") {
            "image/heic"
        } else {
            "application/octet-stream"
        }
    }
}
