//! Capacidades del dispositivo: permisos y posición

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::errors::{AppError, AppResult};

/// Respuesta del usuario a una petición de permiso
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Coordenadas GPS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validar rango de coordenadas
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::Validation(format!(
                "Invalid coordinates ({}, {})",
                latitude, longitude
            )));
        }
        Ok(Self { latitude, longitude })
    }
}

/// Fuente de la posición actual del conductor
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> AppResult<Coordinates>;
}

/// Posición fija conocida de antemano (shell y tests)
pub struct FixedLocation {
    permission: Permission,
    position: Coordinates,
}

impl FixedLocation {
    pub fn granted(position: Coordinates) -> Self {
        Self {
            permission: Permission::Granted,
            position,
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            position: Coordinates {
                latitude: 0.0,
                longitude: 0.0,
            },
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> AppResult<Coordinates> {
        match self.permission {
            Permission::Granted => Ok(self.position),
            Permission::Denied => Err(AppError::PermissionDenied(
                "Location permission denied".to_string(),
            )),
        }
    }
}
