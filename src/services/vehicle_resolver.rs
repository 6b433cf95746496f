//! Resolución del vehículo actual
//!
//! Convierte una matrícula tecleada, un código QR escaneado o una entrada
//! de la lista de recientes en el vehículo con el que trabaja la pantalla.

use std::sync::Arc;

use tracing::{debug, info};

use super::device::Permission;
use super::qr_service;
use crate::client::FleetGateway;
use crate::models::Vehicle;
use crate::state::SessionStore;
use crate::utils::errors::{internal_error, not_found_error, validation_error, AppError, AppResult};

/// Estado del escáner de códigos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    Active,
    Paused,
    Unavailable,
}

pub struct VehicleResolver {
    gateway: Arc<dyn FleetGateway>,
    session: SessionStore,
    manual_entry: String,
    scanner: ScannerState,
    camera_permission: Option<Permission>,
    recent: Option<Vec<Vehicle>>,
    current: Option<Vehicle>,
}

impl VehicleResolver {
    pub fn new(gateway: Arc<dyn FleetGateway>, session: SessionStore) -> Self {
        Self {
            gateway,
            session,
            manual_entry: String::new(),
            scanner: ScannerState::Active,
            camera_permission: None,
            recent: None,
            current: None,
        }
    }

    pub fn set_manual_entry(&mut self, text: &str) {
        self.manual_entry = text.to_string();
    }

    pub fn manual_entry(&self) -> &str {
        &self.manual_entry
    }

    pub fn scanner(&self) -> ScannerState {
        self.scanner
    }

    /// `None` mientras no se haya preguntado por la cámara
    pub fn camera_permission(&self) -> Option<Permission> {
        self.camera_permission
    }

    pub fn current(&self) -> Option<&Vehicle> {
        self.current.as_ref()
    }

    pub fn recent(&self) -> Option<&[Vehicle]> {
        self.recent.as_deref()
    }

    /// Resultado del permiso de cámara; la denegación es definitiva
    pub fn set_camera_permission(&mut self, permission: Permission) {
        if self.camera_permission != Some(Permission::Denied) {
            self.camera_permission = Some(permission);
        }
        self.scanner = match (permission, self.scanner) {
            (Permission::Denied, _) => ScannerState::Unavailable,
            (Permission::Granted, ScannerState::Unavailable) => ScannerState::Unavailable,
            (Permission::Granted, state) => state,
        };
    }

    fn resolve(&mut self, vehicle: Vehicle) -> Vehicle {
        info!("🚗 Vehículo seleccionado: {}", vehicle.label());
        self.manual_entry.clear();
        self.current = Some(vehicle.clone());
        vehicle
    }

    /// Buscar por la matrícula tecleada (coincidencia exacta)
    pub async fn lookup_plate(&mut self) -> AppResult<Vehicle> {
        let plate = self.manual_entry.trim().to_string();
        if plate.is_empty() {
            return Err(validation_error("Enter a license plate"));
        }

        self.session.require().await?;
        let candidates = self.gateway.vehicles_by_plate(&plate).await?;
        debug!("🔍 {} candidatos para {}", candidates.len(), plate);

        match candidates.into_iter().find(|v| v.matches_plate(&plate)) {
            Some(vehicle) => Ok(self.resolve(vehicle)),
            None => Err(not_found_error("Vehicle", &plate)),
        }
    }

    /// Interpretar un código leído por el escáner.
    ///
    /// Si el código no es válido el escáner vuelve a quedar activo.
    pub fn scan(&mut self, payload: &str) -> AppResult<Vehicle> {
        if self.scanner == ScannerState::Unavailable {
            return Err(AppError::PermissionDenied("Camera permission denied".to_string()));
        }

        self.scanner = ScannerState::Paused;
        match qr_service::decode_payload(payload) {
            Ok(vehicle) => Ok(self.resolve(vehicle)),
            Err(e) => {
                self.scanner = ScannerState::Active;
                Err(e)
            }
        }
    }

    /// Reactivar el escáner para leer otro código
    pub fn resume_scanner(&mut self) {
        if self.scanner == ScannerState::Paused {
            self.scanner = ScannerState::Active;
        }
    }

    /// Cargar la lista de recientes en el orden del backend
    pub async fn load_recent(&mut self) -> AppResult<&[Vehicle]> {
        let session = self.session.require().await?;
        let vehicles = self.gateway.recent_vehicles(session.driver_id()).await?;
        Ok(self.recent.insert(vehicles).as_slice())
    }

    /// Elegir un vehículo de la lista ya cargada
    pub fn select_recent(&mut self, index: usize) -> AppResult<Vehicle> {
        let recent = self
            .recent
            .as_ref()
            .ok_or_else(|| internal_error("Recent vehicles have not been loaded"))?;
        let vehicle = recent
            .get(index)
            .cloned()
            .ok_or_else(|| validation_error("Select a vehicle from the list"))?;
        Ok(self.resolve(vehicle))
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }
}

/// Vehículo requerido por un formulario
pub fn require_vehicle(vehicle: Option<&Vehicle>) -> AppResult<&Vehicle> {
    vehicle.ok_or_else(|| validation_error("Select a vehicle first"))
}
