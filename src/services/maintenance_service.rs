//! Solicitudes de mantenimiento con foto opcional

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use super::vehicle_resolver::require_vehicle;
use crate::client::FleetGateway;
use crate::controllers::MaintenanceForm;
use crate::models::{MaintenanceRequest, Photo, Vehicle};
use crate::state::SessionStore;
use crate::utils::errors::{validation_error, AppResult};

/// Leer una foto del disco para adjuntarla a una solicitud
pub async fn load_photo(path: &Path) -> AppResult<Photo> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| validation_error("The photo path has no file name"))?
        .to_string();

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        error!("❌ No se pudo leer la foto {}: {}", path.display(), e);
        validation_error(&format!("Could not read the photo: {}", e))
    })?;

    Ok(Photo {
        mime_type: Photo::mime_for(&file_name).to_string(),
        file_name,
        bytes,
    })
}

/// Solicitudes de mantenimiento con foto opcional
pub struct MaintenanceService {
    gateway: Arc<dyn FleetGateway>,
    session: SessionStore,
}

impl MaintenanceService {
    pub fn new(gateway: Arc<dyn FleetGateway>, session: SessionStore) -> Self {
        Self { gateway, session }
    }

    pub async fn submit(
        &self,
        form: &MaintenanceForm,
        vehicle: Option<&Vehicle>,
    ) -> AppResult<MaintenanceRequest> {
        let session = self.session.require().await?;
        let vehicle = require_vehicle(vehicle)?;
        let (request, photo) = form.validate(session.driver_id(), vehicle)?;

        let with_photo = photo.is_some();
        let created = self.gateway.create_maintenance_request(&request, photo).await?;
        info!(
            "🔧 Solicitud {} ({}) para {}{}",
            created.id,
            created.kind.as_str(),
            vehicle.plate,
            if with_photo { " con foto" } else { "" }
        );
        Ok(created)
    }
}
