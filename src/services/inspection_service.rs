//! Envío de inspecciones
//!
//! Primero se crea la cabecera y después un item por neumático con el id
//! devuelto. Si falla un item, la cabecera ya existe en el backend y el
//! error se devuelve tal cual.

use std::sync::Arc;

use tracing::{error, info};

use super::vehicle_resolver::require_vehicle;
use crate::client::FleetGateway;
use crate::controllers::InspectionPayload;
use crate::models::{CreateInspectionItemRequest, CreateInspectionRequest, Inspection, Vehicle};
use crate::state::SessionStore;
use crate::utils::errors::AppResult;

pub struct InspectionService {
    gateway: Arc<dyn FleetGateway>,
    session: SessionStore,
}

impl InspectionService {
    pub fn new(gateway: Arc<dyn FleetGateway>, session: SessionStore) -> Self {
        Self { gateway, session }
    }

    pub async fn submit(&self, payload: &InspectionPayload, vehicle: Option<&Vehicle>) -> AppResult<Inspection> {
        let session = self.session.require().await?;
        let vehicle = require_vehicle(vehicle)?;

        let header = CreateInspectionRequest {
            vehicle_id: vehicle.id,
            driver_id: session.driver_id(),
            odometer: payload.odometer,
            oil_change_odometer: payload.oil_change_odometer,
            oil_change_date: payload.oil_change_date,
            fuel_level: payload.fuel_level,
            documents_valid: payload.documents_valid,
            has_fuel_card: payload.has_fuel_card,
            notes: payload.notes.clone(),
        };
        let inspection = self.gateway.create_inspection(&header).await?;

        for (position, condition) in payload.tires() {
            let item = CreateInspectionItemRequest {
                inspection_id: inspection.id,
                position,
                condition,
            };
            if let Err(e) = self.gateway.create_inspection_item(&item).await {
                error!("❌ Inspección {} incompleta: falló el item {:?}", inspection.id, position);
                return Err(e);
            }
        }

        info!("✅ Inspección {} registrada para {}", inspection.id, vehicle.plate);
        Ok(inspection)
    }
}
