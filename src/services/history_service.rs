//! Listas de solo lectura: historial e inspecciones
//!
//! Cada carga vuelve a pedir los datos; no hay caché entre cargas. El
//! orden del servidor se invierte siempre para mostrar lo más reciente
//! primero.

use std::sync::Arc;

use tracing::debug;

use crate::client::FleetGateway;
use crate::models::{HistoryEntry, Inspection};
use crate::state::SessionStore;
use crate::utils::errors::AppResult;

/// Invertir el orden del servidor
pub fn newest_first<T>(mut items: Vec<T>) -> Vec<T> {
    items.reverse();
    items
}

pub struct HistoryService {
    gateway: Arc<dyn FleetGateway>,
    session: SessionStore,
}

impl HistoryService {
    pub fn new(gateway: Arc<dyn FleetGateway>, session: SessionStore) -> Self {
        Self { gateway, session }
    }

    pub async fn load_history(&self) -> AppResult<Vec<HistoryEntry>> {
        let session = self.session.require().await?;
        let entries = self.gateway.list_history(session.driver_id()).await?;
        debug!("📜 {} entradas de historial", entries.len());
        Ok(newest_first(entries))
    }

    pub async fn load_inspections(&self) -> AppResult<Vec<Inspection>> {
        let session = self.session.require().await?;
        let inspections = self.gateway.list_inspections(session.driver_id()).await?;
        debug!("📋 {} inspecciones", inspections.len());
        Ok(newest_first(inspections))
    }
}
