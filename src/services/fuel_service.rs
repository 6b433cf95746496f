//! Servicio de repostajes

use std::sync::Arc;

use tracing::info;

use super::vehicle_resolver::require_vehicle;
use crate::client::FleetGateway;
use crate::controllers::FuelUpForm;
use crate::models::{FuelUp, Vehicle};
use crate::state::SessionStore;
use crate::utils::errors::AppResult;

/// Registro de repostajes
pub struct FuelService {
    gateway: Arc<dyn FleetGateway>,
    session: SessionStore,
}

impl FuelService {
    pub fn new(gateway: Arc<dyn FleetGateway>, session: SessionStore) -> Self {
        Self { gateway, session }
    }

    pub async fn register(&self, form: &FuelUpForm, vehicle: Option<&Vehicle>) -> AppResult<FuelUp> {
        let session = self.session.require().await?;
        let vehicle = require_vehicle(vehicle)?;
        let request = form.validate(session.driver_id(), vehicle)?;

        let fuel_up = self.gateway.create_fuel_up(&request).await?;
        info!(
            "⛽ Repostaje {}: {} L de {} en {}",
            fuel_up.id,
            fuel_up.liters,
            fuel_up.fuel_type.as_str(),
            vehicle.plate
        );
        Ok(fuel_up)
    }
}
