//! Controlador del formulario de repostaje

use crate::models::{CreateFuelUpRequest, FuelType, Vehicle};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{
    validate_fuel_ceiling, validate_liters, validate_not_empty, validate_odometer, MAX_FUEL_LITERS,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuelUpForm {
    pub liters: String,
    pub fuel_type: Option<FuelType>,
    pub odometer: String,
}

impl FuelUpForm {
    /// Validar y construir el request.
    ///
    /// El tope de litros se comprueba antes que el resto de campos.
    pub fn validate(&self, driver_id: i64, vehicle: &Vehicle) -> AppResult<CreateFuelUpRequest> {
        let liters = validate_liters(&self.liters);
        if let Ok(value) = liters {
            validate_fuel_ceiling(value).map_err(|_| {
                validation_error(&format!(
                    "{} liters looks wrong: a fuel-up must be below {} liters",
                    value, MAX_FUEL_LITERS
                ))
            })?;
        }

        let liters = liters.map_err(|_| validation_error("Enter the liters as a positive number"))?;

        let fuel_type = self
            .fuel_type
            .ok_or_else(|| validation_error("Select the fuel type"))?;

        if validate_not_empty(&self.odometer).is_err() {
            return Err(validation_error("Enter the odometer"));
        }
        let odometer = validate_odometer(&self.odometer)
            .map_err(|_| validation_error("Odometer must be a whole number of km"))?;

        Ok(CreateFuelUpRequest {
            vehicle_id: vehicle.id,
            driver_id,
            liters,
            fuel_type,
            odometer,
        })
    }
}
