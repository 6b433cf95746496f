//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de los campos
//! que el conductor escribe en los formularios.

use chrono::NaiveDate;
use validator::ValidationError;

/// Litros a partir de los cuales un repostaje se considera un error de tecleo
pub const MAX_FUEL_LITERS: f64 = 80.0;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir una lectura de odómetro (km enteros)
pub fn validate_odometer(value: &str) -> Result<u32, ValidationError> {
    value.trim().parse::<u32>().map_err(|_| {
        let mut error = ValidationError::new("odometer");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir una cantidad de litros
pub fn validate_liters(value: &str) -> Result<f64, ValidationError> {
    let parsed = value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|liters| liters.is_finite() && *liters > 0.0);

    parsed.ok_or_else(|| {
        let mut error = ValidationError::new("liters");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar el tope de litros de un repostaje
pub fn validate_fuel_ceiling(liters: f64) -> Result<(), ValidationError> {
    if liters >= MAX_FUEL_LITERS {
        let mut error = ValidationError::new("fuel_ceiling");
        error.add_param("max".into(), &MAX_FUEL_LITERS);
        error.add_param("actual".into(), &liters);
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha (admite YYYY-MM-DD y DD/MM/YYYY)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|_| {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}
