//! Ida y vuelta de vehículos por código QR
//!
//! El contenido del código es un objeto JSON con los cuatro campos del
//! vehículo, de modo que cualquier lector de JSON puede interpretarlo.

use qrcode::render::{svg, unicode};
use qrcode::QrCode;
use tracing::warn;

use crate::models::Vehicle;
use crate::utils::errors::{AppError, AppResult};

/// Serializar un vehículo al texto que va dentro del código
pub fn encode_payload(vehicle: &Vehicle) -> AppResult<String> {
    serde_json::to_string(vehicle).map_err(|e| AppError::Internal(e.to_string()))
}

/// Interpretar el texto leído por el escáner
pub fn decode_payload(text: &str) -> AppResult<Vehicle> {
    let value: serde_json::Value = serde_json::from_str(text.trim()).map_err(|e| {
        warn!("⚠️ Código QR ilegible: {}", e);
        AppError::CorruptCode(format!("Not valid JSON: {}", e))
    })?;

    if !value.is_object() {
        return Err(AppError::CorruptCode("Payload is not a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| {
        warn!("⚠️ Código QR sin los campos de vehículo: {}", e);
        AppError::CorruptCode(format!("Not a vehicle: {}", e))
    })
}

fn build_code(vehicle: &Vehicle) -> AppResult<QrCode> {
    let payload = encode_payload(vehicle)?;
    QrCode::new(payload.as_bytes()).map_err(|e| AppError::Internal(format!("QR encoding failed: {}", e)))
}

/// Código QR dibujado con caracteres de bloque para la terminal
pub fn render_terminal(vehicle: &Vehicle) -> AppResult<String> {
    let code = build_code(vehicle)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

/// Código QR como documento SVG
pub fn render_svg(vehicle: &Vehicle) -> AppResult<String> {
    let code = build_code(vehicle)?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(240, 240)
        .build())
}
