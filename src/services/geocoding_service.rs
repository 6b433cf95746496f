//! Geocodificación inversa con Mapbox

use async_trait::async_trait;
use serde::Deserialize;

use super::device::Coordinates;
use crate::utils::errors::{AppError, AppResult};

/// Conversión de coordenadas a una dirección legible
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse_geocode(&self, position: Coordinates) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct MapboxGeocodingResponse {
    features: Vec<MapboxFeature>,
}

#[derive(Debug, Deserialize)]
struct MapboxFeature {
    properties: MapboxProperties,
}

#[derive(Debug, Deserialize)]
struct MapboxProperties {
    full_address: Option<String>,
    name: Option<String>,
    place_formatted: Option<String>,
}

impl MapboxGeocodingResponse {
    /// Dirección del resultado más relevante
    fn best_address(self) -> Option<String> {
        let properties = self.features.into_iter().next()?.properties;
        properties
            .full_address
            .or(properties.place_formatted)
            .or(properties.name)
    }
}

pub struct GeocodingService {
    mapbox_token: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeocodingService {
    pub fn new(mapbox_token: String) -> AppResult<Self> {
        Self::with_base_url(mapbox_token, "https://api.mapbox.com")
    }

    pub fn with_base_url(mapbox_token: String, base_url: &str) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            mapbox_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl ReverseGeocoder for GeocodingService {
    async fn reverse_geocode(&self, position: Coordinates) -> AppResult<String> {
        tracing::info!(
            "🗺️ Reverse geocoding ({}, {})",
            position.latitude,
            position.longitude
        );

        let url = format!(
            "{}/search/geocode/v6/reverse?longitude={}&latitude={}&access_token={}&limit=1",
            self.base_url,
            position.longitude,
            position.latitude,
            urlencoding::encode(&self.mapbox_token)
        );

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "FleetDriver/1.0")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("❌ Reverse geocoding failed with status {}: {}", status, error_text);
            return Err(AppError::Server {
                status: status.as_u16(),
                message: format!("Reverse geocoding failed: {}", status),
            });
        }

        let mapbox_response: MapboxGeocodingResponse = response.json().await?;
        match mapbox_response.best_address() {
            Some(address) => {
                tracing::info!("✅ Reverse geocoding successful: {}", address);
                Ok(address)
            }
            None => {
                tracing::warn!("⚠️ No address found for ({}, {})", position.latitude, position.longitude);
                Err(AppError::NotFound("No address found for this position".to_string()))
            }
        }
    }
}
