mod shell;

use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{info, warn};

use fleet_driver::client::{ApiClient, FleetGateway};
use fleet_driver::config::environment::EnvironmentConfig;
use fleet_driver::services::{GeocodingService, TripService};
use fleet_driver::state::{FileSessionStorage, SessionStore};

use shell::{PromptLocation, Shell};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .with_writer(std::io::stderr)
        .init();

    info!("🚚 Fleet Driver - entorno {}", config.environment);
    info!("🌐 API: {}", config.api_base_url);
    if config.is_development() {
        info!("💾 Sesión guardada en {}", config.session_file.display());
    }

    let session = SessionStore::new(Arc::new(FileSessionStorage::new(config.session_file.clone())));
    let gateway: Arc<dyn FleetGateway> = Arc::new(ApiClient::new(&config, session.clone())?);

    let trips = match &config.mapbox_token {
        Some(token) => {
            info!("🗺️ Geocodificación inversa activada");
            TripService::new(gateway.clone(), session.clone()).with_geocoding(
                Arc::new(GeocodingService::new(token.clone())?),
                Arc::new(PromptLocation),
            )
        }
        None => {
            warn!("⚠️ MAPBOX_TOKEN no configurado: los viajes no tendrán dirección de salida");
            TripService::new(gateway.clone(), session.clone())
        }
    };

    Shell::new(gateway, session, trips).run().await
}
