//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del cliente: URL del backend,
//! timeouts, archivo de sesión y credenciales de geocoding.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::errors::{AppError, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub session_file: PathBuf,
    pub mapbox_token: Option<String>,
    pub log_level: String,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> AppResult<Self> {
        let api_base_url = env::var("API_BASE_URL")
            .map_err(|_| AppError::Config("API_BASE_URL must be set".to_string()))?;

        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(value) => value.parse().map_err(|_| {
                AppError::Config("HTTP_TIMEOUT_SECS must be a valid number".to_string())
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            http_timeout_secs,
            session_file: env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".fleet_session.json")),
            mapbox_token: env::var("MAPBOX_TOKEN").ok().filter(|t| !t.is_empty()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuración mínima apuntando a una URL concreta
    pub fn for_base_url(api_base_url: &str) -> Self {
        Self {
            environment: "development".to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            http_timeout_secs: 30,
            session_file: PathBuf::from(".fleet_session.json"),
            mapbox_token: None,
            log_level: "info".to_string(),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Nivel de log para tracing_subscriber
    pub fn tracing_level(&self) -> tracing::Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}
