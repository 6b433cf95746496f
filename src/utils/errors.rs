//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del cliente
//! y su conversión a avisos para el conductor.

use thiserror::Error;
use tracing::{debug, error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    InvalidFields(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Corrupt code: {0}")]
    CorruptCode(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Categoría del error vista desde la pantalla que lo recibe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Network,
    MalformedInput,
    Permission,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::InvalidFields(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Network(_) | AppError::Server { .. } | AppError::Unauthorized(_) => {
                ErrorKind::Network
            }
            AppError::CorruptCode(_) => ErrorKind::MalformedInput,
            AppError::PermissionDenied(_) => ErrorKind::Permission,
            AppError::Session(_) | AppError::Config(_) | AppError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Texto que se muestra al conductor.
    ///
    /// Los errores de red y servidor se reducen a un aviso genérico; el
    /// detalle queda en el log.
    pub fn user_notice(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::PermissionDenied(msg) => msg.clone(),
            AppError::InvalidFields(errors) => format!("Invalid fields: {}", errors),
            AppError::Unauthorized(_) => "Your session has expired, please log in again".to_string(),
            AppError::Network(_) | AppError::Server { .. } => {
                "Could not reach the server, please try again".to_string()
            }
            AppError::CorruptCode(_) => "Corrupt QR code, scan again".to_string(),
            AppError::Session(_) | AppError::Config(_) | AppError::Internal(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }

    /// Registra el error con el nivel que le corresponde a su categoría
    pub fn log(&self, context: &str) {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::Conflict => {
                debug!("ℹ️ {}: {}", context, self)
            }
            ErrorKind::MalformedInput | ErrorKind::Permission => warn!("⚠️ {}: {}", context, self),
            ErrorKind::Network | ErrorKind::Internal => error!("❌ {}: {}", context, self),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(message: &str) -> AppError {
    AppError::Conflict(message.to_string())
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}
