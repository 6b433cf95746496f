//! Cliente del conductor para el backend de la flota
//!
//! Selección de vehículo (matrícula, QR o recientes), viajes, repostajes,
//! inspecciones, mantenimiento e historial.

pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use client::{ApiClient, FleetGateway};
pub use config::EnvironmentConfig;
pub use state::{FileSessionStorage, MemorySessionStorage, SessionStorage, SessionStore};
pub use utils::errors::{AppError, AppResult, ErrorKind};
