//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del entorno del cliente.

pub mod environment;

pub use environment::*;
