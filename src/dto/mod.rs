//! DTOs de la API
//!
//! Formas de petición y respuesta que solo existen en el cable.

pub mod auth_dto;

pub use auth_dto::*;
