//! Identidad del conductor
//!
//! Usuario, perfil profesional y perfil de conductor que se cachean al
//! hacer login y se borran al hacer logout.

use serde::{Deserialize, Serialize};

/// Usuario autenticado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

/// Perfil profesional asociado a un usuario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub registration: Option<String>,
}

/// Perfil de conductor asociado a un profesional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub professional_id: i64,
    pub license_number: Option<String>,
    pub license_category: Option<String>,
}

/// Entrada persistida `user`: identidad + token bearer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub user: User,
    pub token: String,
}

/// Sesión completa del conductor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub professional: Professional,
    pub driver: Driver,
}

impl Session {
    pub fn driver_id(&self) -> i64 {
        self.driver.id
    }

    /// Nombre para mostrar en el saludo del shell
    pub fn display_name(&self) -> &str {
        if self.professional.name.is_empty() {
            &self.user.username
        } else {
            &self.professional.name
        }
    }
}
