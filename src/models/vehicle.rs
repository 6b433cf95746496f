//! Modelo de Vehicle
//!
//! Un vehículo de la flota tal como lo devuelve el backend. Es también la
//! forma exacta que viaja dentro de los códigos QR.

use serde::{Deserialize, Serialize};

/// Vehicle principal - los cuatro campos que identifican un vehículo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub plate: String,
}

impl Vehicle {
    /// Etiqueta corta para listas y cabeceras
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.brand, self.name, self.plate)
    }

    /// Coincidencia exacta con una matrícula ya recortada
    pub fn matches_plate(&self, plate: &str) -> bool {
        self.plate.trim() == plate
    }
}
