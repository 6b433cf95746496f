//! Colores de estado para las listas de historial

use serde::{Deserialize, Serialize};

/// Color con el que se pinta un registro según su estado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusColor {
    Green,
    Amber,
    Red,
    Grey,
}

impl StatusColor {
    /// Color para una etiqueta de estado tal como la envía el backend
    pub fn for_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "finished" | "approved" | "done" | "completed" => StatusColor::Green,
            "open" | "pending" | "in_progress" => StatusColor::Amber,
            "cancelled" | "rejected" => StatusColor::Red,
            _ => StatusColor::Grey,
        }
    }
}

/// Registros que se muestran coloreados en una lista
pub trait HasStatusColor {
    fn status_color(&self) -> StatusColor;
}
