//! Controladores de formularios
//!
//! Lógica pura de los formularios: estados, transiciones y validación
//! previa al envío. Ninguno de estos módulos hace peticiones.

pub mod fuel_controller;
pub mod inspection_controller;
pub mod maintenance_controller;
pub mod trip_controller;

pub use fuel_controller::FuelUpForm;
pub use inspection_controller::{
    transition, InspectionEvent, InspectionField, InspectionPayload, InspectionStage,
    InspectionState, StepOutcome,
};
pub use maintenance_controller::MaintenanceForm;
pub use trip_controller::NewTripForm;
