//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que intercambia el
//! cliente con el backend de la flota.

pub mod fuel;
pub mod history;
pub mod inspection;
pub mod maintenance;
pub mod status;
pub mod trip;
pub mod user;
pub mod vehicle;

pub use fuel::{CreateFuelUpRequest, FuelLevel, FuelType, FuelUp};
pub use history::{HistoryEntry, HistoryKind};
pub use inspection::{
    CreateInspectionItemRequest, CreateInspectionRequest, Inspection, InspectionStatus,
    TireCondition, TirePosition,
};
pub use maintenance::{
    CreateMaintenanceRequest, MaintenanceKind, MaintenanceRequest, MaintenanceStatus, Photo,
};
pub use status::{HasStatusColor, StatusColor};
pub use trip::{CreateTripRequest, Trip, TripAddressUpdate, TripDestination, TripEvent, TripStatus};
pub use user::{Driver, Professional, Session, User, UserEntry};
pub use vehicle::Vehicle;
