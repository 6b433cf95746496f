//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación del
//! conductor. Cada servicio combina un controlador de formulario, la
//! sesión actual y el gateway del backend.

pub mod auth_service;
pub mod device;
pub mod fuel_service;
pub mod geocoding_service;
pub mod history_service;
pub mod inspection_service;
pub mod maintenance_service;
pub mod qr_service;
pub mod trip_service;
pub mod vehicle_resolver;

#[cfg(test)]
pub mod testing;

pub use auth_service::AuthService;
pub use device::{Coordinates, FixedLocation, LocationProvider, Permission};
pub use fuel_service::FuelService;
pub use geocoding_service::{GeocodingService, ReverseGeocoder};
pub use history_service::{newest_first, HistoryService};
pub use inspection_service::InspectionService;
pub use maintenance_service::{load_photo, MaintenanceService};
pub use trip_service::{TripCreated, TripService, OPEN_TRIP_NOTICE};
pub use vehicle_resolver::{require_vehicle, ScannerState, VehicleResolver};
