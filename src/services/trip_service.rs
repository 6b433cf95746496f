//! Servicio de viajes
//!
//! Alta, cierre y cancelación de viajes más la regla de un único viaje
//! abierto por conductor.

use std::sync::Arc;

use tracing::{info, warn};

use super::device::LocationProvider;
use super::geocoding_service::ReverseGeocoder;
use super::history_service::newest_first;
use super::vehicle_resolver::require_vehicle;
use crate::client::FleetGateway;
use crate::controllers::trip_controller::{self, NewTripForm};
use crate::models::{Trip, TripAddressUpdate, TripDestination, TripStatus, Vehicle};
use crate::state::SessionStore;
use crate::utils::errors::{conflict_error, AppError, AppResult};

pub const OPEN_TRIP_NOTICE: &str =
    "You already have an open trip. Finish or cancel it before starting a new one";

/// Viaje creado y aviso informativo opcional sobre la dirección de salida
#[derive(Debug, Clone, PartialEq)]
pub struct TripCreated {
    pub trip: Trip,
    pub notice: Option<String>,
}

pub struct TripService {
    gateway: Arc<dyn FleetGateway>,
    session: SessionStore,
    geocoder: Option<Arc<dyn ReverseGeocoder>>,
    location: Option<Arc<dyn LocationProvider>>,
}

impl TripService {
    pub fn new(gateway: Arc<dyn FleetGateway>, session: SessionStore) -> Self {
        Self {
            gateway,
            session,
            geocoder: None,
            location: None,
        }
    }

    /// Activar la dirección de salida geocodificada
    pub fn with_geocoding(
        mut self,
        geocoder: Arc<dyn ReverseGeocoder>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        self.geocoder = Some(geocoder);
        self.location = Some(location);
        self
    }

    /// Viajes abiertos del conductor
    pub async fn open_trips(&self) -> AppResult<Vec<Trip>> {
        let session = self.session.require().await?;
        self.gateway
            .list_trips(session.driver_id(), Some(TripStatus::Open))
            .await
    }

    /// Comprobar, antes de mostrar el formulario, que no hay otro viaje abierto
    pub async fn ensure_can_open_trip(&self) -> AppResult<()> {
        let open = self.open_trips().await?;
        if open.iter().any(|t| t.status.is_open()) {
            info!("🚫 Conductor con {} viaje(s) abierto(s)", open.len());
            return Err(conflict_error(OPEN_TRIP_NOTICE));
        }
        Ok(())
    }

    /// Crear un viaje; la dirección de salida es best-effort
    pub async fn create_trip(&self, form: &NewTripForm, vehicle: Option<&Vehicle>) -> AppResult<TripCreated> {
        let session = self.session.require().await?;
        let vehicle = require_vehicle(vehicle)?;
        let request = form.validate(session.driver_id(), vehicle)?;

        self.ensure_can_open_trip().await?;

        let trip = self.gateway.create_trip(&request).await?;
        info!("✅ Viaje {} creado ({} -> {})", trip.id, trip.origin, trip.destination);

        let (trip, notice) = self.attach_departure_address(trip).await;
        Ok(TripCreated { trip, notice })
    }

    async fn attach_departure_address(&self, trip: Trip) -> (Trip, Option<String>) {
        let (geocoder, location) = match (&self.geocoder, &self.location) {
            (Some(geocoder), Some(location)) => (geocoder, location),
            _ => return (trip, None),
        };

        let address = match location.current_position().await {
            Ok(position) => geocoder.reverse_geocode(position).await,
            Err(e) => Err(e),
        };

        let result = match address {
            Ok(departure_address) => {
                let update = TripAddressUpdate { departure_address };
                self.gateway.set_departure_address(trip.id, &update).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(updated) => (updated, None),
            Err(e) => {
                warn!("⚠️ Viaje {} sin dirección de salida: {}", trip.id, e);
                let notice = match e {
                    AppError::PermissionDenied(_) => {
                        "Location permission denied: the departure address was not recorded"
                    }
                    _ => "Trip created, but the departure address could not be determined",
                };
                (trip, Some(notice.to_string()))
            }
        }
    }

    /// Cerrar un viaje con el odómetro de llegada
    pub async fn finish_trip(&self, trip: &Trip, arrival: &str) -> AppResult<Trip> {
        let destination = trip_controller::finish_trip(trip, arrival)?;
        self.close(trip, destination).await
    }

    /// Cancelar un viaje con un motivo
    pub async fn cancel_trip(&self, trip: &Trip, reason: &str) -> AppResult<Trip> {
        let destination = trip_controller::cancel_trip(trip, reason)?;
        self.close(trip, destination).await
    }

    async fn close(&self, trip: &Trip, destination: TripDestination) -> AppResult<Trip> {
        self.session.require().await?;
        let closed = self.gateway.close_trip(trip.id, &destination).await?;
        info!("🏁 Viaje {} -> {}", closed.id, closed.status.as_str());
        Ok(closed)
    }

    /// Lista de viajes, del más reciente al más antiguo
    pub async fn load_trips(&self) -> AppResult<Vec<Trip>> {
        let session = self.session.require().await?;
        let trips = self.gateway.list_trips(session.driver_id(), None).await?;
        Ok(newest_first(trips))
    }
}
