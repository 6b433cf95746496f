//! Gateway en memoria para los tests de servicios

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::FleetGateway;
use crate::dto::{LoginRequest, LoginResponse};
use crate::models::{
    CreateFuelUpRequest, CreateInspectionItemRequest, CreateInspectionRequest,
    CreateMaintenanceRequest, CreateTripRequest, Driver, FuelUp, HistoryEntry, Inspection,
    InspectionStatus, MaintenanceRequest, MaintenanceStatus, Photo, Professional, Trip,
    TripAddressUpdate, TripDestination, TripStatus, User, Vehicle,
};
use crate::state::SessionStore;
use crate::utils::errors::{AppError, AppResult};

pub const PASSWORD: &str = "secret";

#[derive(Default)]
pub struct FakeGateway {
    pub vehicles: Mutex<Vec<Vehicle>>,
    pub recent: Mutex<Vec<Vehicle>>,
    pub trips: Mutex<Vec<Trip>>,
    pub inspections: Mutex<Vec<Inspection>>,
    pub history: Mutex<Vec<HistoryEntry>>,
    pub calls: Mutex<Vec<String>>,
    pub inspection_items: Mutex<Vec<CreateInspectionItemRequest>>,
    pub fuel_ups: Mutex<Vec<CreateFuelUpRequest>>,
    pub maintenance: Mutex<Vec<(CreateMaintenanceRequest, Option<Photo>)>>,
    pub server_down: AtomicBool,
    pub missing_driver: AtomicBool,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_server_down(&self, down: bool) {
        self.server_down.store(down, Ordering::SeqCst);
    }

    fn record(&self, call: &str) -> AppResult<()> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.server_down.load(Ordering::SeqCst) {
            return Err(AppError::Server {
                status: 503,
                message: "maintenance window".to_string(),
            });
        }
        Ok(())
    }
}

pub fn vehicle(id: i64, plate: &str) -> Vehicle {
    Vehicle {
        id,
        name: format!("Van {}", id),
        brand: "Renault".to_string(),
        plate: plate.to_string(),
    }
}

pub fn trip(id: i64, status: TripStatus) -> Trip {
    Trip {
        id,
        driver_id: 30,
        vehicle_id: 1,
        origin: "Depot".to_string(),
        destination: "Market".to_string(),
        odometer_start: 1000,
        odometer_end: None,
        distance_km: None,
        purpose: None,
        fuel_level: None,
        status,
        departure_address: None,
        cancel_reason: None,
        created_at: None,
    }
}

/// SessionStore en memoria con la sesión de ejemplo ya establecida
pub async fn logged_in_session() -> SessionStore {
    let store = SessionStore::in_memory();
    store
        .establish(crate::state::tests::sample_session())
        .await
        .unwrap();
    store
}

#[async_trait]
impl FleetGateway for FakeGateway {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        self.record("login")?;
        if request.password != PASSWORD {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }
        Ok(LoginResponse {
            token: "token-abc".to_string(),
            user: User {
                id: 10,
                username: request.username.clone(),
                email: None,
            },
        })
    }

    async fn logout(&self) -> AppResult<()> {
        self.record("logout")
    }

    async fn professional_for_user(&self, user_id: i64, _token: &str) -> AppResult<Professional> {
        self.record("professional")?;
        Ok(Professional {
            id: 20,
            user_id,
            name: "Maria Souza".to_string(),
            registration: None,
        })
    }

    async fn driver_for_professional(&self, professional_id: i64, _token: &str) -> AppResult<Driver> {
        self.record("driver")?;
        if self.missing_driver.load(Ordering::SeqCst) {
            return Err(AppError::NotFound("No driver profile".to_string()));
        }
        Ok(Driver {
            id: 30,
            professional_id,
            license_number: None,
            license_category: None,
        })
    }

    async fn vehicles_by_plate(&self, plate: &str) -> AppResult<Vec<Vehicle>> {
        self.record(&format!("vehicles_by_plate:{}", plate))?;
        // Como un filtro `icontains` del backend: devuelve también coincidencias parciales
        Ok(self
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.plate.contains(plate))
            .cloned()
            .collect())
    }

    async fn recent_vehicles(&self, _driver_id: i64) -> AppResult<Vec<Vehicle>> {
        self.record("recent_vehicles")?;
        Ok(self.recent.lock().unwrap().clone())
    }

    async fn list_trips(&self, _driver_id: i64, status: Option<TripStatus>) -> AppResult<Vec<Trip>> {
        self.record("list_trips")?;
        Ok(self
            .trips
            .lock()
            .unwrap()
            .iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .cloned()
            .collect())
    }

    async fn create_trip(&self, request: &CreateTripRequest) -> AppResult<Trip> {
        self.record("create_trip")?;
        let mut trips = self.trips.lock().unwrap();
        let created = Trip {
            id: trips.len() as i64 + 1,
            driver_id: request.driver_id,
            vehicle_id: request.vehicle_id,
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            odometer_start: request.odometer_start,
            odometer_end: None,
            distance_km: None,
            purpose: request.purpose.clone(),
            fuel_level: request.fuel_level,
            status: TripStatus::Open,
            departure_address: None,
            cancel_reason: None,
            created_at: None,
        };
        trips.push(created.clone());
        Ok(created)
    }

    async fn set_departure_address(&self, trip_id: i64, update: &TripAddressUpdate) -> AppResult<Trip> {
        self.record("set_departure_address")?;
        let mut trips = self.trips.lock().unwrap();
        let trip = trips
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| AppError::NotFound("trip".to_string()))?;
        trip.departure_address = Some(update.departure_address.clone());
        Ok(trip.clone())
    }

    async fn close_trip(&self, trip_id: i64, destination: &TripDestination) -> AppResult<Trip> {
        self.record("close_trip")?;
        let mut trips = self.trips.lock().unwrap();
        let trip = trips
            .iter_mut()
            .find(|t| t.id == trip_id)
            .ok_or_else(|| AppError::NotFound("trip".to_string()))?;
        match destination {
            TripDestination::Finish { odometer_end, distance_km } => {
                trip.status = TripStatus::Finished;
                trip.odometer_end = Some(*odometer_end);
                trip.distance_km = Some(*distance_km);
            }
            TripDestination::Cancel { reason } => {
                trip.status = TripStatus::Cancelled;
                trip.cancel_reason = Some(reason.clone());
            }
        }
        Ok(trip.clone())
    }

    async fn create_fuel_up(&self, request: &CreateFuelUpRequest) -> AppResult<FuelUp> {
        self.record("create_fuel_up")?;
        self.fuel_ups.lock().unwrap().push(request.clone());
        Ok(FuelUp {
            id: 1,
            vehicle_id: request.vehicle_id,
            driver_id: request.driver_id,
            liters: request.liters,
            fuel_type: request.fuel_type,
            odometer: request.odometer,
            created_at: None,
        })
    }

    async fn create_inspection(&self, request: &CreateInspectionRequest) -> AppResult<Inspection> {
        self.record("create_inspection")?;
        Ok(Inspection {
            id: 77,
            vehicle_id: request.vehicle_id,
            driver_id: request.driver_id,
            odometer: request.odometer,
            oil_change_odometer: request.oil_change_odometer,
            oil_change_date: request.oil_change_date,
            fuel_level: request.fuel_level,
            documents_valid: request.documents_valid,
            has_fuel_card: request.has_fuel_card,
            notes: request.notes.clone(),
            status: InspectionStatus::Pending,
            created_at: None,
        })
    }

    async fn create_inspection_item(&self, request: &CreateInspectionItemRequest) -> AppResult<()> {
        self.record("create_inspection_item")?;
        self.inspection_items.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn list_inspections(&self, _driver_id: i64) -> AppResult<Vec<Inspection>> {
        self.record("list_inspections")?;
        Ok(self.inspections.lock().unwrap().clone())
    }

    async fn create_maintenance_request(
        &self,
        request: &CreateMaintenanceRequest,
        photo: Option<Photo>,
    ) -> AppResult<MaintenanceRequest> {
        self.record("create_maintenance_request")?;
        let photo_url = photo.as_ref().map(|p| format!("/media/{}", p.file_name));
        self.maintenance.lock().unwrap().push((request.clone(), photo));
        Ok(MaintenanceRequest {
            id: 5,
            vehicle_id: request.vehicle_id,
            driver_id: request.driver_id,
            kind: request.kind,
            note: request.note.clone(),
            photo_url,
            status: MaintenanceStatus::Pending,
            created_at: None,
        })
    }

    async fn list_history(&self, _driver_id: i64) -> AppResult<Vec<HistoryEntry>> {
        self.record("list_history")?;
        Ok(self.history.lock().unwrap().clone())
    }
}
