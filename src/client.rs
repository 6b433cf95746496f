//! Cliente HTTP del backend de flota
//!
//! Este módulo contiene el gateway remoto: el trait `FleetGateway` que usan
//! los servicios y su implementación `ApiClient` sobre reqwest, que añade
//! el token bearer de la sesión a cada petición.

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::environment::EnvironmentConfig;
use crate::dto::{ApiErrorBody, LoginRequest, LoginResponse};
use crate::models::{
    CreateFuelUpRequest, CreateInspectionItemRequest, CreateInspectionRequest,
    CreateMaintenanceRequest, CreateTripRequest, Driver, FuelUp, HistoryEntry, Inspection,
    MaintenanceRequest, Photo, Professional, Trip, TripAddressUpdate, TripDestination, TripStatus,
    Vehicle,
};
use crate::state::SessionStore;
use crate::utils::errors::{AppError, AppResult};

/// Operaciones remotas que consumen los servicios
#[async_trait]
pub trait FleetGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse>;
    async fn logout(&self) -> AppResult<()>;

    /// Las consultas de identidad reciben el token porque se hacen antes
    /// de que exista la sesión
    async fn professional_for_user(&self, user_id: i64, token: &str) -> AppResult<Professional>;
    async fn driver_for_professional(&self, professional_id: i64, token: &str) -> AppResult<Driver>;

    async fn vehicles_by_plate(&self, plate: &str) -> AppResult<Vec<Vehicle>>;
    async fn recent_vehicles(&self, driver_id: i64) -> AppResult<Vec<Vehicle>>;

    async fn list_trips(&self, driver_id: i64, status: Option<TripStatus>) -> AppResult<Vec<Trip>>;
    async fn create_trip(&self, request: &CreateTripRequest) -> AppResult<Trip>;
    async fn set_departure_address(&self, trip_id: i64, update: &TripAddressUpdate) -> AppResult<Trip>;
    async fn close_trip(&self, trip_id: i64, destination: &TripDestination) -> AppResult<Trip>;

    async fn create_fuel_up(&self, request: &CreateFuelUpRequest) -> AppResult<FuelUp>;

    async fn create_inspection(&self, request: &CreateInspectionRequest) -> AppResult<Inspection>;
    async fn create_inspection_item(&self, request: &CreateInspectionItemRequest) -> AppResult<()>;
    async fn list_inspections(&self, driver_id: i64) -> AppResult<Vec<Inspection>>;

    async fn create_maintenance_request(
        &self,
        request: &CreateMaintenanceRequest,
        photo: Option<Photo>,
    ) -> AppResult<MaintenanceRequest>;

    async fn list_history(&self, driver_id: i64) -> AppResult<Vec<HistoryEntry>>;
}

/// Cliente HTTP para la API de flota
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Crear nuevo cliente con la URL y timeout de la configuración
    pub fn new(config: &EnvironmentConfig, session: SessionStore) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .user_agent(concat!("fleet-driver/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Añadir el token bearer de la sesión activa
    async fn authorized(&self, builder: RequestBuilder) -> AppResult<RequestBuilder> {
        let token = self
            .session
            .token()
            .await
            .ok_or_else(|| AppError::Unauthorized("No active session".to_string()))?;
        Ok(builder.bearer_auth(token))
    }

    /// Enviar la petición y convertir los estados no-2xx en errores tipados
    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            error!("❌ Error de red: {}", e);
            AppError::Network(e)
        })?;

        let status = response.status();
        debug!("📡 {} {}", status, response.url());
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| body.clone());

        match status {
            StatusCode::NOT_FOUND => Err(AppError::NotFound(if message.is_empty() {
                "Resource not found".to_string()
            } else {
                message
            })),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized(message)),
            _ => {
                error!("❌ Respuesta {} del backend: {}", status, body);
                Err(AppError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = self.send(builder).await?;
        Ok(response.json::<T>().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T> {
        let builder = self.authorized(self.client.get(self.url(path)).query(query)).await?;
        self.send_json(builder).await
    }
}

#[async_trait]
impl FleetGateway for ApiClient {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let builder = self.client.post(self.url("/auth/login/")).json(request);
        self.send_json(builder).await
    }

    async fn logout(&self) -> AppResult<()> {
        let builder = self.authorized(self.client.post(self.url("/auth/logout/"))).await?;
        self.send(builder).await?;
        Ok(())
    }

    async fn professional_for_user(&self, user_id: i64, token: &str) -> AppResult<Professional> {
        let builder = self
            .client
            .get(self.url("/professionals/"))
            .query(&[("user", user_id)])
            .bearer_auth(token);
        let professionals: Vec<Professional> = self.send_json(builder).await?;
        professionals
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("No professional profile for user {}", user_id)))
    }

    async fn driver_for_professional(&self, professional_id: i64, token: &str) -> AppResult<Driver> {
        let builder = self
            .client
            .get(self.url("/drivers/"))
            .query(&[("professional", professional_id)])
            .bearer_auth(token);
        let drivers: Vec<Driver> = self.send_json(builder).await?;
        drivers.into_iter().next().ok_or_else(|| {
            AppError::NotFound(format!("No driver profile for professional {}", professional_id))
        })
    }

    async fn vehicles_by_plate(&self, plate: &str) -> AppResult<Vec<Vehicle>> {
        self.get_json("/vehicles/", &[("plate", plate.to_string())]).await
    }

    async fn recent_vehicles(&self, driver_id: i64) -> AppResult<Vec<Vehicle>> {
        self.get_json("/vehicles/recent/", &[("driver", driver_id.to_string())])
            .await
    }

    async fn list_trips(&self, driver_id: i64, status: Option<TripStatus>) -> AppResult<Vec<Trip>> {
        let mut query = vec![("driver", driver_id.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        self.get_json("/trips/", &query).await
    }

    async fn create_trip(&self, request: &CreateTripRequest) -> AppResult<Trip> {
        let builder = self
            .authorized(self.client.post(self.url("/trips/")).json(request))
            .await?;
        self.send_json(builder).await
    }

    async fn set_departure_address(&self, trip_id: i64, update: &TripAddressUpdate) -> AppResult<Trip> {
        let path = format!("/trips/{}/", trip_id);
        let builder = self
            .authorized(self.client.patch(self.url(&path)).json(update))
            .await?;
        self.send_json(builder).await
    }

    async fn close_trip(&self, trip_id: i64, destination: &TripDestination) -> AppResult<Trip> {
        let path = format!("/trips/{}/destination/", trip_id);
        let builder = self
            .authorized(self.client.post(self.url(&path)).json(destination))
            .await?;
        self.send_json(builder).await
    }

    async fn create_fuel_up(&self, request: &CreateFuelUpRequest) -> AppResult<FuelUp> {
        let builder = self
            .authorized(self.client.post(self.url("/fuel-ups/")).json(request))
            .await?;
        self.send_json(builder).await
    }

    async fn create_inspection(&self, request: &CreateInspectionRequest) -> AppResult<Inspection> {
        let builder = self
            .authorized(self.client.post(self.url("/inspections/")).json(request))
            .await?;
        self.send_json(builder).await
    }

    async fn create_inspection_item(&self, request: &CreateInspectionItemRequest) -> AppResult<()> {
        let builder = self
            .authorized(self.client.post(self.url("/inspection-items/")).json(request))
            .await?;
        self.send(builder).await?;
        Ok(())
    }

    async fn list_inspections(&self, driver_id: i64) -> AppResult<Vec<Inspection>> {
        self.get_json("/inspections/", &[("driver", driver_id.to_string())])
            .await
    }

    async fn create_maintenance_request(
        &self,
        request: &CreateMaintenanceRequest,
        photo: Option<Photo>,
    ) -> AppResult<MaintenanceRequest> {
        let mut form = multipart::Form::new()
            .text("vehicle_id", request.vehicle_id.to_string())
            .text("driver_id", request.driver_id.to_string())
            .text("kind", request.kind.as_str())
            .text("note", request.note.clone());

        if let Some(photo) = photo {
            let part = multipart::Part::bytes(photo.bytes)
                .file_name(photo.file_name)
                .mime_str(&photo.mime_type)?;
            form = form.part("photo", part);
        }

        let builder = self
            .authorized(self.client.post(self.url("/maintenance-requests/")).multipart(form))
            .await?;
        self.send_json(builder).await
    }

    async fn list_history(&self, driver_id: i64) -> AppResult<Vec<HistoryEntry>> {
        self.get_json("/history/", &[("driver", driver_id.to_string())])
            .await
    }
}
