use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use fleet_driver::client::{ApiClient, FleetGateway};
use fleet_driver::config::EnvironmentConfig;
use fleet_driver::models::{
    CreateMaintenanceRequest, MaintenanceKind, Photo, TripDestination, TripStatus,
};
use fleet_driver::services::AuthService;
use fleet_driver::state::SessionStore;
use fleet_driver::utils::errors::{AppError, ErrorKind};

const TOKEN: &str = "token-abc";

#[derive(Default)]
struct MockBackend {
    trip_queries: Mutex<Vec<HashMap<String, String>>>,
    multipart_parts: Mutex<Vec<(String, Option<String>, usize)>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == format!("Bearer {}", TOKEN))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Invalid token" }))).into_response()
}

fn trip_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "driver_id": 30,
        "vehicle_id": 1,
        "origin": "Depot",
        "destination": "Harbor",
        "odometer_start": 1000,
        "status": status
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != "secret" {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Invalid credentials" })))
            .into_response();
    }
    Json(json!({
        "token": TOKEN,
        "user": { "id": 10, "username": body["username"], "email": null }
    }))
    .into_response()
}

async fn professionals(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let user_id: i64 = q.get("user").and_then(|v| v.parse().ok()).unwrap_or_default();
    Json(json!([{ "id": 20, "user_id": user_id, "name": "Maria Souza", "registration": null }]))
        .into_response()
}

async fn drivers(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let professional_id: i64 = q.get("professional").and_then(|v| v.parse().ok()).unwrap_or_default();
    Json(json!([{
        "id": 30,
        "professional_id": professional_id,
        "license_number": "SP-998877",
        "license_category": "B"
    }]))
    .into_response()
}

async fn vehicles(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let plate = q.get("plate").cloned().unwrap_or_default();
    let all = vec![
        json!({ "id": 1, "name": "Strada", "brand": "Fiat", "plate": "ABC-1234" }),
        json!({ "id": 2, "name": "Saveiro", "brand": "VW", "plate": "ABC-12345" }),
    ];
    let matches: Vec<Value> = all
        .into_iter()
        .filter(|v| v["plate"].as_str().map_or(false, |p| p.contains(plate.as_str())))
        .collect();
    Json(Value::Array(matches)).into_response()
}

async fn trips(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let open_only = q.get("status").map(String::as_str) == Some("open");
    backend.trip_queries.lock().unwrap().push(q);
    if open_only {
        Json(json!([trip_json(3, "open")])).into_response()
    } else {
        Json(json!([trip_json(1, "finished"), trip_json(2, "cancelled"), trip_json(3, "open")]))
            .into_response()
    }
}

async fn destination(headers: HeaderMap, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if id != 3 {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Trip not found" }))).into_response();
    }
    let mut trip = trip_json(id, "finished");
    trip["odometer_end"] = body["odometer_end"].clone();
    trip["distance_km"] = body["distance_km"].clone();
    Json(trip).into_response()
}

async fn maintenance(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut fields = HashMap::new();
    let mut photo_url = Value::Null;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap_or_default();
        if name == "photo" {
            photo_url = json!(format!("/media/{}", file_name.clone().unwrap_or_default()));
        } else {
            fields.insert(name.clone(), String::from_utf8_lossy(&bytes).to_string());
        }
        backend.multipart_parts.lock().unwrap().push((name, file_name, bytes.len()));
    }

    Json(json!({
        "id": 5,
        "vehicle_id": fields.get("vehicle_id").and_then(|v| v.parse::<i64>().ok()),
        "driver_id": fields.get("driver_id").and_then(|v| v.parse::<i64>().ok()),
        "kind": fields.get("kind"),
        "note": fields.get("note"),
        "photo_url": photo_url,
        "status": "pending"
    }))
    .into_response()
}

async fn history() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "database exploded").into_response()
}

async fn spawn_backend() -> (String, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::default());
    let app = Router::new()
        .route("/auth/login/", post(login))
        .route("/professionals/", get(professionals))
        .route("/drivers/", get(drivers))
        .route("/vehicles/", get(vehicles))
        .route("/trips/", get(trips))
        .route("/trips/:id/destination/", post(destination))
        .route("/maintenance-requests/", post(maintenance))
        .route("/history/", get(history))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), backend)
}

async fn logged_in_client(base_url: &str) -> (ApiClient, SessionStore) {
    let session = SessionStore::in_memory();
    let config = EnvironmentConfig::for_base_url(base_url);
    let gateway = Arc::new(ApiClient::new(&config, session.clone()).unwrap());
    AuthService::new(gateway, session.clone())
        .login("maria", "secret")
        .await
        .unwrap();
    (ApiClient::new(&config, session.clone()).unwrap(), session)
}

#[tokio::test]
async fn test_login_resolves_driver_identity() {
    let (base_url, _) = spawn_backend().await;
    let (_, session) = logged_in_client(&base_url).await;

    let current = session.current().await.unwrap();
    assert_eq!(current.token, TOKEN);
    assert_eq!(current.user.username, "maria");
    assert_eq!(current.professional.id, 20);
    assert_eq!(current.driver_id(), 30);
    assert_eq!(current.driver.license_category.as_deref(), Some("B"));
}

#[tokio::test]
async fn test_wrong_password_leaves_no_session() {
    let (base_url, _) = spawn_backend().await;
    let session = SessionStore::in_memory();
    let config = EnvironmentConfig::for_base_url(&base_url);
    let gateway = Arc::new(ApiClient::new(&config, session.clone()).unwrap());

    let err = AuthService::new(gateway, session.clone())
        .login("maria", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.user_notice(), "Invalid username or password");
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let (base_url, _) = spawn_backend().await;
    let (client, _) = logged_in_client(&base_url).await;

    let vehicles = client.vehicles_by_plate("ABC-1234").await.unwrap();
    assert_eq!(vehicles.len(), 2);
    assert_eq!(vehicles[0].brand, "Fiat");
}

#[tokio::test]
async fn test_missing_session_fails_before_request() {
    let (base_url, _) = spawn_backend().await;
    let config = EnvironmentConfig::for_base_url(&base_url);
    let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();

    let err = client.vehicles_by_plate("ABC-1234").await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn test_open_trip_filter_is_sent_as_query() {
    let (base_url, backend) = spawn_backend().await;
    let (client, _) = logged_in_client(&base_url).await;

    let open = client.list_trips(30, Some(TripStatus::Open)).await.unwrap();
    assert_eq!(open.len(), 1);
    assert!(open[0].status.is_open());

    let all = client.list_trips(30, None).await.unwrap();
    assert_eq!(all.len(), 3);

    let queries = backend.trip_queries.lock().unwrap().clone();
    assert_eq!(queries[0].get("status").map(String::as_str), Some("open"));
    assert_eq!(queries[0].get("driver").map(String::as_str), Some("30"));
    assert!(queries[1].get("status").is_none());
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let (base_url, _) = spawn_backend().await;
    let (client, _) = logged_in_client(&base_url).await;

    let finish = TripDestination::Finish { odometer_end: 1200, distance_km: 200 };
    let err = client.close_trip(99, &finish).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.user_notice(), "Trip not found");

    let closed = client.close_trip(3, &finish).await.unwrap();
    assert_eq!(closed.status, TripStatus::Finished);
    assert_eq!(closed.distance_km, Some(200));
}

#[tokio::test]
async fn test_server_error_has_generic_notice() {
    let (base_url, _) = spawn_backend().await;
    let (client, _) = logged_in_client(&base_url).await;

    let err = client.list_history(30).await.unwrap_err();
    assert!(matches!(err, AppError::Server { status: 500, .. }));
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(!err.user_notice().contains("database"));
}

#[tokio::test]
async fn test_maintenance_request_is_multipart_with_optional_photo() {
    let (base_url, backend) = spawn_backend().await;
    let (client, _) = logged_in_client(&base_url).await;

    let request = CreateMaintenanceRequest {
        vehicle_id: 1,
        driver_id: 30,
        kind: MaintenanceKind::Tires,
        note: "Flat rear tyre".to_string(),
    };
    let photo = Photo {
        file_name: "tyre.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    };

    let created = client
        .create_maintenance_request(&request, Some(photo))
        .await
        .unwrap();
    assert_eq!(created.kind, MaintenanceKind::Tires);
    assert_eq!(created.note, "Flat rear tyre");
    assert_eq!(created.photo_url.as_deref(), Some("/media/tyre.jpg"));

    let parts = backend.multipart_parts.lock().unwrap().clone();
    let names: Vec<&str> = parts.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(names, vec!["vehicle_id", "driver_id", "kind", "note", "photo"]);
    assert_eq!(parts[4].1.as_deref(), Some("tyre.jpg"));
    assert_eq!(parts[4].2, 4);

    backend.multipart_parts.lock().unwrap().clear();
    let without = client.create_maintenance_request(&request, None).await.unwrap();
    assert_eq!(without.photo_url, None);
    assert_eq!(backend.multipart_parts.lock().unwrap().len(), 4);
}
