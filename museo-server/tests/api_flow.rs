//! End-to-end API tests
//!
//! Boots the full server state against a temporary working directory and
//! drives the router directly as a tower service.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use museo_server::{Config, ServerState, api};
use serde_json::{Value, json};
use tower::Service;

async fn test_app() -> (Router, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("failed to initialize state");
    (api::build_app(state), tmp)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &mut Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.call(req).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    (status, bytes.to_vec())
}

async fn send_json(app: &mut Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, req).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login_admin(app: &mut Router) -> String {
    let (status, body) = send_json(
        app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "admin", "password": "admin123"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "admin login failed: {}", body);
    body["token"].as_str().expect("token missing").to_string()
}

#[tokio::test]
async fn health_is_public_but_entities_require_auth() {
    let (mut app, _tmp) = test_app().await;

    let (status, body) = send_json(&mut app, request("GET", "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = send_json(&mut app, request("GET", "/api/rooms", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(
        &mut app,
        request("GET", "/api/rooms", Some("not-a-real-token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials_with_uniform_message() {
    let (mut app, _tmp) = test_app().await;

    let (status, wrong_pass) = send_json(
        &mut app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "admin", "password": "nope"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, unknown_user) = send_json(
        &mut app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "ghost", "password": "nope"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Same message for unknown user and wrong password
    assert_eq!(wrong_pass["message"], unknown_user["message"]);
}

#[tokio::test]
async fn room_crud_and_export() {
    let (mut app, _tmp) = test_app().await;
    let token = login_admin(&mut app).await;

    // Create
    let (status, room) = send_json(
        &mut app,
        request(
            "POST",
            "/api/rooms",
            Some(&token),
            Some(json!({
                "name": "Gold Hall",
                "capacity": 150,
                "location": "First floor",
                "description": "Main exhibition hall"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "room create failed: {}", room);
    let room_id = room["id"].as_str().expect("room id missing").to_string();
    assert_eq!(room["capacity"], 150);

    // Empty name is rejected
    let (status, _) = send_json(
        &mut app,
        request(
            "POST",
            "/api/rooms",
            Some(&token),
            Some(json!({"name": ""})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // List
    let (status, rooms) = send_json(&mut app, request("GET", "/api/rooms", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rooms.as_array().map(|a| a.len()), Some(1));

    // Update
    let (status, updated) = send_json(
        &mut app,
        request(
            "PUT",
            &format!("/api/rooms/{}", room_id),
            Some(&token),
            Some(json!({"capacity": 180})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["capacity"], 180);
    assert_eq!(updated["name"], "Gold Hall");

    // Export
    let (status, bytes) = send(
        &mut app,
        request("GET", "/api/rooms/export/excel", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // XLSX files are zip archives
    assert!(bytes.starts_with(b"PK"));

    // Delete, then 404
    let (status, _) = send_json(
        &mut app,
        request("DELETE", &format!("/api/rooms/{}", room_id), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &mut app,
        request("GET", &format!("/api/rooms/{}", room_id), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reservation_flow_computes_total_and_renders_ticket() {
    let (mut app, _tmp) = test_app().await;
    let token = login_admin(&mut app).await;

    let (_, room) = send_json(
        &mut app,
        request(
            "POST",
            "/api/rooms",
            Some(&token),
            Some(json!({"name": "Royal Tombs Hall", "capacity": 80})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();

    let (status, event) = send_json(
        &mut app,
        request(
            "POST",
            "/api/events",
            Some(&token),
            Some(json!({
                "name": "Night at the Museum",
                "start_date": "2030-05-10",
                "start_time": "19:30:00",
                "event_type": "gala",
                "ticket_price": 42.50,
                "room": room_id
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "event create failed: {}", event);
    let event_id = event["id"].as_str().unwrap().to_string();

    // Events referencing a missing room are rejected
    let (status, _) = send_json(
        &mut app,
        request(
            "POST",
            "/api/events",
            Some(&token),
            Some(json!({
                "name": "Orphan Event",
                "start_date": "2030-06-01",
                "room": "room:doesnotexist"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The upcoming listing resolves the room name
    let (status, upcoming) = send_json(
        &mut app,
        request("GET", "/api/events/upcoming?limit=3", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(upcoming[0]["name"], "Night at the Museum");
    assert_eq!(upcoming[0]["room_name"], "Royal Tombs Hall");

    // Total is computed server-side: 42.50 × 3
    let (status, reservation) = send_json(
        &mut app,
        request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(json!({
                "customer_name": "Juan Perez",
                "id_document": "12345678",
                "phone": "987654321",
                "ticket_count": 3,
                "payment_method": "cash",
                "receipt_type": "receipt",
                "event": event_id
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "reservation failed: {}", reservation);
    assert_eq!(reservation["total"], 127.5);
    let reservation_id = reservation["id"].as_str().unwrap().to_string();

    // Reservations against a missing event are a 404
    let (status, _) = send_json(
        &mut app,
        request(
            "POST",
            "/api/reservations",
            Some(&token),
            Some(json!({
                "customer_name": "Nobody",
                "id_document": "0",
                "ticket_count": 1,
                "event": "event:doesnotexist"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Ticket PDF download
    let (status, bytes) = send(
        &mut app,
        request(
            "GET",
            &format!("/api/reservations/{}/ticket/pdf", reservation_id),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn user_admin_routes_are_admin_only() {
    let (mut app, _tmp) = test_app().await;
    let admin_token = login_admin(&mut app).await;

    // Register a staff account (public route)
    let (status, staff) = send_json(
        &mut app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "full_name": "Maria Lopez",
                "username": "mlopez",
                "password": "secret123"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", staff);
    assert_eq!(staff["role"], "staff");

    // Duplicate usernames are rejected
    let (status, _) = send_json(
        &mut app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "full_name": "Impostor",
                "username": "mlopez",
                "password": "secret123"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, login) = send_json(
        &mut app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "mlopez", "password": "secret123"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let staff_token = login["token"].as_str().unwrap().to_string();

    // Staff may read entities but not administer users
    let (status, _) = send_json(&mut app, request("GET", "/api/rooms", Some(&staff_token), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&mut app, request("GET", "/api/users", Some(&staff_token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, users) = send_json(&mut app, request("GET", "/api/users", Some(&admin_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().map(|a| a.len()), Some(2));

    // /api/auth/me reflects the token's user
    let (status, me) = send_json(&mut app, request("GET", "/api/auth/me", Some(&staff_token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "mlopez");
}
