//! Inventory stock tests
//!
//! Exercises the transactional reserve/release path and the dashboard
//! aggregates against a real embedded database.

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

async fn send_json(app: &mut Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.call(req).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Build a `{product_id: quantity}` request body
fn qty_map(pairs: &[(&str, i32)]) -> Value {
    let mut map = serde_json::Map::new();
    for (product_id, quantity) in pairs {
        map.insert(product_id.to_string(), json!(quantity));
    }
    Value::Object(map)
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

async fn create_event(app: &mut Router, token: &str) -> String {
    let (_, room) = send_json(
        app,
        request(
            "POST",
            "/api/rooms",
            Some(token),
            Some(json!({"name": "Projection Room", "capacity": 40})),
        ),
    )
    .await;
    let room_id = room["id"].as_str().unwrap().to_string();

    let (status, event) = send_json(
        app,
        request(
            "POST",
            "/api/events",
            Some(token),
            Some(json!({
                "name": "Documentary Week",
                "start_date": "2030-09-01",
                "ticket_price": 10.0,
                "room": room_id
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "event create failed: {}", event);
    event["id"].as_str().unwrap().to_string()
}

async fn product_available(app: &mut Router, token: &str, product_id: &str) -> i64 {
    let (status, product) = send_json(
        app,
        request("GET", &format!("/api/inventory/{}", product_id), Some(token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    product["stock_available"].as_i64().unwrap()
}

#[tokio::test]
async fn stock_is_reserved_and_released_transactionally() {
    let (mut app, _tmp) = test_app().await;
    let token = login_admin(&mut app).await;
    let event_id = create_event(&mut app, &token).await;

    // New product defaults available stock to the total
    let (status, projector) = send_json(
        &mut app,
        request(
            "POST",
            "/api/inventory",
            Some(&token),
            Some(json!({"name": "Projector", "category": "Electronics", "stock_total": 10})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "product create failed: {}", projector);
    assert_eq!(projector["stock_available"], 10);
    let projector_id = projector["id"].as_str().unwrap().to_string();

    let (_, chairs) = send_json(
        &mut app,
        request(
            "POST",
            "/api/inventory",
            Some(&token),
            Some(json!({"name": "Plastic Chair", "category": "Furniture", "stock_total": 50})),
        ),
    )
    .await;
    let chairs_id = chairs["id"].as_str().unwrap().to_string();

    // Reserve 3 projectors and 20 chairs in one batch
    let (status, assignments) = send_json(
        &mut app,
        request(
            "POST",
            &format!("/api/events/{}/inventory", event_id),
            Some(&token),
            Some(qty_map(&[(&projector_id, 3), (&chairs_id, 20)])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "reserve failed: {}", assignments);
    assert_eq!(assignments.as_array().map(|a| a.len()), Some(2));

    assert_eq!(product_available(&mut app, &token, &projector_id).await, 7);
    assert_eq!(product_available(&mut app, &token, &chairs_id).await, 30);

    // Over-drawing one product aborts the whole batch: the other line
    // must not be applied either
    let (status, err) = send_json(
        &mut app,
        request(
            "POST",
            &format!("/api/events/{}/inventory", event_id),
            Some(&token),
            Some(qty_map(&[(&chairs_id, 5), (&projector_id, 100)])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "expected stock failure: {}", err);

    assert_eq!(product_available(&mut app, &token, &projector_id).await, 7);
    assert_eq!(product_available(&mut app, &token, &chairs_id).await, 30);

    // Releasing restores every counter and clears the assignments
    let (status, _) = send_json(
        &mut app,
        request(
            "DELETE",
            &format!("/api/events/{}/inventory", event_id),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(product_available(&mut app, &token, &projector_id).await, 10);
    assert_eq!(product_available(&mut app, &token, &chairs_id).await, 50);

    let (status, assignments) = send_json(
        &mut app,
        request(
            "GET",
            &format!("/api/events/{}/inventory", event_id),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assignments.as_array().map(|a| a.len()), Some(0));
}

#[tokio::test]
async fn deleting_an_event_releases_its_stock() {
    let (mut app, _tmp) = test_app().await;
    let token = login_admin(&mut app).await;
    let event_id = create_event(&mut app, &token).await;

    let (_, product) = send_json(
        &mut app,
        request(
            "POST",
            "/api/inventory",
            Some(&token),
            Some(json!({"name": "Display Case", "stock_total": 8})),
        ),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &mut app,
        request(
            "POST",
            &format!("/api/events/{}/inventory", event_id),
            Some(&token),
            Some(qty_map(&[(&product_id, 5)])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_available(&mut app, &token, &product_id).await, 3);

    let (status, _) = send_json(
        &mut app,
        request("DELETE", &format!("/api/events/{}", event_id), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(product_available(&mut app, &token, &product_id).await, 8);
}

#[tokio::test]
async fn dashboard_aggregates_revenue_and_counters() {
    let (mut app, _tmp) = test_app().await;
    let token = login_admin(&mut app).await;
    let event_id = create_event(&mut app, &token).await;

    // Two reservations at 10.0 per ticket: 2 + 5 tickets
    for count in [2, 5] {
        let (status, body) = send_json(
            &mut app,
            request(
                "POST",
                "/api/reservations",
                Some(&token),
                Some(json!({
                    "customer_name": "Visitor",
                    "id_document": "00000001",
                    "ticket_count": count,
                    "event": &event_id
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "reservation failed: {}", body);
    }

    // One product under the low-stock threshold, one above
    for (name, total) in [("Lamp", 2), ("Banner", 30)] {
        let (status, _) = send_json(
            &mut app,
            request(
                "POST",
                "/api/inventory",
                Some(&token),
                Some(json!({"name": name, "stock_total": total})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, metrics) = send_json(&mut app, request("GET", "/api/dashboard", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK, "dashboard failed: {}", metrics);
    assert_eq!(metrics["total_revenue"], 70.0);
    assert_eq!(metrics["future_events"], 1);
    assert_eq!(metrics["low_stock"], 1);
    assert_eq!(metrics["total_reservations"], 2);
}
