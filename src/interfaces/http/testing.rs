//! Shared test support: in-memory database, app construction and a small
//! request helper driving the real router through `tower::Service`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::migrator::Migrator;

/// Fresh migrated in-memory SQLite database.
/// One pooled connection so every query sees the same memory store.
pub(crate) async fn test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.expect("connect in-memory db");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub(crate) fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "logbook-service".to_string(),
    }
}

/// Full application router over a fresh in-memory database.
pub(crate) async fn test_app() -> (Router, DatabaseConnection) {
    let db = test_db().await;
    let app = crate::interfaces::http::create_api_router(
        db.clone(),
        test_jwt_config(),
        std::path::Path::new("web"),
    );
    (app, db)
}

/// Send one request; returns the status and the parsed JSON body.
pub(crate) async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    use tower::Service;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let mut svc = app.clone().into_service();
    let response = svc.call(request).await.unwrap();
    let status = response.status();

    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Register a user and return their token.
pub(crate) async fn register_user(app: &Router, user_id: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({"userId": user_id, "password": "secret123"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Minimal valid create-operation body, varied by `name`.
pub(crate) fn operation_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "patientId": "P-1001",
        "age": 58,
        "operationDate": chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string(),
        "operatorName": "Ms X",
        "operatorLevel": "Specialist Registrar",
        "operation": name,
        "hospital": "St Elsewhere",
        "isPrivate": false
    })
}

/// Create one operation and return its id.
pub(crate) async fn create_operation(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/operations",
        Some(token),
        Some(operation_body(name)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}
