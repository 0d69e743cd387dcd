use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};
use tower::ServiceExt;

use pawhaven::api;
use pawhaven::config::Config;
use pawhaven::migrations::Migrator;
use pawhaven::state::{AppState, default_filter_registry};

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn test_config() -> Config {
    Config {
        listen_port: 0,
        db_host: "unused".to_string(),
        db_port: 5432,
        db_user: "unused".to_string(),
        db_password: "unused".to_string(),
        db_name: "unused".to_string(),
        secret_key: "test-secret-key".to_string(),
    }
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    let state = AppState::new(
        db,
        Arc::new(test_config()),
        Arc::new(default_filter_registry()),
    );
    api::router(state)
}

/// Sends a request and returns the status plus the parsed JSON body (null
/// for empty bodies, a JSON string for non-JSON bodies).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

/// Registers a fresh account and returns its bearer token.
pub async fn register_and_login(app: &Router, email: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "hunter2",
            "name": "Test User",
            "phone": "555-0100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": "hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["loginToken"].as_str().unwrap().to_string()
}

/// Creates a pet and returns its id.
pub async fn create_pet(app: &Router, token: &str, pet: Value) -> i64 {
    let (status, body) = send(app, "POST", "/pets", Some(token), Some(pet)).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}
