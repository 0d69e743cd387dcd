use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{register_and_login, send, setup_test_app, setup_test_db};

#[tokio::test]
async fn test_health_check_is_public() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);

    let (status, body) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Response: OK"));
}

#[tokio::test]
async fn test_register_returns_public_user_without_password() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "email": "ana@example.com",
            "password": "hunter2",
            "name": "Ana",
            "address": "12 Bark Street",
            "phone": "555-0101"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["name"], "Ana");
    assert!(body.get("password").is_none(), "password leaked: {body}");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);

    let input = json!({"email": "ana@example.com", "password": "hunter2"});
    let (status, _) = send(&app, "POST", "/auth/register", None, Some(input.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/auth/register", None, Some(input)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User Already Exists");
}

#[tokio::test]
async fn test_register_auto_creates_client_profile() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);
    let token = register_and_login(&app, "ana@example.com").await;

    let (status, body) = send(&app, "GET", "/clients", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let clients = body.as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["description"], "Test User (555-0100)");
    assert_eq!(clients[0]["user"]["email"], "ana@example.com");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);
    register_and_login(&app, "ana@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "ana@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_unknown_email_is_unauthorized() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_a_token() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);

    let (status, _) = send(&app, "GET", "/pets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/users", Some("not-a-real-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_grants_access() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);
    let token = register_and_login(&app, "ana@example.com").await;

    let (status, _) = send(&app, "GET", "/pets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}
