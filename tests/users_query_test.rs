use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{register_and_login, send, setup_test_app, setup_test_db};

async fn seed_users(app: &axum::Router) -> String {
    let token = register_and_login(app, "ana@example.com").await;
    for (email, name) in [
        ("bo@example.com", "Bo"),
        ("cleo@example.com", "Cleo"),
        ("dan@example.com", "Dan"),
    ] {
        let (status, _) = send(
            app,
            "POST",
            "/auth/register",
            None,
            Some(json!({"email": email, "password": "hunter2", "name": name})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    token
}

#[tokio::test]
async fn test_list_users_never_exposes_password() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);
    let token = seed_users(&app).await;

    let (status, body) = send(&app, "GET", "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    for user in body.as_array().unwrap() {
        assert!(user.get("password").is_none(), "password leaked: {user}");
    }
}

#[tokio::test]
async fn test_filter_users_by_email() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);
    let token = seed_users(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        "/users?email=cleo@example.com",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Cleo");
}

#[tokio::test]
async fn test_filtering_on_password_is_rejected() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);
    let token = seed_users(&app).await;

    let (status, body) = send(&app, "GET", "/users?password=x", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "InvalidFilterField");
}

#[tokio::test]
async fn test_order_users_by_name_descending() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);
    let token = seed_users(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        "/users?order=name__desc&name__in=Bo,Cleo,Dan",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Dan", "Cleo", "Bo"]);
}

#[tokio::test]
async fn test_get_update_delete_user() {
    let db = setup_test_db().await.expect("failed to set up database");
    let app = setup_test_app(db);
    let token = seed_users(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        "/users?email=dan@example.com",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let dan_id = body.as_array().unwrap()[0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/users/{dan_id}"),
        Some(&token),
        Some(json!({"address": "9 Kibble Lane", "phone": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "9 Kibble Lane");
    assert_eq!(body["phone"], serde_json::Value::Null);
    assert_eq!(body["name"], "Dan");

    // The auto-created client profile references the user; remove it first.
    let (status, body) = send(
        &app,
        "GET",
        &format!("/clients?user_id={dan_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let client_id = body.as_array().unwrap()[0]["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/clients/{client_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/users/{dan_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/users/{dan_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
