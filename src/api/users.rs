//! Account registration, login, and user administration.

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::params::ListParams;
use crate::auth::{self, ACCESS_TOKEN_EXPIRES_MINUTES};
use crate::entities::{clients, users};
use crate::errors::ApiError;
use crate::query::apply_query;
use crate::state::AppState;

pub const RESOURCE: &str = "users";

/// Filterable fields: the public DTO attributes. `password` and the search
/// index column are deliberately absent.
pub const FILTER_FIELDS: &[&str] = &["id", "email", "name", "address", "phone"];

/// Text columns backing the non-Postgres search fallback.
const SEARCH_COLUMNS: &[&str] = &["email", "name", "address", "phone"];

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// Public view of an account. Never includes the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<users::Model> for UserResponse {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            address: model.address,
            phone: model.phone,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[serde(rename = "loginToken")]
    pub login_token: String,
}

/// Partial update; `null` clears a nullable field, an omitted field is left
/// untouched. Passwords are not updatable through this endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub email: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
}

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterUser,
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUser>,
) -> Result<Json<UserResponse>, ApiError> {
    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(input.email.clone()))
        .one(&state.db)
        .await
        .map_err(ApiError::database)?;
    if existing.is_some() {
        return Err(ApiError::conflict("User Already Exists"));
    }

    let password_hash = auth::hash_password(&input.password)?;
    let user = users::ActiveModel {
        email: Set(input.email),
        password: Set(password_hash),
        name: Set(input.name),
        address: Set(input.address),
        phone: Set(input.phone),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(ApiError::database)?;

    // Every account gets a client profile.
    let description = format!(
        "{} ({})",
        user.name.as_deref().unwrap_or(""),
        user.phone.as_deref().unwrap_or("")
    );
    let client = clients::ActiveModel {
        user_id: Set(Some(user.id)),
        description: Set(Some(description)),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(ApiError::database)?;
    tracing::info!(
        user_id = user.id,
        client_id = client.id,
        "created client profile for new user"
    );

    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginUser>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(input.email.clone()))
        .one(&state.db)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !auth::verify_password(&input.password, &user.password) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = auth::create_access_token(
        &state.config.secret_key,
        user.id,
        &user.email,
        ACCESS_TOKEN_EXPIRES_MINUTES,
    )?;
    Ok(Json(LoginResponse { login_token: token }))
}

#[utoipa::path(
    get,
    path = "/users",
    params(ListParams),
    responses(
        (status = 200, description = "Matching users", body = [UserResponse]),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let descriptor = super::parse_and_authorize(&state, RESOURCE, query.as_deref())?;
    let rows = apply_query(
        users::Entity::find(),
        &descriptor,
        state.db.get_database_backend(),
        SEARCH_COLUMNS,
    )
    .all(&state.db)
    .await
    .map_err(ApiError::database)?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = users::Entity::find_by_id(user_id)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("User", Some(user_id.to_string())))?;
    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    patch,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = users::Entity::find_by_id(user_id)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("User", Some(user_id.to_string())))?;

    let mut active = user.into_active_model();
    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(address) = input.address {
        active.address = Set(address);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(phone);
    }

    let updated = active.update(&state.db).await.map_err(ApiError::database)?;
    Ok(Json(UserResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let result = users::Entity::delete_by_id(user_id)
        .exec(&state.db)
        .await
        .map_err(ApiError::database)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("User", Some(user_id.to_string())));
    }
    Ok(StatusCode::NO_CONTENT)
}
