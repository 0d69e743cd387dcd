//! Client profiles. A client is the adopting/fostering party, optionally
//! linked to an account; responses embed the linked user's public view.

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, IntoActiveModel,
    LoaderTrait, ModelTrait,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::params::ListParams;
use super::users::UserResponse;
use crate::entities::{clients, users};
use crate::errors::ApiError;
use crate::query::apply_query;
use crate::state::AppState;

pub const RESOURCE: &str = "clients";

/// Filterable fields: the public DTO attributes, with the embedded user
/// represented by its foreign-key column.
pub const FILTER_FIELDS: &[&str] = &["id", "user_id", "description"];

const SEARCH_COLUMNS: &[&str] = &["user_id", "description"];

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/{client_id}",
            get(get_client).patch(update_client).delete(delete_client),
        )
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClientResponse {
    pub id: i64,
    pub user: Option<UserResponse>,
    pub description: Option<String>,
}

impl ClientResponse {
    fn from_parts(client: clients::Model, user: Option<users::Model>) -> Self {
        Self {
            id: client.id,
            user: user.map(UserResponse::from),
            description: client.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClient {
    pub user_id: Option<i64>,
    pub description: Option<String>,
}

/// Partial update; `null` clears a nullable field, an omitted field is left
/// untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateClient {
    #[serde(default, with = "serde_with::rust::double_option")]
    pub user_id: Option<Option<i64>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

#[utoipa::path(
    post,
    path = "/clients",
    request_body = CreateClient,
    responses((status = 200, description = "Client created", body = ClientResponse))
)]
pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = clients::ActiveModel {
        user_id: Set(input.user_id),
        description: Set(input.description),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(ApiError::database)?;

    let user = client
        .find_related(users::Entity)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?;
    Ok(Json(ClientResponse::from_parts(client, user)))
}

#[utoipa::path(
    get,
    path = "/clients",
    params(ListParams),
    responses(
        (status = 200, description = "Matching clients", body = [ClientResponse]),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn list_clients(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<ClientResponse>>, ApiError> {
    let descriptor = super::parse_and_authorize(&state, RESOURCE, query.as_deref())?;
    let rows = apply_query(
        clients::Entity::find(),
        &descriptor,
        state.db.get_database_backend(),
        SEARCH_COLUMNS,
    )
    .all(&state.db)
    .await
    .map_err(ApiError::database)?;

    let related_users = rows
        .load_one(users::Entity, &state.db)
        .await
        .map_err(ApiError::database)?;
    let body = rows
        .into_iter()
        .zip(related_users)
        .map(|(client, user)| ClientResponse::from_parts(client, user))
        .collect();
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/clients/{client_id}",
    params(("client_id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client found", body = ClientResponse),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = clients::Entity::find_by_id(client_id)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Client", Some(client_id.to_string())))?;

    let user = client
        .find_related(users::Entity)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?;
    Ok(Json(ClientResponse::from_parts(client, user)))
}

#[utoipa::path(
    patch,
    path = "/clients/{client_id}",
    params(("client_id" = i64, Path, description = "Client ID")),
    request_body = UpdateClient,
    responses(
        (status = 200, description = "Client updated", body = ClientResponse),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<i64>,
    Json(input): Json<UpdateClient>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = clients::Entity::find_by_id(client_id)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Client", Some(client_id.to_string())))?;

    let mut active = client.into_active_model();
    if let Some(user_id) = input.user_id {
        active.user_id = Set(user_id);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }

    let updated = active.update(&state.db).await.map_err(ApiError::database)?;
    let user = updated
        .find_related(users::Entity)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?;
    Ok(Json(ClientResponse::from_parts(updated, user)))
}

#[utoipa::path(
    delete,
    path = "/clients/{client_id}",
    params(("client_id" = i64, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let result = clients::Entity::delete_by_id(client_id)
        .exec(&state.db)
        .await
        .map_err(ApiError::database)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Client", Some(client_id.to_string())));
    }
    Ok(StatusCode::NO_CONTENT)
}
