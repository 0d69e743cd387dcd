//! Foster arrangements: a pet placed with a user for a period. Responses
//! embed the public views of the related user and pet.

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, IntoActiveModel,
    LoaderTrait, ModelTrait,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::params::ListParams;
use super::pets::PetResponse;
use super::users::UserResponse;
use crate::entities::{fosters, pets, users};
use crate::errors::ApiError;
use crate::query::apply_query;
use crate::state::AppState;

pub const RESOURCE: &str = "fosters";

/// Filterable fields: the public DTO attributes, with the embedded user and
/// pet represented by their foreign-key columns.
pub const FILTER_FIELDS: &[&str] = &[
    "id",
    "user_id",
    "pet_id",
    "description",
    "start_date",
    "end_date",
];

const SEARCH_COLUMNS: &[&str] = &["description"];

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/foster", get(list_fosters).post(create_foster))
        .route(
            "/foster/{foster_id}",
            get(get_foster).patch(update_foster).delete(delete_foster),
        )
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FosterResponse {
    pub id: i64,
    pub user: Option<UserResponse>,
    pub description: Option<String>,
    pub pet: Option<PetResponse>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl FosterResponse {
    fn from_parts(
        foster: fosters::Model,
        user: Option<users::Model>,
        pet: Option<pets::Model>,
    ) -> Self {
        Self {
            id: foster.id,
            user: user.map(UserResponse::from),
            description: foster.description,
            pet: pet.map(PetResponse::from),
            start_date: foster.start_date,
            end_date: foster.end_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFoster {
    pub pet_id: i64,
    pub start_date: NaiveDate,
}

/// Partial update; `null` clears a nullable field, an omitted field is left
/// untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFoster {
    #[serde(default, with = "serde_with::rust::double_option")]
    pub user_id: Option<Option<i64>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub pet_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub end_date: Option<Option<NaiveDate>>,
}

#[utoipa::path(
    post,
    path = "/foster",
    request_body = CreateFoster,
    responses((status = 200, description = "Foster record created", body = FosterResponse))
)]
pub async fn create_foster(
    State(state): State<AppState>,
    Json(input): Json<CreateFoster>,
) -> Result<Json<FosterResponse>, ApiError> {
    let foster = fosters::ActiveModel {
        pet_id: Set(input.pet_id),
        start_date: Set(input.start_date),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(ApiError::database)?;

    let pet = foster
        .find_related(pets::Entity)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?;
    Ok(Json(FosterResponse::from_parts(foster, None, pet)))
}

#[utoipa::path(
    get,
    path = "/foster",
    params(ListParams),
    responses(
        (status = 200, description = "Matching foster records", body = [FosterResponse]),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn list_fosters(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<FosterResponse>>, ApiError> {
    let descriptor = super::parse_and_authorize(&state, RESOURCE, query.as_deref())?;
    let rows = apply_query(
        fosters::Entity::find(),
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
    let related_pets = rows
        .load_one(pets::Entity, &state.db)
        .await
        .map_err(ApiError::database)?;
    let body = rows
        .into_iter()
        .zip(related_users)
        .zip(related_pets)
        .map(|((foster, user), pet)| FosterResponse::from_parts(foster, user, pet))
        .collect();
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/foster/{foster_id}",
    params(("foster_id" = i64, Path, description = "Foster record ID")),
    responses(
        (status = 200, description = "Foster record found", body = FosterResponse),
        (status = 404, description = "Foster record not found")
    )
)]
pub async fn get_foster(
    State(state): State<AppState>,
    Path(foster_id): Path<i64>,
) -> Result<Json<FosterResponse>, ApiError> {
    let foster = fosters::Entity::find_by_id(foster_id)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Foster", Some(foster_id.to_string())))?;

    let user = foster
        .find_related(users::Entity)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?;
    let pet = foster
        .find_related(pets::Entity)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?;
    Ok(Json(FosterResponse::from_parts(foster, user, pet)))
}

#[utoipa::path(
    patch,
    path = "/foster/{foster_id}",
    params(("foster_id" = i64, Path, description = "Foster record ID")),
    request_body = UpdateFoster,
    responses(
        (status = 200, description = "Foster record updated", body = FosterResponse),
        (status = 404, description = "Foster record not found")
    )
)]
pub async fn update_foster(
    State(state): State<AppState>,
    Path(foster_id): Path<i64>,
    Json(input): Json<UpdateFoster>,
) -> Result<Json<FosterResponse>, ApiError> {
    let foster = fosters::Entity::find_by_id(foster_id)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Foster", Some(foster_id.to_string())))?;

    let mut active = foster.into_active_model();
    if let Some(user_id) = input.user_id {
        active.user_id = Set(user_id);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(pet_id) = input.pet_id {
        active.pet_id = Set(pet_id);
    }
    if let Some(start_date) = input.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = input.end_date {
        active.end_date = Set(end_date);
    }

    let updated = active.update(&state.db).await.map_err(ApiError::database)?;
    let user = updated
        .find_related(users::Entity)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?;
    let pet = updated
        .find_related(pets::Entity)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?;
    Ok(Json(FosterResponse::from_parts(updated, user, pet)))
}

#[utoipa::path(
    delete,
    path = "/foster/{foster_id}",
    params(("foster_id" = i64, Path, description = "Foster record ID")),
    responses(
        (status = 204, description = "Foster record deleted"),
        (status = 404, description = "Foster record not found")
    )
)]
pub async fn delete_foster(
    State(state): State<AppState>,
    Path(foster_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let result = fosters::Entity::delete_by_id(foster_id)
        .exec(&state.db)
        .await
        .map_err(ApiError::database)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Foster", Some(foster_id.to_string())));
    }
    Ok(StatusCode::NO_CONTENT)
}
