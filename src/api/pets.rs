//! Pet management.

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, IntoActiveModel,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::params::ListParams;
use crate::entities::pets;
use crate::errors::ApiError;
use crate::query::apply_query;
use crate::state::AppState;

pub const RESOURCE: &str = "pets";

/// Filterable fields: the public DTO attributes.
pub const FILTER_FIELDS: &[&str] = &["id", "name", "species", "gender", "age", "description"];

const SEARCH_COLUMNS: &[&str] = &["name", "species", "gender", "age", "description"];

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/pets", get(list_pets).post(create_pet))
        .route(
            "/pets/{pet_id}",
            get(get_pet).patch(update_pet).delete(delete_pet),
        )
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PetResponse {
    pub id: i64,
    pub name: String,
    pub species: Option<String>,
    pub gender: Option<String>,
    pub age: Option<f32>,
    pub description: Option<String>,
}

impl From<pets::Model> for PetResponse {
    fn from(model: pets::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            species: model.species,
            gender: model.gender,
            age: model.age,
            description: model.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePet {
    pub name: String,
    pub species: Option<String>,
    pub gender: Option<String>,
    pub age: Option<f32>,
    pub description: Option<String>,
}

/// Partial update; `null` clears a nullable field, an omitted field is left
/// untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePet {
    pub name: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub species: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub gender: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub age: Option<Option<f32>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

#[utoipa::path(
    post,
    path = "/pets",
    request_body = CreatePet,
    responses((status = 200, description = "Pet created", body = PetResponse))
)]
pub async fn create_pet(
    State(state): State<AppState>,
    Json(input): Json<CreatePet>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = pets::ActiveModel {
        name: Set(input.name),
        species: Set(input.species),
        gender: Set(input.gender),
        age: Set(input.age),
        description: Set(input.description),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(ApiError::database)?;
    Ok(Json(PetResponse::from(pet)))
}

#[utoipa::path(
    get,
    path = "/pets",
    params(ListParams),
    responses(
        (status = 200, description = "Matching pets", body = [PetResponse]),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn list_pets(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<PetResponse>>, ApiError> {
    let descriptor = super::parse_and_authorize(&state, RESOURCE, query.as_deref())?;
    let rows = apply_query(
        pets::Entity::find(),
        &descriptor,
        state.db.get_database_backend(),
        SEARCH_COLUMNS,
    )
    .all(&state.db)
    .await
    .map_err(ApiError::database)?;
    Ok(Json(rows.into_iter().map(PetResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/pets/{pet_id}",
    params(("pet_id" = i64, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet found", body = PetResponse),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<i64>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = pets::Entity::find_by_id(pet_id)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Pet", Some(pet_id.to_string())))?;
    Ok(Json(PetResponse::from(pet)))
}

#[utoipa::path(
    patch,
    path = "/pets/{pet_id}",
    params(("pet_id" = i64, Path, description = "Pet ID")),
    request_body = UpdatePet,
    responses(
        (status = 200, description = "Pet updated", body = PetResponse),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn update_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<i64>,
    Json(input): Json<UpdatePet>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = pets::Entity::find_by_id(pet_id)
        .one(&state.db)
        .await
        .map_err(ApiError::database)?
        .ok_or_else(|| ApiError::not_found("Pet", Some(pet_id.to_string())))?;

    let mut active = pet.into_active_model();
    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(species) = input.species {
        active.species = Set(species);
    }
    if let Some(gender) = input.gender {
        active.gender = Set(gender);
    }
    if let Some(age) = input.age {
        active.age = Set(age);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }

    let updated = active.update(&state.db).await.map_err(ApiError::database)?;
    Ok(Json(PetResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/pets/{pet_id}",
    params(("pet_id" = i64, Path, description = "Pet ID")),
    responses(
        (status = 204, description = "Pet deleted"),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let result = pets::Entity::delete_by_id(pet_id)
        .exec(&state.db)
        .await
        .map_err(ApiError::database)?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Pet", Some(pet_id.to_string())));
    }
    Ok(StatusCode::NO_CONTENT)
}
