//! HTTP surface: one module per resource plus router assembly.
//!
//! Handlers translate between HTTP and the data layer and never leak entity
//! models: every response body is a DTO defined next to its handlers.

pub mod clients;
pub mod fosters;
pub mod params;
pub mod pets;
pub mod users;

use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::auth::require_auth;
use crate::errors::ApiError;
use crate::query::{QueryDescriptor, QueryError, parse_query_string, validate_filters};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        pets::create_pet,
        pets::list_pets,
        pets::get_pet,
        pets::update_pet,
        pets::delete_pet,
        clients::create_client,
        clients::list_clients,
        clients::get_client,
        clients::update_client,
        clients::delete_client,
        fosters::create_foster,
        fosters::list_fosters,
        fosters::get_foster,
        fosters::update_foster,
        fosters::delete_foster,
    ),
    components(schemas(
        users::UserResponse,
        users::RegisterUser,
        users::LoginUser,
        users::LoginResponse,
        users::UpdateUser,
        pets::PetResponse,
        pets::CreatePet,
        pets::UpdatePet,
        clients::ClientResponse,
        clients::CreateClient,
        clients::UpdateClient,
        fosters::FosterResponse,
        fosters::CreateFoster,
        fosters::UpdateFoster,
    )),
    tags((name = "pawhaven", description = "Pet adoption and fostering API"))
)]
struct ApiDoc;

/// Assembles the application router. Register, login, the health check, and
/// the OpenAPI document are public; every resource route requires a bearer
/// token.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(users::router())
        .merge(pets::router())
        .merge(clients::router())
        .merge(fosters::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(health))
        .route("/auth/register", post(users::register))
        .route("/auth/login", post(users::login))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "Response: OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Shared front half of every collection handler: translate the raw query
/// string, then check the resulting filters against the resource's
/// whitelist.
pub(crate) fn parse_and_authorize(
    state: &AppState,
    resource: &str,
    raw_query: Option<&str>,
) -> Result<QueryDescriptor, ApiError> {
    let descriptor = parse_query_string(raw_query.unwrap_or_default())?;
    let allowed = state
        .filter_fields
        .allowed_fields(resource)
        .ok_or_else(|| {
            ApiError::internal(format!("filter whitelist missing for {resource}"), None)
        })?;
    if !validate_filters(&descriptor, allowed) {
        return Err(QueryError::filter_field_not_allowed().into());
    }
    Ok(descriptor)
}
