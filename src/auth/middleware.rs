//! Bearer-token middleware. Register, login, and the health check stay
//! public; every resource route goes through [`require_auth`].

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use super::jwt;
use crate::errors::ApiError;
use crate::state::AppState;

/// Identity extracted from a validated token, available to handlers through
/// request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

/// Rejects the request with 401 unless it carries a valid
/// `Authorization: Bearer <token>` header.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] for a missing/malformed header or an
/// invalid/expired token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("invalid token or auth type"))?;

    let token = header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::unauthorized("invalid token or auth type"))?;

    let claims = jwt::validate_access_token(&state.config.secret_key, token)?;
    tracing::debug!(user = %claims.email, "token accepted");

    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(request).await)
}
