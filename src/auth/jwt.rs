//! JSON Web Token creation and validation. Stateless: validation never
//! touches the database.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims carried by an access token. No secrets: only the user's identity
/// and the validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub email: String,
    /// Issued at (Unix epoch seconds).
    pub iat: i64,
    /// Expiration (Unix epoch seconds).
    pub exp: i64,
}

/// Signs an HS256 access token for the given user.
///
/// # Errors
///
/// Returns [`AuthError::TokenCreationFailed`] if signing fails.
pub fn create_access_token(
    secret: &str,
    user_id: i64,
    email: &str,
    expires_minutes: i64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(expires_minutes)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::TokenCreationFailed)
}

/// Validates an access token and returns its claims, distinguishing an
/// expired token from any other defect.
///
/// # Errors
///
/// Returns [`AuthError::TokenExpired`] or [`AuthError::InvalidToken`].
pub fn validate_access_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })
}
