//! API error handling.
//!
//! Internal failures (database errors, hashing failures) are logged through
//! `tracing` and surfaced to clients as sanitized messages; client-input
//! failures carry their details in the response body. Query-translation
//! failures keep their structured `errorCode`/`errorMessage` shape so
//! callers can distinguish a bad filter from a bad order clause.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

use crate::auth::AuthError;
use crate::query::QueryError;

#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound {
        resource: String,
        id: Option<String>,
    },

    /// 400 Bad Request with a plain message
    BadRequest { message: String },

    /// 400 Bad Request from the query translator or filter gate; the
    /// structured code/message pair is included in the body
    Query(QueryError),

    /// 401 Unauthorized
    Unauthorized { message: String },

    /// 409 Conflict
    Conflict { message: String },

    /// 500 Internal Server Error from the database (details logged, not
    /// exposed)
    Database { message: String, internal: DbErr },

    /// 500 Internal Server Error, generic
    Internal {
        message: String,
        internal: Option<String>,
    },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Wraps a database error. The `DbErr` is logged but never sent to the
    /// client.
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    pub fn internal(message: impl Into<String>, internal: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::Query(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("{resource} with ID '{id}' not found"),
                None => format!("{resource} not found"),
            },
            Self::BadRequest { message }
            | Self::Unauthorized { message }
            | Self::Conflict { message }
            | Self::Database { message, .. }
            | Self::Internal { message, .. } => message.clone(),
            Self::Query(err) => err.message.clone(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            Self::Internal {
                internal: Some(details),
                ..
            } => {
                tracing::error!(details = %details, "Internal error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// Generic error body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Query-translation error body; both fields are part of the contract.
#[derive(Serialize)]
struct QueryErrorResponse {
    #[serde(rename = "errorCode")]
    error_code: &'static str,
    #[serde(rename = "errorMessage")]
    error_message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        match self {
            Self::Query(err) => (
                status,
                Json(QueryErrorResponse {
                    error_code: err.code.as_str(),
                    error_message: err.message,
                }),
            )
                .into_response(),
            _ => (
                status,
                Json(ErrorResponse {
                    error: self.user_message(),
                }),
            )
                .into_response(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::Query(err)
    }
}

/// `DbErr::RecordNotFound` becomes 404; everything else is a sanitized 500.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("Resource");
                Self::NotFound {
                    resource: resource.to_string(),
                    id: None,
                }
            }
            _ => Self::Database {
                message: "A database error occurred".to_string(),
                internal: err,
            },
        }
    }
}

/// Token problems are the client's; hashing problems are ours.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => Self::unauthorized("Token has expired"),
            AuthError::InvalidToken => Self::unauthorized("Invalid token"),
            AuthError::TokenCreationFailed | AuthError::HashingFailed => {
                Self::internal("Authentication failed", Some(err.to_string()))
            }
        }
    }
}
