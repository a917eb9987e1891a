use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Catalog error type, mapped onto the HTTP surface at the request boundary.
///
/// Envelope convention: `{"error": ...}` for not-found and internal faults,
/// `{"errors": ...}` for validation and constraint failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Lookup miss for the given entity.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Field-level validation failure; nothing was written.
    #[error("{message}")]
    Validation { message: String },

    /// Store-level constraint violation (foreign key to a missing parent).
    #[error("{message}")]
    Constraint { message: String },

    /// Unexpected storage fault.
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, message) = &err {
            if code.code == rusqlite::ErrorCode::ConstraintViolation {
                return Self::Constraint {
                    message: message.clone().unwrap_or_else(|| code.to_string()),
                };
            }
        }
        Self::Database(err)
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound(entity) => {
                (StatusCode::NOT_FOUND, json!({ "error": format!("{entity} not found") }))
            }
            Self::Validation { message } | Self::Constraint { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "errors": message }))
            }
            Self::Database(source) => {
                tracing::error!(error = %source, "Catalog storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "internal server error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}
