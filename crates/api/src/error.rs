use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use squadgame_core::crown::CrownError;
use squadgame_core::error::CoreError;
use squadgame_core::headline::HeadlineError;
use squadgame_core::rivalry::RivalryError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for generic domain errors, the three crown-ledger
/// error enums for their distinct client-facing conditions, and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// `{error, code}` JSON error responses; every ledger condition keeps its
/// own `code` so the app can show a specific message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `squadgame_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A crown precondition failure (not found / not owner / expired).
    #[error(transparent)]
    Crown(#[from] CrownError),

    /// A headline content failure (empty / too long).
    #[error(transparent)]
    Headline(#[from] HeadlineError),

    /// A rivalry declaration failure (identical / declarer involved /
    /// non-member rival).
    #[error(transparent)]
    Rivalry(#[from] RivalryError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Crown ledger conditions, one code per variant ---
            AppError::Crown(crown) => {
                let (status, code) = match crown {
                    CrownError::NotFound => (StatusCode::NOT_FOUND, "CROWN_NOT_FOUND"),
                    CrownError::NotOwner => (StatusCode::FORBIDDEN, "NOT_CROWN_OWNER"),
                    CrownError::Expired => (StatusCode::GONE, "CROWN_EXPIRED"),
                };
                (status, code, crown.to_string())
            }
            AppError::Headline(headline) => {
                let code = match headline {
                    HeadlineError::Empty => "HEADLINE_EMPTY",
                    HeadlineError::TooLong { .. } => "HEADLINE_TOO_LONG",
                };
                (StatusCode::BAD_REQUEST, code, headline.to_string())
            }
            AppError::Rivalry(rivalry) => {
                let code = match rivalry {
                    RivalryError::IdenticalRivals => "RIVALS_IDENTICAL",
                    RivalryError::DeclarerAmongRivals => "DECLARER_AMONG_RIVALS",
                    RivalryError::NotSquadMember => "RIVAL_NOT_MEMBER",
                };
                (StatusCode::BAD_REQUEST, code, rivalry.to_string())
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
