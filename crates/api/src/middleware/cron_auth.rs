//! Authorization gate for the root-level cron trigger endpoints.
//!
//! The external cron scheduler authenticates with a shared bearer secret;
//! operational tooling may instead present a JWT carrying the `service` role.
//! Rejections are a bare `401 Unauthorized` with a plain-text body -- the
//! scheduler only checks the status code, and the contract predates the
//! `{error, code}` JSON convention of the `/api/v1` surface.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::auth::jwt::{validate_token, SERVICE_ROLE};
use crate::state::AppState;

/// Proof that the request came from the cron scheduler or a service account.
///
/// ```ignore
/// async fn trigger(_cron: CronAuth, State(state): State<AppState>) -> ... {
///     // only reachable with a valid CRON_SECRET or service JWT
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CronAuth;

/// Plain-text `401 Unauthorized` rejection.
#[derive(Debug)]
pub struct CronAuthRejection;

impl IntoResponse for CronAuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = CronAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(CronAuthRejection)?;

        if token == state.config.cron_secret {
            return Ok(CronAuth);
        }

        // Fall back to a service-role JWT so operators can trigger jobs
        // without handling the raw cron secret.
        match validate_token(token, &state.config.jwt) {
            Ok(claims) if claims.role == SERVICE_ROLE => Ok(CronAuth),
            _ => Err(CronAuthRejection),
        }
    }
}
