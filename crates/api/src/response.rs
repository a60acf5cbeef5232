//! Shared response envelope types for API handlers.
//!
//! All `/api/v1` responses use a `{ "data": ... }` envelope per project
//! conventions. Use [`DataResponse`] instead of ad-hoc
//! `serde_json::json!({ "data": ... })` to get compile-time type safety and
//! consistent serialization. The root-level cron trigger endpoints use their
//! own [`crate::handlers::jobs::JobResponse`] shape instead; the mobile
//! app's cron scheduler predates the envelope convention.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
