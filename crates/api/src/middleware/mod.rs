//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`cron_auth::CronAuth`] -- Gate for the root-level cron trigger endpoints.

pub mod auth;
pub mod cron_auth;
