//! Shared application state passed to all handlers.

use std::sync::Arc;

use sqlx::PgPool;
use squadgame_notify::PushClient;

use crate::config::ServerConfig;

/// Application state shared across all request handlers and job engines.
///
/// Cheap to clone: the pool is internally reference-counted and the rest
/// is behind [`Arc`]s.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: PgPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Push gateway client for device notifications.
    pub push: Arc<PushClient>,
}
