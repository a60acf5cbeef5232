use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the two secrets have sensible defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Shared secret the external cron scheduler presents as a bearer token
    /// on the root-level trigger endpoints.
    pub cron_secret: String,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// Push gateway URL for device notifications (Expo-compatible).
    pub push_gateway_url: String,
    /// Whether the in-process background driver runs the job engines.
    /// Off by default: production cadence comes from the external cron.
    pub scheduler_enabled: bool,
    /// Background driver tick interval in seconds (default: `60`).
    pub scheduler_tick_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                 |
    /// | `PORT`                 | `3000`                                    |
    /// | `CORS_ORIGINS`         | `http://localhost:8081`                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                      |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                                      |
    /// | `CRON_SECRET`          | *(required)*                              |
    /// | `PUSH_GATEWAY_URL`     | `https://exp.host/--/api/v2/push/send`    |
    /// | `SCHEDULER_ENABLED`    | `false`                                   |
    /// | `SCHEDULER_TICK_SECS`  | `60`                                      |
    ///
    /// # Panics
    ///
    /// Panics when `CRON_SECRET` (or the JWT secret, see
    /// [`JwtConfig::from_env`]) is missing, or when a numeric variable fails
    /// to parse. Misconfiguration should fail fast at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8081".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let cron_secret = std::env::var("CRON_SECRET").expect("CRON_SECRET must be set");

        let jwt = JwtConfig::from_env();

        let push_gateway_url = std::env::var("PUSH_GATEWAY_URL")
            .unwrap_or_else(|_| "https://exp.host/--/api/v2/push/send".into());

        let scheduler_enabled = std::env::var("SCHEDULER_ENABLED")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let scheduler_tick_secs: u64 = std::env::var("SCHEDULER_TICK_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("SCHEDULER_TICK_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            cron_secret,
            jwt,
            push_gateway_url,
            scheduler_enabled,
            scheduler_tick_secs,
        }
    }
}
