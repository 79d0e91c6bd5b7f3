//! Server configuration loaded from environment variables.

/// Server configuration.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
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
    /// Base URL of the training executor service.
    pub executor_url: String,
    /// Upper bound in seconds on one dispatch hand-off round trip
    /// (default: `5`). Training takes minutes; delivery must not.
    pub dispatch_timeout_secs: u64,
    /// Public base URL of this server, used to build the result
    /// callback handed to the executor.
    pub callback_base_url: String,
    /// Base directory of the local artifact store.
    pub artifact_dir: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `EXECUTOR_URL`           | `http://localhost:8500`    |
    /// | `DISPATCH_TIMEOUT_SECS`  | `5`                        |
    /// | `CALLBACK_BASE_URL`      | `http://localhost:3000`    |
    /// | `ARTIFACT_DIR`           | `./artifacts`              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let executor_url =
            std::env::var("EXECUTOR_URL").unwrap_or_else(|_| "http://localhost:8500".into());

        let dispatch_timeout_secs: u64 = std::env::var("DISPATCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DISPATCH_TIMEOUT_SECS must be a valid u64");

        let callback_base_url =
            std::env::var("CALLBACK_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let artifact_dir =
            std::env::var("ARTIFACT_DIR").unwrap_or_else(|_| "./artifacts".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            executor_url,
            dispatch_timeout_secs,
            callback_base_url,
            artifact_dir,
        }
    }
}
