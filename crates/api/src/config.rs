/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8888`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Identity provider endpoint configuration.
    pub identity: IdentityConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8888`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8888".into())
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

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let identity = IdentityConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            identity,
        }
    }
}

/// Configuration for the external identity provider client.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the provider's REST API.
    pub base_url: String,
    /// Optional API key, sent as an `x-api-key` header on every call.
    pub api_key: Option<String>,
    /// Client-side timeout for provider calls in seconds (default: `10`).
    pub timeout_secs: u64,
}

impl IdentityConfig {
    /// Load identity provider configuration from environment variables.
    ///
    /// | Env Var                          | Required | Default |
    /// |----------------------------------|----------|---------|
    /// | `IDENTITY_PROVIDER_URL`          | **yes**  | --      |
    /// | `IDENTITY_PROVIDER_API_KEY`      | no       | unset   |
    /// | `IDENTITY_PROVIDER_TIMEOUT_SECS` | no       | `10`    |
    ///
    /// # Panics
    ///
    /// Panics if `IDENTITY_PROVIDER_URL` is not set or is empty.
    pub fn from_env() -> Self {
        let base_url = std::env::var("IDENTITY_PROVIDER_URL")
            .expect("IDENTITY_PROVIDER_URL must be set in the environment");
        assert!(!base_url.is_empty(), "IDENTITY_PROVIDER_URL must not be empty");

        let api_key = std::env::var("IDENTITY_PROVIDER_API_KEY").ok();

        let timeout_secs: u64 = std::env::var("IDENTITY_PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("IDENTITY_PROVIDER_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            timeout_secs,
        }
    }
}
