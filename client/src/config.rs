//! Configuration management for the admin client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CCA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// API server configuration
    pub server: ServerConfig,

    /// Session and token-renewal configuration
    pub session: SessionConfig,

    /// Locale passed to the discovery service for reference codes
    pub locale: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Base URL of the API server; the `/auth`, `/discovery`, `/storage`
    /// and `/status` endpoints all hang off this root
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Seconds between token renewals
    pub renew_interval_secs: u64,

    /// Renewal attempts before the session is abandoned
    pub max_renew_attempts: u32,

    /// Base delay in seconds for the linear renewal backoff
    pub renew_backoff_secs: u64,

    /// File the bearer token is persisted to between runs
    pub token_path: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = std::env::var("CCA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("server.timeout_secs", 30)?
            .set_default("session.renew_interval_secs", 600)?
            .set_default("session.max_renew_attempts", 5)?
            .set_default("session.renew_backoff_secs", 3)?
            .set_default("session.token_path", ".cca-token")?
            .set_default("locale", "en")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CCA_ prefix)
            .add_source(
                Environment::with_prefix("CCA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            renew_interval_secs: 600,
            max_renew_attempts: 5,
            renew_backoff_secs: 3,
            token_path: ".cca-token".to_string(),
        }
    }
}
