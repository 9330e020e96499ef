//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;

/// Default MapLibre base style used when `MAP_STYLE_URL` is unset.
pub const DEFAULT_MAP_STYLE_URL: &str = "https://demotiles.maplibre.org/style.json";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections
    pub database_max_connections: u32,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Base style the map scenes are layered on
    pub map_style_url: String,
    /// Create the schema and seed data during startup
    pub seed_on_start: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            database_url: env::var("DATABASE_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            map_style_url: env::var("MAP_STYLE_URL")
                .unwrap_or_else(|_| DEFAULT_MAP_STYLE_URL.to_string()),
            seed_on_start: parse_var("SEED_ON_START", false)?,
        })
    }

    /// Config for tests: in-memory database, default ports.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            database_url: None,
            database_max_connections: 1,
            frontend_url: "http://localhost:3000".to_string(),
            map_style_url: DEFAULT_MAP_STYLE_URL.to_string(),
            seed_on_start: true,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
