use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub services: ServicesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Freshness window for cached report payloads, in seconds.
    pub report_cache_ttl_secs: u64,
}

/// External service integration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Abstract API key for phone validation. Absent key means the local
    /// pattern check is used directly.
    pub phone_validation_api_key: Option<String>,
    pub phone_validation_base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                report_cache_ttl_secs: env::var("REPORT_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid REPORT_CACHE_TTL_SECS".to_string())
                    })?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            services: ServicesConfig {
                phone_validation_api_key: env::var("PHONE_VALIDATION_API_KEY").ok(),
                phone_validation_base_url: env::var("PHONE_VALIDATION_BASE_URL")
                    .unwrap_or_else(|_| "https://phonevalidation.abstractapi.com/v1/".to_string()),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.report_cache_ttl_secs == 0 {
            return Err(AppError::Configuration(
                "Report cache TTL must be greater than 0".to_string(),
            ));
        }

        if self.database.pool_size > self.database.max_connections {
            return Err(AppError::Configuration(
                "DATABASE_POOL_SIZE cannot exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(())
    }
}
