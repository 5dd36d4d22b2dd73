//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `PIM_PUBLISHING` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use pim_publishing::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod export;
mod logging;
mod pdf;
mod thumbnail;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use logging::LoggingConfig;
pub use pdf::PdfConfig;
pub use thumbnail::ThumbnailConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PIM database (catalog definitions)
    pub database: DatabaseConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub pdf: PdfConfig,

    #[serde(default)]
    pub thumbnails: ThumbnailConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PIM_PUBLISHING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `PIM_PUBLISHING__DATABASE__URL=...` -> `database.url = ...`
    /// - `PIM_PUBLISHING__PDF__TIMEOUT_SECS=60` -> `pdf.timeout_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PIM_PUBLISHING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.export.validate()?;
        self.pdf.validate()?;
        self.thumbnails.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
