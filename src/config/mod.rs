//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `CASTCARD` prefix and
//! `__` between nested keys. Every section has defaults except the OpenAI
//! API key.
//!
//! # Example
//!
//! ```no_run
//! use castcard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod generation;
mod runtime;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use generation::GenerationConfig;
pub use runtime::{LogFormat, RuntimeConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present
    /// 2. Reads variables with the `CASTCARD` prefix
    /// 3. Splits nested keys on `__`
    ///
    /// - `CASTCARD__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key`
    /// - `CASTCARD__GENERATION__MAX_ATTEMPTS=4` -> `generation.max_attempts`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CASTCARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.runtime.validate()?;
        self.ai.validate()?;
        self.generation.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
