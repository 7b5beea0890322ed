//! Service Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `healthpredict.toml` (or an explicit file), then `HEALTHPREDICT__*`
//! environment variables, e.g. `HEALTHPREDICT__SERVER__BIND_ADDR`.

use data_validator::ValidationConfig;
use inference_engine::ModelPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::rate_limit::RateLimitConfig;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "healthpredict";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "HEALTHPREDICT";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Decorative asset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Animation JSON fetched once at startup; `None` skips the fetch
    pub animation_url: Option<String>,
    /// Fetch timeout (ms)
    pub timeout_ms: u64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            animation_url: Some(
                "https://assets5.lottiefiles.com/packages/lf20_5njp3v83.json".to_string(),
            ),
            timeout_ms: 3000,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Full service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelPaths,
    pub validation: ValidationConfig,
    pub assets: AssetConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, a file and the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }
}
