//! Service configuration
//!
//! Layered: built-in defaults, then an optional file named by `PD_CONFIG`,
//! then `PD_`-prefixed environment variables with `__` between sections
//! (e.g. `PD_SERVER__BIND_ADDR=127.0.0.1:9000`,
//! `PD_ENGINE__FUSION__HFCT=0.6`).

use config::{Config, ConfigError, Environment, File};
use pd_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable naming an optional configuration file
pub const CONFIG_PATH_VAR: &str = "PD_CONFIG";

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Largest accepted image upload
    pub max_image_bytes: usize,
    /// Emit logs as JSON lines
    pub json_logs: bool,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            max_image_bytes: 10 * 1024 * 1024,
            json_logs: false,
            log_level: "info".to_string(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load from `PD_CONFIG` (if set) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).ok();
        Self::from_sources(path.as_deref(), Environment::with_prefix("PD"))
    }

    pub fn from_sources(path: Option<&str>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            info!("Loading configuration from {}", path);
            builder = builder.add_source(File::with_name(path));
        }
        builder
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
