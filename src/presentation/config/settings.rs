use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{SaturationPolicy, WorkerPoolConfig};
use crate::domain::JobTimings;
use crate::infrastructure::observability::TracingConfig;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub jobs: JobSettings,
    pub pool: PoolSettings,
    pub catalog: CatalogSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSettings {
    pub processing_delay_ms: u64,
    pub result_ttl_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolSettings {
    pub core_size: usize,
    pub max_size: usize,
    pub queue_capacity: usize,
    pub saturation: SaturationPolicySetting,
    pub block_timeout_ms: u64,
    pub drain_on_shutdown: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaturationPolicySetting {
    Reject,
    Block,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers built-in defaults, the optional `appsettings.{env}` file and
    /// `APP_`-prefixed variables (`APP_POOL__CORE_SIZE=8`), later winning.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("jobs.processing_delay_ms", 500_i64)?
            .set_default("jobs.result_ttl_ms", 300_000_i64)?
            .set_default("pool.core_size", 4_i64)?
            .set_default("pool.max_size", 8_i64)?
            .set_default("pool.queue_capacity", 64_i64)?
            .set_default("pool.saturation", "reject")?
            .set_default("pool.block_timeout_ms", 250_i64)?
            .set_default("pool.drain_on_shutdown", true)?
            .set_default("catalog.path", "data/catalog.json")?
            .set_default("logging.level", TracingConfig::DEFAULT_FILTER)?
            .set_default("logging.enable_json", false)
    }
}

impl JobSettings {
    pub fn timings(&self) -> JobTimings {
        JobTimings::new(
            Duration::from_millis(self.processing_delay_ms),
            Duration::from_millis(self.result_ttl_ms),
        )
    }
}

impl PoolSettings {
    pub fn worker_pool_config(&self) -> WorkerPoolConfig {
        let saturation = match self.saturation {
            SaturationPolicySetting::Reject => SaturationPolicy::Reject,
            SaturationPolicySetting::Block => SaturationPolicy::Block {
                timeout: Duration::from_millis(self.block_timeout_ms),
            },
        };
        WorkerPoolConfig {
            core_size: self.core_size,
            max_size: self.max_size,
            queue_capacity: self.queue_capacity,
            saturation,
            drain_on_shutdown: self.drain_on_shutdown,
        }
    }
}

impl LoggingSettings {
    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig {
            environment: environment.to_string(),
            default_filter: self.level.clone(),
            json_format: self.enable_json,
        }
    }
}
