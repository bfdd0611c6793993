use std::env;
use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use enocean_api::DEFAULT_POWER_THRESHOLD_WATTS;
use enocean_api::transport::ESP3_BAUD_RATE;

use crate::configs::switch::SwitchConfig;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gateway {
    pub port_path: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    pub channel_capacity: usize,
}

fn default_baud_rate() -> u32 {
    ESP3_BAUD_RATE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Power {
    pub threshold_watts: f64,
}

impl Default for Power {
    fn default() -> Self {
        Self {
            threshold_watts: DEFAULT_POWER_THRESHOLD_WATTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub gateway: Gateway,
    pub registry: Registry,
    #[serde(default)]
    pub power: Power,
    #[serde(default)]
    pub switches: Vec<SwitchConfig>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir("configs")
    }

    /// Loads `default` and the optional `RUN_MODE` file from `dir`, then
    /// applies `ENOCEAN_` environment overrides, e.g.
    /// `ENOCEAN_GATEWAY__PORT_PATH` for `gateway.port_path`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let settings: Settings = Config::builder()
            .add_source(File::from(dir.join("default")))
            .add_source(File::from(dir.join(&run_mode)).required(false))
            .add_source(
                Environment::with_prefix("ENOCEAN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.power.threshold_watts.is_finite() || self.power.threshold_watts < 0.0 {
            return Err(ConfigError::InvalidPowerThreshold(self.power.threshold_watts));
        }
        if self.gateway.channel_capacity == 0 {
            return Err(ConfigError::InvalidChannelCapacity(self.gateway.channel_capacity));
        }
        Ok(())
    }
}
