use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

use crate::location::{Location, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::target::DEBUG_WAIT;
use crate::twilight::TwilightAltitude;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse Error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation Error: {0}")]
    Validation(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub location: LocationConfig,
    pub twilight: TwilightConfig,
    pub wait: WaitConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TwilightPreset {
    #[default]
    Daylight,
    Civil,
    Nautical,
    Astronomical,
    Custom,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TwilightConfig {
    #[serde(default)]
    pub preset: TwilightPreset,
    pub angle: Option<f64>, // degrees, only with preset = "custom"
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WaitConfig {
    #[serde(default = "default_debug_interval_secs")]
    pub debug_interval_secs: u64,
}

fn default_debug_interval_secs() -> u64 {
    DEBUG_WAIT.as_secs()
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            debug_interval_secs: default_debug_interval_secs(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;

        config.log_level()?;
        if !(-90.0..=90.0).contains(&config.location.latitude) {
            return Err(ConfigError::Validation(format!(
                "Latitude {} must be between -90 and 90",
                config.location.latitude
            )));
        }
        if !(-360.0..=360.0).contains(&config.location.longitude) {
            return Err(ConfigError::Validation(format!(
                "Longitude {} must be between -360 and 360",
                config.location.longitude
            )));
        }
        config.twilight_altitude()?;

        Ok(config)
    }

    /// One of `trace`, `debug`, `info`, `warn`, `error` (any case).
    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.general.log_level.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Unknown log level {:?}, expected trace, debug, info, warn or error",
                self.general.log_level
            ))
        })
    }

    pub fn location(&self) -> Location {
        Location::new(self.location.latitude, self.location.longitude)
    }

    pub fn twilight_altitude(&self) -> Result<TwilightAltitude, ConfigError> {
        match self.twilight.preset {
            TwilightPreset::Daylight => Ok(TwilightAltitude::Daylight),
            TwilightPreset::Civil => Ok(TwilightAltitude::Civil),
            TwilightPreset::Nautical => Ok(TwilightAltitude::Nautical),
            TwilightPreset::Astronomical => Ok(TwilightAltitude::Astronomical),
            TwilightPreset::Custom => {
                let angle = self.twilight.angle.ok_or_else(|| {
                    ConfigError::Validation("Custom twilight requires an angle".to_string())
                })?;
                TwilightAltitude::custom(angle)
                    .map_err(|e| ConfigError::Validation(e.to_string()))
            }
        }
    }

    pub fn debug_interval(&self) -> Duration {
        Duration::from_secs(self.wait.debug_interval_secs)
    }
}
