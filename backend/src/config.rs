//! Configuration management for the FarmFlow DCRI service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FARMFLOW_ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Crop snapshot persistence
    pub storage: StorageConfig,

    /// Weather provider (Open-Meteo)
    pub weather: WeatherConfig,

    /// Soil provider (ISRIC SoilGrids)
    pub soil: SoilConfig,

    /// Learned DCRI model
    #[serde(default)]
    pub model: ModelConfig,

    /// Scoring policy
    pub scoring: ScoringConfig,

    /// Daily revision schedule
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON snapshot of all tracked crops, rewritten on every save
    pub snapshot_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Forecast API endpoint
    pub api_endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SoilConfig {
    /// Soil properties query endpoint
    pub api_endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ModelConfig {
    /// Trained model artifact (JSON). When unset or unloadable the
    /// heuristic scorer is used.
    pub artifact_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScoringConfig {
    /// Reject unknown crop names instead of scoring them as Tomato
    pub strict_crop_types: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Run the daily revision automatically
    pub enabled: bool,

    /// Local wall-clock hour (0-23)
    pub hour: u32,

    /// Local wall-clock minute (0-59)
    pub minute: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FARMFLOW_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.snapshot_path", "crop_dcri_data.json")?
            .set_default(
                "weather.api_endpoint",
                "https://api.open-meteo.com/v1/forecast",
            )?
            .set_default("weather.timeout_secs", 10)?
            .set_default(
                "soil.api_endpoint",
                "https://rest.isric.org/soilgrids/v2.0/properties/query",
            )?
            .set_default("soil.timeout_secs", 15)?
            .set_default("scoring.strict_crop_types", false)?
            .set_default("scheduler.enabled", true)?
            .set_default("scheduler.hour", 0)?
            .set_default("scheduler.minute", 0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FARMFLOW_ prefix)
            .add_source(
                Environment::with_prefix("FARMFLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.scheduler.validate()?;
        Ok(config)
    }
}

impl SchedulerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.hour > 23 || self.minute > 59 {
            return Err(ConfigError::Message(format!(
                "scheduler time {:02}:{:02} is not a valid wall-clock time",
                self.hour, self.minute
            )));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hour: 0,
            minute: 0,
        }
    }
}
