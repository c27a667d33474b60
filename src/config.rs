use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub snapshot: SnapshotSettings,
    pub matching: MatchingSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotSettings {
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String { "data/snapshot.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: i64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> i64 { 10 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_shared_interest_weight")]
    pub shared_interest: f64,
    #[serde(default = "default_complementary_skill_weight")]
    pub complementary_skill: f64,
    #[serde(default = "default_same_university_weight")]
    pub same_university: f64,
    #[serde(default = "default_same_major_weight")]
    pub same_major: f64,
    #[serde(default = "default_same_year_weight")]
    pub same_year: f64,
    #[serde(default = "default_proximity_max")]
    pub proximity_max: f64,
    #[serde(default = "default_proximity_km_per_point")]
    pub proximity_km_per_point: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            shared_interest: default_shared_interest_weight(),
            complementary_skill: default_complementary_skill_weight(),
            same_university: default_same_university_weight(),
            same_major: default_same_major_weight(),
            same_year: default_same_year_weight(),
            proximity_max: default_proximity_max(),
            proximity_km_per_point: default_proximity_km_per_point(),
        }
    }
}

fn default_shared_interest_weight() -> f64 { 8.0 }
fn default_complementary_skill_weight() -> f64 { 15.0 }
fn default_same_university_weight() -> f64 { 5.0 }
fn default_same_major_weight() -> f64 { 5.0 }
fn default_same_year_weight() -> f64 { 3.0 }
fn default_proximity_max() -> f64 { 25.0 }
fn default_proximity_km_per_point() -> f64 { 5.0 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(value: &WeightsConfig) -> Self {
        Self {
            shared_interest: value.shared_interest,
            complementary_skill: value.complementary_skill,
            same_university: value.same_university,
            same_major: value.same_major,
            same_year: value.same_year,
            proximity_max: value.proximity_max,
            proximity_km_per_point: value.proximity_km_per_point,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLSWAP__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILLSWAP__MATCHING__DEFAULT_LIMIT -> matching.default_limit
            .add_source(
                Environment::with_prefix("SKILLSWAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    ///
    /// The file replaces both `config/default.toml` and `config/local.toml`;
    /// environment overrides still apply on top.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SKILLSWAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

/// Apply well-known environment variables that live outside the SKILLSWAP__ namespace
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = std::env::var("SNAPSHOT_PATH") {
        builder = builder.set_override("snapshot.path", path)?;
    }

    builder.build()
}
