//! Threshold configuration for the table transformations.
//!
//! Every value defaults to the constants the transformations are defined
//! with, so a TOML file only needs the sections it wants to override:
//!
//! ```toml
//! [routes]
//! truck_mean_threshold = 8.5
//!
//! [coverage]
//! granularity = "day"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::TableError;

/// Complete transformation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(default)]
    pub car_types: CarTypeSettings,
    #[serde(default)]
    pub bus: BusSettings,
    #[serde(default)]
    pub routes: RouteSettings,
    #[serde(default)]
    pub multiply: MultiplySettings,
    #[serde(default)]
    pub coverage: CoverageSettings,
}

/// Bucket bounds for categorizing `car` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarTypeSettings {
    /// Values at or below this are `low`.
    #[serde(default = "default_low_max")]
    pub low_max: f64,
    /// Values above `low_max` and at or below this are `medium`.
    #[serde(default = "default_medium_max")]
    pub medium_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusSettings {
    /// A row qualifies when `bus > mean_factor * mean(bus)`.
    #[serde(default = "default_mean_factor")]
    pub mean_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSettings {
    /// Routes whose mean `truck` is strictly greater than this are kept.
    #[serde(default = "default_truck_mean_threshold")]
    pub truck_mean_threshold: f64,
}

/// Banded multiplication: `v < low_limit` uses `low_factor`,
/// `low_limit <= v < high_limit` uses `mid_factor`, the rest is unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplySettings {
    #[serde(default = "default_low_limit")]
    pub low_limit: f64,
    #[serde(default = "default_high_limit")]
    pub high_limit: f64,
    #[serde(default = "default_low_factor")]
    pub low_factor: f64,
    #[serde(default = "default_mid_factor")]
    pub mid_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageGranularity {
    /// Every weekday must be present.
    Day,
    /// Every hour of every weekday must be present.
    #[default]
    Hour,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSettings {
    #[serde(default)]
    pub granularity: CoverageGranularity,
}

fn default_low_max() -> f64 {
    15.0
}

fn default_medium_max() -> f64 {
    25.0
}

fn default_mean_factor() -> f64 {
    2.0
}

fn default_truck_mean_threshold() -> f64 {
    7.0
}

fn default_low_limit() -> f64 {
    5.0
}

fn default_high_limit() -> f64 {
    10.0
}

fn default_low_factor() -> f64 {
    2.0
}

fn default_mid_factor() -> f64 {
    3.0
}

impl Default for CarTypeSettings {
    fn default() -> Self {
        Self {
            low_max: default_low_max(),
            medium_max: default_medium_max(),
        }
    }
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            mean_factor: default_mean_factor(),
        }
    }
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            truck_mean_threshold: default_truck_mean_threshold(),
        }
    }
}

impl Default for MultiplySettings {
    fn default() -> Self {
        Self {
            low_limit: default_low_limit(),
            high_limit: default_high_limit(),
            low_factor: default_low_factor(),
            mid_factor: default_mid_factor(),
        }
    }
}

impl TaskConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, TableError> {
        let config: TaskConfig = toml::from_str(content)
            .map_err(|e| TableError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("Loaded task config from {}", path.display());
        Ok(config)
    }

    /// Reject non-finite thresholds and inverted bands.
    pub fn validate(&self) -> Result<(), TableError> {
        let values = [
            ("car_types.low_max", self.car_types.low_max),
            ("car_types.medium_max", self.car_types.medium_max),
            ("bus.mean_factor", self.bus.mean_factor),
            ("routes.truck_mean_threshold", self.routes.truck_mean_threshold),
            ("multiply.low_limit", self.multiply.low_limit),
            ("multiply.high_limit", self.multiply.high_limit),
            ("multiply.low_factor", self.multiply.low_factor),
            ("multiply.mid_factor", self.multiply.mid_factor),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TableError::Config(format!("{} must be finite", name)));
        }

        if self.car_types.low_max >= self.car_types.medium_max {
            return Err(TableError::Config(
                "car_types.low_max must be below car_types.medium_max".to_string(),
            ));
        }
        if self.multiply.low_limit >= self.multiply.high_limit {
            return Err(TableError::Config(
                "multiply.low_limit must be below multiply.high_limit".to_string(),
            ));
        }
        Ok(())
    }
}
