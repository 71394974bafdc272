//! TOML-based application configuration.
//!
//! Stores the workload policy thresholds and the estimate multiplier.
//! Configuration is stored at `~/.config/daymap/config.toml`; every field
//! has a serde default so a partial file still loads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::workload::WorkloadPolicy;

/// Workload threshold configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    #[serde(default = "default_overload_hours")]
    pub overload_hours: f64,
    #[serde(default = "default_unrealistic_hours")]
    pub unrealistic_hours: f64,
    #[serde(default = "default_high_energy_limit")]
    pub high_energy_limit: usize,
    #[serde(default = "default_deep_focus_limit")]
    pub deep_focus_limit: usize,
    #[serde(default = "default_light_day_hours")]
    pub light_day_hours: f64,
}

/// Estimate projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateConfig {
    #[serde(default = "default_reality_multiplier")]
    pub reality_multiplier: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/daymap/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workload: WorkloadConfig,
    #[serde(default)]
    pub estimate: EstimateConfig,
}

fn default_overload_hours() -> f64 {
    8.0
}
fn default_unrealistic_hours() -> f64 {
    12.0
}
fn default_high_energy_limit() -> usize {
    2
}
fn default_deep_focus_limit() -> usize {
    1
}
fn default_light_day_hours() -> f64 {
    4.0
}
fn default_reality_multiplier() -> f64 {
    1.8
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            overload_hours: default_overload_hours(),
            unrealistic_hours: default_unrealistic_hours(),
            high_energy_limit: default_high_energy_limit(),
            deep_focus_limit: default_deep_focus_limit(),
            light_day_hours: default_light_day_hours(),
        }
    }
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            reality_multiplier: default_reality_multiplier(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workload: WorkloadConfig::default(),
            estimate: EstimateConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/daymap"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// A missing file yields the default configuration and writes it to disk.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Save to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The workload policy described by this configuration.
    pub fn workload_policy(&self) -> WorkloadPolicy {
        WorkloadPolicy {
            overload_hours: self.workload.overload_hours,
            unrealistic_hours: self.workload.unrealistic_hours,
            high_energy_limit: self.workload.high_energy_limit,
            deep_focus_limit: self.workload.deep_focus_limit,
            light_day_hours: self.workload.light_day_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_policy() {
        let cfg = Config::default();
        assert_eq!(cfg.workload.overload_hours, 8.0);
        assert_eq!(cfg.workload.unrealistic_hours, 12.0);
        assert_eq!(cfg.workload.high_energy_limit, 2);
        assert_eq!(cfg.workload.deep_focus_limit, 1);
        assert_eq!(cfg.estimate.reality_multiplier, 1.8);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("[workload]\noverload_hours = 6.0\n").unwrap();
        assert_eq!(cfg.workload.overload_hours, 6.0);
        assert_eq!(cfg.workload.unrealistic_hours, 12.0);
        assert_eq!(cfg.estimate.reality_multiplier, 1.8);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = Config::default();
        let serialized = toml::to_string_pretty(&cfg).unwrap();
        let decoded: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(decoded.workload.light_day_hours, cfg.workload.light_day_hours);
        assert_eq!(decoded.estimate.reality_multiplier, cfg.estimate.reality_multiplier);
    }

    #[test]
    fn workload_policy_mapping() {
        let mut cfg = Config::default();
        cfg.workload.high_energy_limit = 4;
        let policy = cfg.workload_policy();
        assert_eq!(policy.high_energy_limit, 4);
        assert_eq!(policy.overload_hours, 8.0);
    }
}
