//! Engine settings

use super::ConfigError;
use crate::types::HpGain;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tunable engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub tables: TablesConfig,
    #[serde(default)]
    pub leveling: LevelingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablesConfig {
    /// Directory containing the rule table JSON files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for TablesConfig {
    fn default() -> Self {
        TablesConfig {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelingConfig {
    /// Minimum score in each required ability to take a new class
    #[serde(default = "default_multiclass_minimum")]
    pub multiclass_minimum: i32,
    /// HP gain used when the caller doesn't pick one
    #[serde(default = "default_hp_gain")]
    pub default_hp_gain: HpGain,
    /// Highest total (and per-class) level
    #[serde(default = "default_max_level")]
    pub max_level: u32,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        LevelingConfig {
            multiclass_minimum: default_multiclass_minimum(),
            default_hp_gain: default_hp_gain(),
            max_level: default_max_level(),
        }
    }
}

fn default_multiclass_minimum() -> i32 {
    13
}
fn default_hp_gain() -> HpGain {
    HpGain::Average
}
fn default_max_level() -> u32 {
    20
}

impl SheetConfig {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: SheetConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse settings from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: SheetConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.leveling.max_level == 0 {
            return Err(ConfigError::ValidationError(
                "leveling.max_level must be at least 1".to_string(),
            ));
        }
        if !(1..=30).contains(&self.leveling.multiclass_minimum) {
            return Err(ConfigError::ValidationError(format!(
                "leveling.multiclass_minimum out of range: {}",
                self.leveling.multiclass_minimum
            )));
        }
        Ok(())
    }
}

/// Get the embedded default settings
pub fn default_config() -> SheetConfig {
    let toml = include_str!("../../config/sheet.toml");
    SheetConfig::parse(toml).unwrap_or_default()
}
