//! Calculator configuration loaded from TOML
//!
//! Holds the scenario-wide defaults a damage table is computed with. Every
//! field can be overridden by the caller; nothing here is global.

use crate::aura::CombatPhase;
use crate::combat::reroll::RerollConfig;
use crate::core::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for damage table generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Target toughness values, one table column each
    pub toughness: Vec<f64>,

    /// Whether Rapid Fire and Melta bonuses apply
    pub optimal_range: bool,

    /// Use the overcharge profile of weapons that have one
    pub use_overcharge: bool,

    /// Count one-time weapons (seeker missiles, hunter-killers) in totals
    pub include_one_time: bool,

    /// Rerolls granted by the scenario itself (mission rules, stratagems)
    pub scenario_rerolls: RerollConfig,

    /// Restrict totals to ranged (shooting) or melee (fight) weapons
    pub phase: Option<CombatPhase>,

    /// Extra ability definitions to register on top of the built-ins
    pub registry: Option<PathBuf>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            toughness: vec![4.0, 8.0],
            optimal_range: false,
            use_overcharge: false,
            include_one_time: false,
            scenario_rerolls: RerollConfig::default(),
            phase: None,
            registry: None,
        }
    }
}

impl CalculatorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CalculatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.toughness.is_empty() {
            return Err(CalcError::InvalidConfig(
                "at least one toughness value is required".into(),
            ));
        }

        if let Some(bad) = self.toughness.iter().find(|t| !t.is_finite() || **t <= 0.0) {
            return Err(CalcError::InvalidConfig(format!(
                "toughness must be positive, got {}",
                bad
            )));
        }

        Ok(())
    }
}

/// Load calculator config from a TOML file
pub fn load_config(path: &Path) -> Result<CalculatorConfig> {
    let contents = fs::read_to_string(path)?;
    let config = CalculatorConfig::from_toml_str(&contents)?;
    tracing::debug!("Loaded calculator config from {:?}", path);
    Ok(config)
}
