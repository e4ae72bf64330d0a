//! Weapon profiles as they arrive from the roster tooling
//!
//! Characteristics stay strings ("D6+1", "3+", "Rapid Fire 1") until the
//! damage model asks for a number.

use crate::combat::reroll::RerollConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which firing mode a linked weapon profile represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMode {
    Standard,
    Overcharge,
}

/// A weapon carried by a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    /// "Ranged Weapons" or "Melee Weapons"
    #[serde(rename = "type")]
    pub weapon_type: String,
    /// Lowercase characteristic name to raw value (a, bs, ws, s, ap, d, keywords, range)
    pub characteristics: BTreeMap<String, String>,
    /// Instances of this weapon across the unit
    pub count: u32,
    pub models_with_weapon: u32,
    /// Shared name of a multi-profile weapon ("➤ Plasma gun")
    pub base_name: Option<String>,
    pub overcharge_mode: Option<ProfileMode>,
    /// Overrides for the overcharged shot, e.g. "s:8,d:2,ap:-3"
    pub overcharge: Option<String>,
    /// Explicitly usable once per battle
    #[serde(alias = "oneTime")]
    pub one_time: bool,
    /// Rerolls granted by the weapon profile itself
    pub rerolls: RerollConfig,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            weapon_type: String::new(),
            characteristics: BTreeMap::new(),
            count: 1,
            models_with_weapon: 1,
            base_name: None,
            overcharge_mode: None,
            overcharge: None,
            one_time: false,
            rerolls: RerollConfig::default(),
        }
    }
}

impl Weapon {
    /// Minimal ranged profile; characteristics are added with [`Weapon::with`]
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            weapon_type: "Ranged Weapons".to_string(),
            ..Self::default()
        }
    }

    /// Builder-style characteristic setter
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.characteristics.insert(key.to_lowercase(), value.to_string());
        self
    }

    pub fn characteristic(&self, key: &str) -> Option<&str> {
        self.characteristics
            .get(key)
            .or_else(|| {
                self.characteristics
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    /// Free-text keyword line, empty if absent
    pub fn keywords(&self) -> &str {
        self.characteristic("keywords").unwrap_or("")
    }

    /// Ballistic skill for ranged profiles, weapon skill for melee ones
    pub fn hit_skill(&self) -> Option<&str> {
        self.characteristic("bs").or_else(|| self.characteristic("ws"))
    }

    pub fn is_melee(&self) -> bool {
        self.weapon_type.to_lowercase().contains("melee")
    }

    /// Key/value pairs of the overcharge variant string
    ///
    /// Malformed pairs are skipped. Keys are lowercased.
    pub fn overcharge_overrides(&self) -> Vec<(String, String)> {
        let Some(variant) = &self.overcharge else {
            return Vec::new();
        };

        variant
            .split(',')
            .filter_map(|pair| {
                let (key, value) = pair.split_once(':')?;
                let key = key.trim().to_lowercase();
                let value = value.trim();
                if key.is_empty() || value.is_empty() {
                    return None;
                }
                Some((key, value.to_string()))
            })
            .collect()
    }
}
