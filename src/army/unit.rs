//! Units, armies, and the rule/ability references that tie them together

use crate::army::weapon::{ProfileMode, Weapon};
use crate::core::numeric::parse_numeric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name and description of a rule or ability, either from an army dictionary
/// or written inline on the unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub hidden: bool,
}

/// Inline `{name, description}` reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineRule {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A rule or ability reference on a unit
///
/// Strings are dictionary ids when the army knows them and literal rule text
/// otherwise. Anything else is kept but never contributes text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Text(String),
    Inline(InlineRule),
    Other(serde_json::Value),
}

impl From<&str> for Reference {
    fn from(s: &str) -> Self {
        Reference::Text(s.to_string())
    }
}

impl From<String> for Reference {
    fn from(s: String) -> Self {
        Reference::Text(s)
    }
}

/// Unit profile characteristics, as printed on the datasheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitStats {
    #[serde(rename = "move")]
    pub movement: String,
    pub toughness: String,
    pub save: String,
    pub wounds: String,
    pub leadership: String,
    pub objective_control: String,
}

/// Standard and overcharge profile ids of one multi-mode weapon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedWeapons {
    pub standard: Option<String>,
    pub overcharge: Option<String>,
}

impl LinkedWeapons {
    pub fn has_both(&self) -> bool {
        self.standard.is_some() && self.overcharge.is_some()
    }

    pub fn id_for(&self, mode: ProfileMode) -> Option<&str> {
        match mode {
            ProfileMode::Standard => self.standard.as_deref(),
            ProfileMode::Overcharge => self.overcharge.as_deref(),
        }
    }
}

/// A unit on the battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unit {
    pub id: String,
    pub name: String,
    /// Primary category ("Infantry", "Vehicle", ...)
    #[serde(rename = "type")]
    pub unit_type: String,
    pub stats: UnitStats,
    pub points: f64,
    /// Model count
    pub count: u32,
    pub rules: Vec<Reference>,
    pub abilities: Vec<Reference>,
    pub weapons: Vec<Weapon>,
    pub linked_weapons: BTreeMap<String, LinkedWeapons>,
    /// Sub-models of a multi-model unit
    pub models: Vec<Unit>,
}

impl Default for Unit {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            unit_type: String::new(),
            stats: UnitStats::default(),
            points: 0.0,
            count: 1,
            rules: Vec::new(),
            abilities: Vec::new(),
            weapons: Vec::new(),
            linked_weapons: BTreeMap::new(),
            models: Vec::new(),
        }
    }
}

impl Unit {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, reference: impl Into<Reference>) -> Self {
        self.rules.push(reference.into());
        self
    }

    pub fn with_ability(mut self, reference: impl Into<Reference>) -> Self {
        self.abilities.push(reference.into());
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn toughness(&self) -> f64 {
        parse_numeric(&self.stats.toughness)
    }

    /// Weapons of the unit and of all nested models
    pub fn all_weapons(&self) -> Vec<&Weapon> {
        let mut weapons: Vec<&Weapon> = self.weapons.iter().collect();
        for model in &self.models {
            weapons.extend(model.all_weapons());
        }
        weapons
    }
}

/// A parsed army list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Army {
    pub army_name: String,
    pub faction: String,
    pub points_total: f64,
    pub rules: BTreeMap<String, RuleEntry>,
    pub abilities: BTreeMap<String, RuleEntry>,
    pub units: Vec<Unit>,
}

impl Default for Army {
    fn default() -> Self {
        Self {
            army_name: "Unknown Army".to_string(),
            faction: "Unknown Faction".to_string(),
            points_total: 0.0,
            rules: BTreeMap::new(),
            abilities: BTreeMap::new(),
            units: Vec::new(),
        }
    }
}

impl Army {
    pub fn new(name: &str) -> Self {
        Self {
            army_name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, id: &str, name: &str, description: &str) -> Self {
        self.rules.insert(id.to_string(), entry(id, name, description));
        self
    }

    pub fn with_ability(mut self, id: &str, name: &str, description: &str) -> Self {
        self.abilities.insert(id.to_string(), entry(id, name, description));
        self
    }

    /// Look up a dictionary entry by id, rules first
    pub fn resolve(&self, id: &str) -> Option<&RuleEntry> {
        self.rules.get(id).or_else(|| self.abilities.get(id))
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }
}

fn entry(id: &str, name: &str, description: &str) -> RuleEntry {
    RuleEntry {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        hidden: false,
    }
}
