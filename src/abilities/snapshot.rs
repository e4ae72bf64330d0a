//! Capability snapshot - everything a unit's own rule text grants it

use crate::abilities::catalog::{AbilityCategory, Capability, PatternRule};
use crate::combat::reroll::{RerollConfig, RerollKind};
use serde::{Deserialize, Serialize};

/// One catalog pattern that matched a unit's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAbility {
    /// Catalog key ("scout", "feel_no_pain", ...)
    pub name: String,
    pub category: AbilityCategory,
    pub effect: Capability,
    pub value: Option<f64>,
    /// Substring of the corpus that matched
    pub raw: String,
}

impl ParsedAbility {
    pub fn new(rule: &PatternRule, value: Option<f64>, raw: &str) -> Self {
        Self {
            name: rule.key.to_string(),
            category: rule.category,
            effect: rule.capability,
            value,
            raw: raw.to_string(),
        }
    }
}

/// Structured capabilities of one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilitySnapshot {
    // deployment
    pub has_scout: bool,
    pub scout_distance: Option<f64>,
    pub has_infiltrator: bool,
    pub has_deep_strike: bool,

    // defensive
    pub has_stealth: bool,
    /// Hit modifier imposed on attackers (negative)
    pub stealth_modifier: Option<f64>,
    pub feel_no_pain: Option<f64>,
    pub invulnerable_save: Option<f64>,

    // movement
    pub can_fly: bool,
    pub can_advance_and_charge: bool,
    pub can_fall_back_and_shoot: bool,
    pub can_fall_back_and_charge: bool,

    // objective
    pub has_objective_secured: bool,

    // sequencing
    pub fights_first: bool,
    pub fights_last: bool,

    // combat
    /// Rerolls granted by this unit's own text
    pub rerolls: RerollConfig,
    pub hit_modifier: i32,
    pub wound_modifier: i32,

    /// Every matched pattern, in catalog order
    pub abilities: Vec<ParsedAbility>,
}

impl CapabilitySnapshot {
    /// Record a matched pattern and apply it to its field
    pub fn record(&mut self, ability: ParsedAbility) {
        self.apply(ability.effect, ability.value);
        self.abilities.push(ability);
    }

    fn apply(&mut self, capability: Capability, value: Option<f64>) {
        match capability {
            Capability::Scout => {
                self.has_scout = true;
                self.scout_distance = value;
            }
            Capability::Infiltrator => self.has_infiltrator = true,
            Capability::DeepStrike => self.has_deep_strike = true,
            Capability::Stealth => {
                self.has_stealth = true;
                self.stealth_modifier = value;
            }
            Capability::FeelNoPain => self.feel_no_pain = value,
            Capability::InvulnerableSave => self.invulnerable_save = value,
            Capability::Fly => self.can_fly = true,
            Capability::AdvanceAndCharge => self.can_advance_and_charge = true,
            Capability::FallBackAndShoot => self.can_fall_back_and_shoot = true,
            Capability::FallBackAndCharge => self.can_fall_back_and_charge = true,
            Capability::RerollFailedHits => {
                self.rerolls.hits = self.rerolls.hits.stronger(RerollKind::Failed)
            }
            Capability::RerollFailedWounds => {
                self.rerolls.wounds = self.rerolls.wounds.stronger(RerollKind::Failed)
            }
            Capability::RerollOnesHits => {
                self.rerolls.hits = self.rerolls.hits.stronger(RerollKind::Ones)
            }
            Capability::RerollOnesWounds => {
                self.rerolls.wounds = self.rerolls.wounds.stronger(RerollKind::Ones)
            }
            Capability::HitModifier => self.hit_modifier += modifier(value),
            Capability::WoundModifier => self.wound_modifier += modifier(value),
            Capability::ObjectiveSecured => self.has_objective_secured = true,
            Capability::FightsFirst => self.fights_first = true,
            Capability::FightsLast => self.fights_last = true,
        }
    }

    pub fn ability(&self, key: &str) -> Option<&ParsedAbility> {
        self.abilities.iter().find(|a| a.name == key)
    }

    pub fn has_ability(&self, key: &str) -> bool {
        self.ability(key).is_some()
    }
}

fn modifier(value: Option<f64>) -> i32 {
    value.unwrap_or(1.0).round() as i32
}
