//! Expected damage of one weapon profile against one toughness
//!
//! The attack sequence is resolved as expectations, not dice:
//! attacks -> hits -> wounds -> damage. Each step reads from the tables in
//! [`probability`](super::probability) and the special rules on the keyword
//! line. Nothing here fails; bad input degrades to 0.

use crate::army::Weapon;
use crate::aura::{AppliedAuraEffects, CombatPhase};
use crate::combat::constants::{CRIT_RATE, MORTAL_WOUND_DAMAGE};
use crate::combat::one_time::is_one_time_weapon;
use crate::combat::probability::{hit_probability, wound_probability};
use crate::combat::reroll::{RerollConfig, RerollKind};
use crate::combat::special_rules::SpecialRules;
use crate::core::numeric::parse_optional;
use serde::{Deserialize, Serialize};

/// Characteristics an overcharge variant may replace
const OVERCHARGE_KEYS: &[&str] = &["s", "d", "ap"];

/// Scenario and context for one damage calculation
#[derive(Debug, Clone, Copy, Default)]
pub struct DamageOptions<'a> {
    /// Read s/d/ap from the weapon's overcharge variant
    pub use_overcharge: bool,
    /// Count once-per-battle weapons
    pub include_one_time: bool,
    /// Target is within half range (Rapid Fire, Melta)
    pub optimal_range: bool,
    pub aura_effects: Option<&'a AppliedAuraEffects>,
    /// Scales the weapon count; 1 when unset
    pub count_multiplier: Option<f64>,
    /// Owning unit's name, for the one-time classifier
    pub unit_name: Option<&'a str>,
    pub unit_rerolls: RerollConfig,
    pub scenario_rerolls: RerollConfig,
    pub hit_modifier: i32,
    pub wound_modifier: i32,
    /// Only weapons used in this phase count towards a unit; all when unset
    pub phase: Option<CombatPhase>,
}

impl<'a> DamageOptions<'a> {
    pub fn with_auras(mut self, effects: &'a AppliedAuraEffects) -> Self {
        self.aura_effects = Some(effects);
        self
    }

    pub fn with_unit_name(mut self, name: &'a str) -> Self {
        self.unit_name = Some(name);
        self
    }

    /// Whether `weapon` is fired or swung in the selected phase
    pub fn uses_weapon(&self, weapon: &Weapon) -> bool {
        match self.phase {
            Some(CombatPhase::Shooting) => !weapon.is_melee(),
            Some(CombatPhase::Fight) => weapon.is_melee(),
            Some(CombatPhase::Any) | None => true,
        }
    }

    fn aura_rerolls(&self) -> RerollConfig {
        self.aura_effects.map(AppliedAuraEffects::rerolls).unwrap_or_default()
    }

    fn total_hit_modifier(&self) -> i32 {
        self.hit_modifier + self.aura_effects.map_or(0, |a| a.hit_modifier)
    }

    fn total_wound_modifier(&self) -> i32 {
        self.wound_modifier + self.aura_effects.map_or(0, |a| a.wound_modifier)
    }
}

/// Intermediate expectations of one calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub attacks: f64,
    pub hit_probability: f64,
    pub hits: f64,
    pub wound_probability: f64,
    pub wounds: f64,
    pub mortal_wounds: f64,
    pub damage_per_wound: f64,
    pub armour_penetration: f64,
    pub hit_reroll: RerollKind,
    pub wound_reroll: RerollKind,
    pub expected_damage: f64,
}

/// Expected damage of `weapon` against `toughness`
pub fn calculate_weapon_damage(weapon: &Weapon, toughness: f64, options: &DamageOptions<'_>) -> f64 {
    weapon_damage_profile(weapon, toughness, options).expected_damage
}

/// Full attack-sequence breakdown behind [`calculate_weapon_damage`]
pub fn weapon_damage_profile(weapon: &Weapon, toughness: f64, options: &DamageOptions<'_>) -> DamageBreakdown {
    if !options.include_one_time && is_one_time_weapon(weapon, options.unit_name) {
        tracing::trace!("Skipping one-time weapon {:?}", weapon.name);
        return DamageBreakdown::default();
    }

    let overrides = if options.use_overcharge {
        weapon.overcharge_overrides()
    } else {
        Vec::new()
    };
    let stat = |key: &str| -> f64 {
        let overridden = overrides
            .iter()
            .find(|(k, _)| k == key && OVERCHARGE_KEYS.contains(&key))
            .map(|(_, v)| v.as_str());
        parse_optional(overridden.or_else(|| weapon.characteristic(key)))
    };

    let rules = SpecialRules::from_keywords(weapon.keywords());
    if !rules.is_plain() {
        tracing::trace!("{:?} special rules: {:?}", weapon.name, rules);
    }
    let mut out = DamageBreakdown {
        attacks: stat("a"),
        damage_per_wound: stat("d"),
        armour_penetration: stat("ap"),
        ..Default::default()
    };
    let strength = stat("s");

    let weapon_wounds = if rules.twin_linked {
        RerollKind::Failed
    } else {
        weapon.rerolls.wounds
    };
    let scopes = [
        RerollConfig::new(weapon.rerolls.hits, weapon_wounds),
        options.unit_rerolls,
        options.scenario_rerolls,
        options.aura_rerolls(),
    ];
    out.hit_reroll = RerollKind::strongest(scopes.iter().map(|s| s.hits));
    out.wound_reroll = RerollKind::strongest(scopes.iter().map(|s| s.wounds));

    if options.optimal_range {
        out.attacks += rules.rapid_fire.unwrap_or(0.0);
        out.damage_per_wound += rules.melta.unwrap_or(0.0);
    }

    out.hit_probability = if rules.torrent {
        1.0
    } else {
        out.hit_reroll.apply(hit_probability(weapon.hit_skill(), options.total_hit_modifier()))
    };
    out.hits = out.attacks * out.hit_probability;
    if let Some(extra) = rules.sustained_hits {
        out.hits += out.attacks * CRIT_RATE * extra;
    }

    out.wound_probability = out
        .wound_reroll
        .apply(wound_probability(strength, toughness, options.total_wound_modifier()));
    out.wounds = if rules.lethal_hits {
        let critical = out.attacks * CRIT_RATE;
        critical + (out.hits - critical).max(0.0) * out.wound_probability
    } else {
        out.hits * out.wound_probability
    };

    if rules.devastating_wounds {
        out.mortal_wounds = (out.hits * out.wound_probability * CRIT_RATE).min(out.wounds);
    }
    let normal_wounds = out.wounds - out.mortal_wounds;

    let multiplier = options.count_multiplier.unwrap_or(1.0);
    let damage = (normal_wounds * out.damage_per_wound + out.mortal_wounds * MORTAL_WOUND_DAMAGE)
        * f64::from(weapon.count)
        * multiplier;
    out.expected_damage = if damage.is_finite() && damage > 0.0 { damage } else { 0.0 };
    out
}
