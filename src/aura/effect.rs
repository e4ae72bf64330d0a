//! Aura effect definitions and the per-target accumulation result

use crate::combat::reroll::{RerollConfig, RerollKind};
use crate::core::error::CalcError;
use crate::core::types::Inches;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What an ability effect changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectType {
    RerollHits,
    RerollWounds,
    ModifierHit,
    ModifierWound,
    ModifierSave,
    Cover,
    FeelNoPain,
    InvulnerableSave,
    Stealth,
    /// Anything this version does not know; ignored when applied
    #[serde(other)]
    Unknown,
}

/// Which units an effect may apply to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetScope {
    #[serde(rename = "self")]
    SelfOnly,
    Friendly,
    Enemy,
    /// Friendly units carrying this keyword
    Keyword(String),
    All,
}

/// Phase an effect is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatPhase {
    Shooting,
    Fight,
    Any,
}

impl FromStr for CombatPhase {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shooting" => Ok(CombatPhase::Shooting),
            "fight" | "melee" => Ok(CombatPhase::Fight),
            "any" => Ok(CombatPhase::Any),
            other => Err(CalcError::InvalidConfig(format!("unknown combat phase {:?}", other))),
        }
    }
}

/// A single structured effect of an ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityEffect {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub reroll: Option<RerollKind>,
    #[serde(default = "default_scope")]
    pub target: TargetScope,
    /// Aura radius; effects without one are not auras
    #[serde(default)]
    pub range: Option<Inches>,
    #[serde(default)]
    pub phase: Option<CombatPhase>,
}

fn default_scope() -> TargetScope {
    TargetScope::Friendly
}

impl AbilityEffect {
    pub fn new(effect_type: EffectType) -> Self {
        Self {
            effect_type,
            value: None,
            reroll: None,
            target: TargetScope::Friendly,
            range: None,
            phase: None,
        }
    }

    pub fn reroll_hits(kind: RerollKind, range: Inches) -> Self {
        Self::new(EffectType::RerollHits).with_reroll(kind).with_range(range)
    }

    pub fn reroll_wounds(kind: RerollKind, range: Inches) -> Self {
        Self::new(EffectType::RerollWounds).with_reroll(kind).with_range(range)
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_reroll(mut self, kind: RerollKind) -> Self {
        self.reroll = Some(kind);
        self
    }

    pub fn with_range(mut self, range: Inches) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_target(mut self, target: TargetScope) -> Self {
        self.target = target;
        self
    }

    pub fn with_phase(mut self, phase: CombatPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Dedup key within one unit's auras
    pub fn kind_key(&self) -> (EffectType, Option<RerollKind>) {
        (self.effect_type, self.reroll)
    }
}

/// Everything the in-range auras grant one target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedAuraEffects {
    pub hit_reroll: Option<RerollKind>,
    pub wound_reroll: Option<RerollKind>,
    pub hit_modifier: i32,
    pub wound_modifier: i32,
    pub save_modifier: i32,
    pub cover: bool,
    /// Best (lowest) Feel No Pain threshold granted
    pub feel_no_pain: Option<f64>,
    /// Best (lowest) invulnerable save granted
    pub invulnerable_save: Option<f64>,
    pub stealth: bool,
    /// Display names of every contributing aura, in application order
    pub sources: Vec<String>,
}

impl AppliedAuraEffects {
    /// Reroll offers as a scope config for the damage model
    pub fn rerolls(&self) -> RerollConfig {
        RerollConfig {
            hits: self.hit_reroll.unwrap_or_default(),
            wounds: self.wound_reroll.unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
