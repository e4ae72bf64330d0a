//! Aura detection and per-target application
//!
//! Detection turns one unit's abilities into positioned [`AuraSource`]s.
//! Registry definitions are consulted first, then the text catalog; within a
//! unit each (effect type, reroll kind) is emitted once. Application folds
//! every in-range, in-scope source into one [`AppliedAuraEffects`].

use crate::abilities::corpus::Corpus;
use crate::army::{Army, Unit};
use crate::aura::catalog::AURA_CATALOG;
use crate::aura::effect::{AbilityEffect, AppliedAuraEffects, CombatPhase, EffectType, TargetScope};
use crate::aura::registry::AbilityRegistry;
use crate::combat::reroll::RerollKind;
use crate::core::numeric::parse_numeric;
use crate::core::types::{Inches, Vec2};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// A positioned aura emitted by one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuraSource {
    pub source_unit_id: String,
    pub position: Vec2,
    /// Range checks use this, not `effect.range`
    pub radius: Inches,
    pub effect: AbilityEffect,
    /// Ability display name
    pub name: String,
}

impl AuraSource {
    /// Source whose radius is the effect's range (0 when it has none)
    pub fn new(source_unit_id: &str, position: Vec2, effect: AbilityEffect, name: &str) -> Self {
        Self {
            source_unit_id: source_unit_id.to_string(),
            position,
            radius: effect.range.unwrap_or_default(),
            effect,
            name: name.to_string(),
        }
    }

    pub fn in_range(&self, position: Vec2) -> bool {
        self.position.distance(&position) <= self.radius
    }
}

/// Who an aura is being applied to
#[derive(Debug, Clone, Copy)]
pub struct AuraTarget<'a> {
    pub position: Vec2,
    pub is_friendly: bool,
    pub unit_id: Option<&'a str>,
    pub keywords: &'a [String],
    /// Phase being resolved; `None` takes effects of every phase
    pub phase: Option<CombatPhase>,
}

impl<'a> AuraTarget<'a> {
    pub fn friendly(position: Vec2) -> Self {
        Self {
            position,
            is_friendly: true,
            unit_id: None,
            keywords: &[],
            phase: None,
        }
    }

    pub fn enemy(position: Vec2) -> Self {
        Self {
            is_friendly: false,
            ..Self::friendly(position)
        }
    }

    pub fn with_unit_id(mut self, unit_id: &'a str) -> Self {
        self.unit_id = Some(unit_id);
        self
    }

    pub fn with_keywords(mut self, keywords: &'a [String]) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_phase(mut self, phase: CombatPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }

    fn is_source(&self, aura: &AuraSource) -> bool {
        self.unit_id == Some(aura.source_unit_id.as_str())
    }

    fn in_phase(&self, effect: &AbilityEffect) -> bool {
        match (self.phase, effect.phase) {
            (Some(current), Some(restricted)) => restricted == CombatPhase::Any || restricted == current,
            _ => true,
        }
    }

    /// Whether an aura's scope and phase reach this target
    fn accepts(&self, aura: &AuraSource) -> bool {
        if !self.in_phase(&aura.effect) {
            return false;
        }
        match &aura.effect.target {
            TargetScope::SelfOnly => self.is_source(aura),
            // The owner's own bonuses already come from its capability snapshot
            _ if self.is_source(aura) => false,
            TargetScope::Friendly => self.is_friendly,
            TargetScope::Enemy => !self.is_friendly,
            TargetScope::Keyword(keyword) => self.is_friendly && self.has_keyword(keyword),
            TargetScope::All => true,
        }
    }
}

/// Detects auras using a caller-owned registry
#[derive(Debug, Clone, Copy)]
pub struct AuraEngine<'r> {
    registry: &'r AbilityRegistry,
}

impl<'r> AuraEngine<'r> {
    pub fn new(registry: &'r AbilityRegistry) -> Self {
        Self { registry }
    }

    /// All auras a unit projects from `position`
    pub fn detect_auras(&self, unit: &Unit, army: Option<&Army>, position: Vec2) -> Vec<AuraSource> {
        let corpus = Corpus::build(unit, army);
        let mut seen = AHashSet::new();
        let mut auras = Vec::new();

        for source in corpus.sources() {
            let definition = source
                .id
                .as_deref()
                .and_then(|id| self.registry.get(id))
                .or_else(|| self.registry.lookup(&source.name));
            let Some(definition) = definition else {
                continue;
            };
            for effect in definition.aura_effects() {
                if !seen.insert(effect.kind_key()) {
                    continue;
                }
                auras.push(AuraSource::new(&unit.id, position, effect.clone(), &definition.name));
            }
        }

        for (pattern, compiled) in AURA_CATALOG.iter() {
            let Some(caps) = compiled.first_match(corpus.text()) else {
                continue;
            };
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let radius = caps.get(1).map_or(0.0, |m| parse_numeric(m.as_str()));

            let mut effect = AbilityEffect::new(pattern.effect_type).with_range(radius);
            effect.reroll = pattern.reroll;
            effect.value = pattern.value;
            if !seen.insert(effect.kind_key()) {
                continue;
            }

            let name = corpus
                .source_at(whole.start())
                .map_or_else(|| pattern.key.to_string(), |s| s.name.clone());
            auras.push(AuraSource::new(&unit.id, position, effect, &name));
        }

        if !auras.is_empty() {
            tracing::debug!("Detected {} auras on unit {:?}", auras.len(), unit.name);
        }
        auras
    }
}

/// Fold in-range auras into the effects one target receives
pub fn apply_aura_effects(target_position: Vec2, auras: &[AuraSource], is_friendly: bool) -> AppliedAuraEffects {
    let target = AuraTarget {
        is_friendly,
        ..AuraTarget::friendly(target_position)
    };
    apply_to_target(&target, auras)
}

/// Like [`apply_aura_effects`] with the target's identity and keywords
pub fn apply_to_target(target: &AuraTarget<'_>, auras: &[AuraSource]) -> AppliedAuraEffects {
    let mut applied = AppliedAuraEffects::default();

    for aura in auras {
        if !aura.in_range(target.position) || !target.accepts(aura) {
            continue;
        }
        let effect = &aura.effect;
        let step = effect.value.unwrap_or(1.0).round() as i32;

        match effect.effect_type {
            EffectType::RerollHits => upgrade(&mut applied.hit_reroll, effect.reroll),
            EffectType::RerollWounds => upgrade(&mut applied.wound_reroll, effect.reroll),
            EffectType::ModifierHit => applied.hit_modifier += step,
            EffectType::ModifierWound => applied.wound_modifier += step,
            EffectType::ModifierSave => applied.save_modifier += step,
            EffectType::Cover => applied.cover = true,
            EffectType::FeelNoPain => keep_lowest(&mut applied.feel_no_pain, effect.value),
            EffectType::InvulnerableSave => keep_lowest(&mut applied.invulnerable_save, effect.value),
            EffectType::Stealth => applied.stealth = true,
            EffectType::Unknown => {
                tracing::trace!("Ignoring aura {:?} with unknown effect type", aura.name);
                continue;
            }
        }
        applied.sources.push(aura.name.clone());
    }

    applied
}

fn upgrade(slot: &mut Option<RerollKind>, offer: Option<RerollKind>) {
    let offer = offer.unwrap_or_default();
    if offer == RerollKind::None {
        return;
    }
    *slot = Some(slot.unwrap_or_default().stronger(offer));
}

fn keep_lowest(slot: &mut Option<f64>, offer: Option<f64>) {
    if let Some(value) = offer {
        *slot = Some(slot.map_or(value, |current| current.min(value)));
    }
}
