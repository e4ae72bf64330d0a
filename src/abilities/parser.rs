//! Ability/rule text extraction with a per-instance snapshot cache
//!
//! Snapshots are built lazily and kept until `clear_cache`. Repeated queries
//! for the same (unit, army) hand back the same `Rc`, so callers can detect
//! caching with `Rc::ptr_eq`. The cache is owned by the parser instance; use
//! one parser per thread.

use crate::abilities::catalog::CATALOG;
use crate::abilities::corpus::Corpus;
use crate::abilities::matcher::first_capture_value;
use crate::abilities::snapshot::{CapabilitySnapshot, ParsedAbility};
use crate::army::{Army, Unit};
use crate::combat::reroll::RerollConfig;
use ahash::AHashMap;
use std::rc::Rc;

/// Army key used when a unit is parsed without an army
pub const NO_ARMY: &str = "no-army";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub unit_id: String,
    pub army: String,
}

impl CacheKey {
    pub fn new(unit: &Unit, army: Option<&Army>) -> Self {
        Self {
            unit_id: unit.id.clone(),
            army: army.map_or_else(|| NO_ARMY.to_string(), |a| a.army_name.clone()),
        }
    }
}

/// Run the capability catalog over a corpus
///
/// Pure and uncached. Each pattern contributes at most one ParsedAbility.
pub fn extract_capabilities(corpus: &str) -> CapabilitySnapshot {
    let mut snapshot = CapabilitySnapshot::default();

    for (rule, pattern) in CATALOG.iter() {
        let Some(caps) = pattern.first_match(corpus) else {
            continue;
        };
        let raw = caps.get(0).map_or("", |m| m.as_str());
        let value = first_capture_value(&caps).or(rule.default);
        snapshot.record(ParsedAbility::new(rule, value, raw));
    }

    snapshot
}

/// Caching front end over [`extract_capabilities`]
#[derive(Debug, Default)]
pub struct AbilityParser {
    cache: AHashMap<CacheKey, Rc<CapabilitySnapshot>>,
}

impl AbilityParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capability snapshot for a unit, built on first request
    pub fn parse_unit(&mut self, unit: &Unit, army: Option<&Army>) -> Rc<CapabilitySnapshot> {
        let key = CacheKey::new(unit, army);
        if let Some(snapshot) = self.cache.get(&key) {
            tracing::trace!("Capability cache hit for {}/{}", key.army, key.unit_id);
            return Rc::clone(snapshot);
        }

        let corpus = Corpus::build(unit, army);
        let snapshot = Rc::new(extract_capabilities(corpus.text()));
        tracing::debug!(
            "Parsed {} abilities for unit {:?} ({})",
            snapshot.abilities.len(),
            unit.name,
            key.army
        );

        self.cache.insert(key, Rc::clone(&snapshot));
        snapshot
    }

    pub fn clear_cache(&mut self) {
        tracing::debug!("Clearing {} cached capability snapshots", self.cache.len());
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn has_scout(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).has_scout
    }

    pub fn scout_distance(&mut self, unit: &Unit, army: Option<&Army>) -> Option<f64> {
        self.parse_unit(unit, army).scout_distance
    }

    pub fn has_infiltrator(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).has_infiltrator
    }

    pub fn has_deep_strike(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).has_deep_strike
    }

    pub fn has_stealth(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).has_stealth
    }

    pub fn feel_no_pain(&mut self, unit: &Unit, army: Option<&Army>) -> Option<f64> {
        self.parse_unit(unit, army).feel_no_pain
    }

    pub fn invulnerable_save(&mut self, unit: &Unit, army: Option<&Army>) -> Option<f64> {
        self.parse_unit(unit, army).invulnerable_save
    }

    pub fn can_fly(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).can_fly
    }

    pub fn can_advance_and_charge(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).can_advance_and_charge
    }

    pub fn can_fall_back_and_shoot(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).can_fall_back_and_shoot
    }

    pub fn can_fall_back_and_charge(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).can_fall_back_and_charge
    }

    pub fn has_objective_secured(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).has_objective_secured
    }

    pub fn fights_first(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).fights_first
    }

    pub fn fights_last(&mut self, unit: &Unit, army: Option<&Army>) -> bool {
        self.parse_unit(unit, army).fights_last
    }

    /// Rerolls the unit's own text grants to all of its attacks
    pub fn unit_rerolls(&mut self, unit: &Unit, army: Option<&Army>) -> RerollConfig {
        self.parse_unit(unit, army).rerolls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::reroll::RerollKind;

    #[test]
    fn test_extract_empty_corpus() {
        let snapshot = extract_capabilities("");
        assert_eq!(snapshot, CapabilitySnapshot::default());
    }

    #[test]
    fn test_list_follows_catalog_order() {
        let snapshot = extract_capabilities("Fights First. Deep Strike. Feel No Pain 5+. Scouts 6\"");
        let keys: Vec<&str> = snapshot.abilities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(keys, vec!["scout", "deep_strike", "feel_no_pain", "fights_first"]);
    }

    #[test]
    fn test_raw_substring_recorded() {
        let snapshot = extract_capabilities("This model has a 4+ invulnerable save.");
        let invuln = snapshot.ability("invulnerable_save").unwrap();
        assert_eq!(invuln.raw, "4+ invulnerable save");
        assert_eq!(invuln.value, Some(4.0));
    }

    #[test]
    fn test_cache_key_sentinel() {
        let unit = Unit::new("u1", "X");
        assert_eq!(CacheKey::new(&unit, None).army, NO_ARMY);
        let army = Army::new("Ultramarines");
        assert_eq!(CacheKey::new(&unit, Some(&army)).army, "Ultramarines");
    }

    #[test]
    fn test_cache_is_per_army() {
        let mut parser = AbilityParser::new();
        let unit = Unit::new("u1", "X").with_rule("r1");
        let army = Army::new("A").with_rule("r1", "Fly", "");

        let with_army = parser.parse_unit(&unit, Some(&army));
        let without = parser.parse_unit(&unit, None);
        assert!(with_army.can_fly);
        assert!(!without.can_fly);
        assert_eq!(parser.cache_len(), 2);
    }

    #[test]
    fn test_unit_rerolls_accessor() {
        let mut parser = AbilityParser::new();
        let unit = Unit::new("u1", "Captain").with_ability("You can re-roll wound rolls of 1 for this model.");
        let rerolls = parser.unit_rerolls(&unit, None);
        assert_eq!(rerolls.wounds, RerollKind::Ones);
        assert_eq!(rerolls.hits, RerollKind::None);
    }
}
