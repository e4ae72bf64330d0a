//! Reroll kinds and their effect on success probability
//!
//! Rerolls never stack. Every scope (weapon, unit, scenario, aura) offers a
//! kind per slot and the strongest one wins.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// What a reroll lets you re-attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RerollKind {
    #[default]
    None,
    /// Re-roll natural 1s
    Ones,
    /// Re-roll every failed roll
    Failed,
    /// Re-roll any roll; same strength as Failed for expected values
    All,
}

impl RerollKind {
    /// Strength for best-of resolution (None < Ones < Failed == All)
    pub fn rank(self) -> u8 {
        match self {
            RerollKind::None => 0,
            RerollKind::Ones => 1,
            RerollKind::Failed | RerollKind::All => 2,
        }
    }

    /// The stronger of two kinds; ties keep `self`
    pub fn stronger(self, other: RerollKind) -> RerollKind {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Strongest kind among any number of offers
    pub fn strongest<I: IntoIterator<Item = RerollKind>>(offers: I) -> RerollKind {
        offers
            .into_iter()
            .fold(RerollKind::None, |best, offer| best.stronger(offer))
    }

    /// Success probability after this reroll is applied to a roll that succeeds with `p`
    pub fn apply(self, p: f64) -> f64 {
        let rerolled = match self {
            RerollKind::None => p,
            // the 1/6 of rolls that come up 1 get a second try at p
            RerollKind::Ones => p + p / 6.0,
            RerollKind::Failed | RerollKind::All => p + (1.0 - p) * p,
        };
        rerolled.clamp(0.0, 1.0)
    }
}

/// Reroll offers for the hit and wound slots of one scope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RerollConfig {
    pub hits: RerollKind,
    pub wounds: RerollKind,
}

impl RerollConfig {
    pub fn new(hits: RerollKind, wounds: RerollKind) -> Self {
        Self { hits, wounds }
    }

    pub fn hits(kind: RerollKind) -> Self {
        Self { hits: kind, wounds: RerollKind::None }
    }

    pub fn wounds(kind: RerollKind) -> Self {
        Self { hits: RerollKind::None, wounds: kind }
    }

    /// Per-slot best of two configs
    pub fn merge(self, other: RerollConfig) -> RerollConfig {
        RerollConfig {
            hits: self.hits.stronger(other.hits),
            wounds: self.wounds.stronger(other.wounds),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits == RerollKind::None && self.wounds == RerollKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rank_ordering() {
        assert!(RerollKind::None.rank() < RerollKind::Ones.rank());
        assert!(RerollKind::Ones.rank() < RerollKind::Failed.rank());
        assert_eq!(RerollKind::Failed.rank(), RerollKind::All.rank());
    }

    #[test]
    fn test_strongest_never_stacks() {
        let best = RerollKind::strongest([RerollKind::Ones, RerollKind::Failed, RerollKind::Ones]);
        assert_eq!(best, RerollKind::Failed);
        assert_eq!(RerollKind::strongest([]), RerollKind::None);
        assert_eq!(RerollKind::strongest([RerollKind::Ones, RerollKind::Ones]), RerollKind::Ones);
    }

    #[test]
    fn test_apply_values() {
        let p = 2.0 / 3.0;
        assert!((RerollKind::None.apply(p) - p).abs() < 1e-12);
        assert!((RerollKind::Ones.apply(p) - 7.0 / 9.0).abs() < 1e-12);
        assert!((RerollKind::Failed.apply(p) - 8.0 / 9.0).abs() < 1e-12);
        assert!((RerollKind::All.apply(0.5) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_merge_is_per_slot() {
        let weapon = RerollConfig::hits(RerollKind::Ones);
        let unit = RerollConfig::new(RerollKind::None, RerollKind::Failed);
        let merged = weapon.merge(unit);
        assert_eq!(merged.hits, RerollKind::Ones);
        assert_eq!(merged.wounds, RerollKind::Failed);
        assert!(!merged.is_empty());
        assert!(RerollConfig::default().is_empty());
    }

    #[test]
    fn test_deserialize_lowercase() {
        let config: RerollConfig = serde_json::from_str(r#"{"hits":"all"}"#).unwrap();
        assert_eq!(config.hits, RerollKind::All);
        assert_eq!(config.wounds, RerollKind::None);
    }

    proptest! {
        #[test]
        fn reroll_never_lowers_probability(p in 0.0f64..=1.0) {
            for kind in [RerollKind::None, RerollKind::Ones, RerollKind::Failed, RerollKind::All] {
                let q = kind.apply(p);
                prop_assert!(q >= p - 1e-12);
                prop_assert!(q <= 1.0);
            }
        }
    }
}
