//! Ordered catalog of capability patterns
//!
//! Each entry writes exactly one snapshot field. Order only decides the order
//! of the ParsedAbility list, never the snapshot contents.

use crate::abilities::matcher::CompiledPattern;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Broad grouping of recognized capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityCategory {
    Deployment,
    Defensive,
    Movement,
    Combat,
    Objective,
    Sequencing,
}

/// The snapshot field a pattern writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Scout,
    Infiltrator,
    DeepStrike,
    Stealth,
    FeelNoPain,
    InvulnerableSave,
    Fly,
    AdvanceAndCharge,
    FallBackAndShoot,
    FallBackAndCharge,
    RerollFailedHits,
    RerollFailedWounds,
    RerollOnesHits,
    RerollOnesWounds,
    HitModifier,
    WoundModifier,
    ObjectiveSecured,
    FightsFirst,
    FightsLast,
}

/// One catalog entry
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub key: &'static str,
    pub category: AbilityCategory,
    pub capability: Capability,
    pub pattern: &'static str,
    pub default: Option<f64>,
    /// Rejects a match when the following text matches this
    pub veto: Option<&'static str>,
    /// Rejects a match when the preceding text ends with this
    pub guard: Option<&'static str>,
}

const INCH: &str = r#"(?:"|”|″|''|\s*-?\s*inch(?:es)?)"#;
const OF_ONE: &str = r"\s+(?:of|results?\s+of)\s+(?:a\s+)?1\b";
const NEGATED: &str = r"\b(?:ignores?|ignoring|cannot\s+use|can\s+not\s+use|cannot\s+make|no)(?:\s+(?:an?|the|any|its|their))?";

pub const PATTERN_RULES: &[PatternRule] = &[
    // deployment
    PatternRule {
        key: "scout",
        category: AbilityCategory::Deployment,
        capability: Capability::Scout,
        pattern: r"\bscouts?\b(?:\s+(\d+(?:\.\d+)?)\s*INCH?)?",
        default: Some(6.0),
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "infiltrator",
        category: AbilityCategory::Deployment,
        capability: Capability::Infiltrator,
        pattern: r"\binfiltrators?\b",
        default: None,
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "deep_strike",
        category: AbilityCategory::Deployment,
        capability: Capability::DeepStrike,
        pattern: r"\bdeep\s?strike\b",
        default: None,
        veto: None,
        guard: None,
    },
    // defensive
    PatternRule {
        key: "stealth",
        category: AbilityCategory::Defensive,
        capability: Capability::Stealth,
        pattern: r"\b(?:stealth|shadow|concealment|hard\s+to\s+hit)\b",
        default: Some(-1.0),
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "feel_no_pain",
        category: AbilityCategory::Defensive,
        capability: Capability::FeelNoPain,
        pattern: r"\bfeel\s+no\s+pain(?:\s+(\d)\+)?",
        default: Some(6.0),
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "invulnerable_save",
        category: AbilityCategory::Defensive,
        capability: Capability::InvulnerableSave,
        pattern: r"\binvulnerable\s+save\b(?:\s+of)?(?:\s+(\d)\+)?|\b(\d)\+\s+invulnerable\s+save\b",
        default: Some(4.0),
        veto: None,
        guard: Some(NEGATED),
    },
    // movement
    PatternRule {
        key: "fly",
        category: AbilityCategory::Movement,
        capability: Capability::Fly,
        pattern: r"\bfly\b",
        default: None,
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "advance_and_charge",
        category: AbilityCategory::Movement,
        capability: Capability::AdvanceAndCharge,
        pattern: r"\badvance[ds]?\s+and\s+(?:still\s+)?(?:declare\s+a\s+)?charge|\beligible\s+to\s+(?:declare\s+a\s+)?charge\s+in\s+a\s+turn\s+in\s+which\s+it\s+advanced",
        default: None,
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "fall_back_and_shoot",
        category: AbilityCategory::Movement,
        capability: Capability::FallBackAndShoot,
        pattern: r"\bfall(?:s|en)?\s+back\s+and\s+(?:still\s+)?shoot|\beligible\s+to\s+shoot\s+in\s+a\s+turn\s+in\s+which\s+it\s+fell\s+back",
        default: None,
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "fall_back_and_charge",
        category: AbilityCategory::Movement,
        capability: Capability::FallBackAndCharge,
        pattern: r"\bfall(?:s|en)?\s+back\s+and\s+(?:still\s+)?(?:declare\s+a\s+)?charge|\beligible\s+to\s+(?:declare\s+a\s+)?charge\s+in\s+a\s+turn\s+in\s+which\s+it\s+fell\s+back",
        default: None,
        veto: None,
        guard: None,
    },
    // combat
    PatternRule {
        key: "reroll_hits_failed",
        category: AbilityCategory::Combat,
        capability: Capability::RerollFailedHits,
        pattern: r"\bre-?roll\s+(?:all\s+)?(?:failed\s+|the\s+)?hit\s+rolls?\b",
        default: None,
        veto: Some(OF_ONE),
        guard: None,
    },
    PatternRule {
        key: "reroll_wounds_failed",
        category: AbilityCategory::Combat,
        capability: Capability::RerollFailedWounds,
        pattern: r"\bre-?roll\s+(?:all\s+)?(?:failed\s+|the\s+)?wound\s+rolls?\b",
        default: None,
        veto: Some(OF_ONE),
        guard: None,
    },
    PatternRule {
        key: "reroll_hits_ones",
        category: AbilityCategory::Combat,
        capability: Capability::RerollOnesHits,
        pattern: r"\bre-?roll\s+(?:a\s+|the\s+)?(?:unmodified\s+)?hit\s+rolls?\s+of\s+(?:a\s+)?1\b|\bre-?roll\s+(?:rolls\s+of\s+)?1s?\s+to\s+hit\b",
        default: None,
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "reroll_wounds_ones",
        category: AbilityCategory::Combat,
        capability: Capability::RerollOnesWounds,
        pattern: r"\bre-?roll\s+(?:a\s+|the\s+)?(?:unmodified\s+)?wound\s+rolls?\s+of\s+(?:a\s+)?1\b|\bre-?roll\s+(?:rolls\s+of\s+)?1s?\s+to\s+wound\b",
        default: None,
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "hit_modifier",
        category: AbilityCategory::Combat,
        capability: Capability::HitModifier,
        pattern: r"\+(\d)\s+to\s+(?:the\s+|its\s+|their\s+)?hit\b|\badd\s+(\d)\s+to\s+(?:the\s+)?hit\s+rolls?\b",
        default: Some(1.0),
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "wound_modifier",
        category: AbilityCategory::Combat,
        capability: Capability::WoundModifier,
        pattern: r"\+(\d)\s+to\s+(?:the\s+|its\s+|their\s+)?wound\b|\badd\s+(\d)\s+to\s+(?:the\s+)?wound\s+rolls?\b",
        default: Some(1.0),
        veto: None,
        guard: None,
    },
    // objective
    PatternRule {
        key: "objective_secured",
        category: AbilityCategory::Objective,
        capability: Capability::ObjectiveSecured,
        pattern: r"\bobjective\s+secured\b|\bob\s?sec\b",
        default: None,
        veto: None,
        guard: None,
    },
    // sequencing
    PatternRule {
        key: "fights_first",
        category: AbilityCategory::Sequencing,
        capability: Capability::FightsFirst,
        pattern: r"\bfights?\s+first\b",
        default: None,
        veto: None,
        guard: None,
    },
    PatternRule {
        key: "fights_last",
        category: AbilityCategory::Sequencing,
        capability: Capability::FightsLast,
        pattern: r"\bfights?\s+last\b",
        default: None,
        veto: None,
        guard: None,
    },
];

/// Catalog entries paired with their compiled patterns, in catalog order
pub static CATALOG: LazyLock<Vec<(&'static PatternRule, CompiledPattern)>> = LazyLock::new(|| {
    PATTERN_RULES
        .iter()
        .map(|rule| {
            let pattern = rule.pattern.replace("INCH", INCH);
            let mut compiled = CompiledPattern::new(&pattern, rule.veto).unwrap();
            if let Some(guard) = rule.guard {
                compiled = compiled.with_guard(guard).unwrap();
            }
            (rule, compiled)
        })
        .collect()
});
