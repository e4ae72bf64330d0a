//! Range-aware aura patterns
//!
//! Every pattern starts at a literal `within N"` and stays inside one
//! sentence. Order is priority order: when two patterns produce the same
//! effect key for one unit, the earlier one wins.

use crate::abilities::matcher::CompiledPattern;
use crate::aura::effect::EffectType;
use crate::combat::reroll::RerollKind;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy)]
pub struct AuraPattern {
    pub key: &'static str,
    pub effect_type: EffectType,
    pub reroll: Option<RerollKind>,
    pub value: Option<f64>,
    /// Effect phrase; the `within N"` prefix is added on compile
    pub phrase: &'static str,
    pub veto: Option<&'static str>,
}

/// Captures the radius as group 1
const WITHIN: &str = r#"\bwithin\s+(\d+(?:\.\d+)?)\s*(?:"|”|″|''|-?\s*inch(?:es)?)[^.]*?"#;
const OF_ONE: &str = r"\s+(?:of|results?\s+of)\s+(?:a\s+)?1\b";

pub const AURA_PATTERNS: &[AuraPattern] = &[
    AuraPattern {
        key: "reroll_hits_ones_aura",
        effect_type: EffectType::RerollHits,
        reroll: Some(RerollKind::Ones),
        value: None,
        phrase: r"\bre-?roll\s+(?:a\s+|the\s+)?(?:unmodified\s+)?hit\s+rolls?\s+of\s+(?:a\s+)?1\b",
        veto: None,
    },
    AuraPattern {
        key: "reroll_wounds_ones_aura",
        effect_type: EffectType::RerollWounds,
        reroll: Some(RerollKind::Ones),
        value: None,
        phrase: r"\bre-?roll\s+(?:a\s+|the\s+)?(?:unmodified\s+)?wound\s+rolls?\s+of\s+(?:a\s+)?1\b",
        veto: None,
    },
    AuraPattern {
        key: "reroll_hits_aura",
        effect_type: EffectType::RerollHits,
        reroll: Some(RerollKind::Failed),
        value: None,
        phrase: r"\bre-?roll\s+(?:all\s+)?(?:failed\s+|the\s+)?hit\s+rolls?\b",
        veto: Some(OF_ONE),
    },
    AuraPattern {
        key: "reroll_wounds_aura",
        effect_type: EffectType::RerollWounds,
        reroll: Some(RerollKind::Failed),
        value: None,
        phrase: r"\bre-?roll\s+(?:all\s+)?(?:failed\s+|the\s+)?wound\s+rolls?\b",
        veto: Some(OF_ONE),
    },
    AuraPattern {
        key: "hit_modifier_aura",
        effect_type: EffectType::ModifierHit,
        reroll: None,
        value: Some(1.0),
        phrase: r"(?:\+1\s+to\s+(?:the\s+|its\s+|their\s+)?hit\b|\badd\s+1\s+to\s+(?:the\s+)?hit\s+rolls?\b)",
        veto: None,
    },
    AuraPattern {
        key: "cover_aura",
        effect_type: EffectType::Cover,
        reroll: None,
        value: None,
        phrase: r"\b(?:benefit\s+of\s+cover|have\s+cover|in\s+cover)\b",
        veto: None,
    },
];

pub static AURA_CATALOG: LazyLock<Vec<(&'static AuraPattern, CompiledPattern)>> = LazyLock::new(|| {
    AURA_PATTERNS
        .iter()
        .map(|p| {
            let pattern = format!("{}{}", WITHIN, p.phrase);
            (p, CompiledPattern::new(&pattern, p.veto).unwrap())
        })
        .collect()
});
