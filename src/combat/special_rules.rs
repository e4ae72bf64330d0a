//! Weapon special rules read from the free-text keyword line
//!
//! "Rapid Fire 1, Melta 2, Twin-linked" becomes a SpecialRules value. Keyword
//! numbers may be dice averages ("Sustained Hits D3").

use crate::combat::constants::DEFAULT_KEYWORD_VALUE;
use crate::core::numeric::parse_numeric;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const KEYWORD_NUMBER: &str = r"(\d*d\d+(?:\s*\+\s*\d+)?|\d+(?:\.\d+)?)";

static RAPID_FIRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\brapid[\s-]+fire\b(?:\s+{})?", KEYWORD_NUMBER)).unwrap());
static MELTA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\bmelta\b(?:\s+{})?", KEYWORD_NUMBER)).unwrap());
static SUSTAINED_HITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\bsustained\s+hits\b(?:\s+{})?", KEYWORD_NUMBER)).unwrap());
static LETHAL_HITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\blethal\s+hits\b").unwrap());
static DEVASTATING_WOUNDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdevastating\s+wounds\b").unwrap());
static TWIN_LINKED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btwin[\s-]?linked\b").unwrap());
static TORRENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btorrent\b").unwrap());

/// Special rules that change the attack sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialRules {
    /// Hits automatically
    pub torrent: bool,
    /// Re-roll failed wounds, replacing any weapon-level wound reroll
    pub twin_linked: bool,
    /// Critical hits wound automatically
    pub lethal_hits: bool,
    /// Critical wounds become mortal wounds
    pub devastating_wounds: bool,
    /// Extra attacks at optimal range
    pub rapid_fire: Option<f64>,
    /// Extra damage at optimal range
    pub melta: Option<f64>,
    /// Extra hits per critical hit
    pub sustained_hits: Option<f64>,
}

fn keyword_value(regex: &Regex, text: &str) -> Option<f64> {
    regex.captures(text).map(|caps| {
        caps.get(1)
            .map(|m| parse_numeric(m.as_str()))
            .unwrap_or(DEFAULT_KEYWORD_VALUE)
    })
}

impl SpecialRules {
    pub fn from_keywords(keywords: &str) -> Self {
        Self {
            torrent: TORRENT.is_match(keywords),
            twin_linked: TWIN_LINKED.is_match(keywords),
            lethal_hits: LETHAL_HITS.is_match(keywords),
            devastating_wounds: DEVASTATING_WOUNDS.is_match(keywords),
            rapid_fire: keyword_value(&RAPID_FIRE, keywords),
            melta: keyword_value(&MELTA, keywords),
            sustained_hits: keyword_value(&SUSTAINED_HITS, keywords),
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keywords() {
        assert!(SpecialRules::from_keywords("").is_plain());
        assert!(SpecialRules::from_keywords("-").is_plain());
        assert!(SpecialRules::from_keywords("Assault, Heavy, Pistol").is_plain());
    }

    #[test]
    fn test_numbered_keywords() {
        let rules = SpecialRules::from_keywords("Rapid Fire 2, Melta 4, Sustained Hits D3");
        assert_eq!(rules.rapid_fire, Some(2.0));
        assert_eq!(rules.melta, Some(4.0));
        assert_eq!(rules.sustained_hits, Some(2.0));
    }

    #[test]
    fn test_dice_rapid_fire() {
        let rules = SpecialRules::from_keywords("rapid fire D3");
        assert_eq!(rules.rapid_fire, Some(2.0));
    }

    #[test]
    fn test_flags() {
        let rules = SpecialRules::from_keywords("Twin-linked, Lethal Hits, Devastating Wounds, Torrent");
        assert!(rules.twin_linked);
        assert!(rules.lethal_hits);
        assert!(rules.devastating_wounds);
        assert!(rules.torrent);
        assert!(SpecialRules::from_keywords("twin linked").twin_linked);
    }

    #[test]
    fn test_unnumbered_keyword_defaults() {
        let rules = SpecialRules::from_keywords("Sustained Hits");
        assert_eq!(rules.sustained_hits, Some(DEFAULT_KEYWORD_VALUE));
    }
}
