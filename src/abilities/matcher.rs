//! Case-insensitive pattern matching with optional context guards
//!
//! The regex crate has no lookaround, so patterns that must not match when a
//! qualifier follows ("re-roll hit rolls" vs "re-roll hit rolls of 1") carry
//! a veto regex tested against the text right after the match. Patterns that
//! must not match after a negation ("ignore invulnerable saves") carry a
//! guard regex tested against the text right before it.

use crate::core::numeric::parse_numeric;
use regex::{Captures, Regex};

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    veto: Option<Regex>,
    guard: Option<Regex>,
}

impl CompiledPattern {
    /// Compile a catalog pattern; `veto` is anchored to the end of the match
    pub fn new(pattern: &str, veto: Option<&str>) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("(?i){}", pattern))?;
        let veto = match veto {
            Some(v) => Some(Regex::new(&format!("(?i)^(?:{})", v))?),
            None => None,
        };
        Ok(Self { regex, veto, guard: None })
    }

    /// Reject matches whose preceding text ends with `guard`
    pub fn with_guard(mut self, guard: &str) -> Result<Self, regex::Error> {
        self.guard = Some(Regex::new(&format!(r"(?i)(?:{})\s*$", guard))?);
        Ok(self)
    }

    /// First match in `text` that is neither guarded by what precedes it nor
    /// vetoed by what follows it
    pub fn first_match<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex.captures_iter(text).find(|caps| {
            let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
            if let Some(guard) = &self.guard {
                if guard.is_match(&text[..start]) {
                    return false;
                }
            }
            match &self.veto {
                Some(veto) => !veto.is_match(&text[end..]),
                None => true,
            }
        })
    }
}

/// Numeric value of the first non-empty capture group
pub fn first_capture_value(caps: &Captures<'_>) -> Option<f64> {
    caps.iter()
        .skip(1)
        .flatten()
        .find(|m| !m.as_str().trim().is_empty())
        .map(|m| parse_numeric(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let pattern = CompiledPattern::new(r"deep\s?strike", None).unwrap();
        assert!(pattern.first_match("DEEP STRIKE").is_some());
        assert!(pattern.first_match("Deepstrike").is_some());
    }

    #[test]
    fn test_veto_skips_qualified_match() {
        let pattern = CompiledPattern::new(r"re-?roll\s+hit\s+rolls?", Some(r"\s+of\s+1")).unwrap();
        assert!(pattern.first_match("re-roll hit rolls of 1").is_none());
        assert!(pattern.first_match("re-roll hit rolls.").is_some());

        // a later unqualified phrase still matches
        let caps = pattern
            .first_match("re-roll hit rolls of 1. Elsewhere, reroll hit rolls")
            .unwrap();
        assert_eq!(caps.get(0).unwrap().as_str(), "reroll hit rolls");
    }

    #[test]
    fn test_guard_skips_negated_match() {
        let pattern = CompiledPattern::new(r"invulnerable\s+save\b", None)
            .unwrap()
            .with_guard(r"\bignores?")
            .unwrap();
        assert!(pattern.first_match("Attacks ignore invulnerable save rolls").is_none());
        assert!(pattern.first_match("It has an invulnerable save").is_some());

        let text = "This weapon ignores invulnerable save. The bearer has an invulnerable save";
        let caps = pattern.first_match(text).unwrap();
        assert!(text[..caps.get(0).unwrap().start()].ends_with("has an "));
    }

    #[test]
    fn test_first_non_empty_capture() {
        let pattern = CompiledPattern::new(r"save\s+(\d)\+|(\d)\+\s+inv", None).unwrap();
        let caps = pattern.first_match("a 5+ inv").unwrap();
        assert_eq!(first_capture_value(&caps), Some(5.0));

        let plain = CompiledPattern::new(r"fly", None).unwrap();
        let caps = plain.first_match("fly").unwrap();
        assert_eq!(first_capture_value(&caps), None);
    }
}
