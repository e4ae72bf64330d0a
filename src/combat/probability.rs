//! Hit and wound probability tables
//!
//! Lookup tables, not formulas. A +1 modifier moves the roll threshold one
//! step (3+ becomes 2+), clamped to the 2+..6+ range of the table.

use crate::combat::constants::{BEST_THRESHOLD, DEFAULT_SKILL_THRESHOLD, WORST_THRESHOLD};
use crate::core::numeric::parse_numeric;

/// Success probability of a single d6 roll needing `threshold`+
pub fn threshold_probability(threshold: u8) -> f64 {
    match threshold.clamp(BEST_THRESHOLD, WORST_THRESHOLD) {
        2 => 5.0 / 6.0,
        3 => 2.0 / 3.0,
        4 => 1.0 / 2.0,
        5 => 1.0 / 3.0,
        _ => 1.0 / 6.0,
    }
}

/// Shift a threshold by a flat modifier (+1 makes the roll easier)
pub fn modified_threshold(threshold: u8, modifier: i32) -> u8 {
    let shifted = i32::from(threshold) - modifier;
    shifted.clamp(i32::from(BEST_THRESHOLD), i32::from(WORST_THRESHOLD)) as u8
}

/// Read a skill characteristic ("3+") as a table threshold
///
/// Returns None for anything the table does not cover.
pub fn skill_threshold(skill: Option<&str>) -> Option<u8> {
    let value = parse_numeric(skill?);
    if value.fract() != 0.0 {
        return None;
    }
    match value as i64 {
        v @ 2..=6 => Some(v as u8),
        _ => None,
    }
}

/// Hit probability for a ballistic/weapon skill string
pub fn hit_probability(skill: Option<&str>, modifier: i32) -> f64 {
    let threshold = skill_threshold(skill).unwrap_or(DEFAULT_SKILL_THRESHOLD);
    threshold_probability(modified_threshold(threshold, modifier))
}

/// Roll needed to wound, from the strength vs toughness comparison
pub fn wound_threshold(strength: f64, toughness: f64) -> u8 {
    if strength >= 2.0 * toughness {
        2
    } else if strength > toughness {
        3
    } else if strength == toughness {
        4
    } else if toughness >= 2.0 * strength {
        6
    } else {
        5
    }
}

pub fn wound_probability(strength: f64, toughness: f64, modifier: i32) -> f64 {
    threshold_probability(modified_threshold(wound_threshold(strength, toughness), modifier))
}
