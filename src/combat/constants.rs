//! Combat constants - all table values in one place
//!
//! Modifiers shift roll thresholds, never probabilities directly.

/// Chance that any single d6 roll is a natural 6
pub const CRIT_RATE: f64 = 1.0 / 6.0;

/// Best threshold a roll can be modified to
pub const BEST_THRESHOLD: u8 = 2;
/// Worst threshold a roll can be modified to
pub const WORST_THRESHOLD: u8 = 6;
/// Threshold used when a skill characteristic is missing or unreadable
pub const DEFAULT_SKILL_THRESHOLD: u8 = 4;

/// Damage dealt by each mortal wound
pub const MORTAL_WOUND_DAMAGE: f64 = 1.0;

/// Bonus used when Rapid Fire, Melta or Sustained Hits carry no number
pub const DEFAULT_KEYWORD_VALUE: f64 = 1.0;
