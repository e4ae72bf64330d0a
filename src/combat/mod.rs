//! Expected-damage model
//!
//! Table-driven: probabilities come from lookup tables, special rules from
//! the weapon keyword line, rerolls from up to four scopes (weapon, unit,
//! scenario, aura) resolved best-of per slot.

pub mod constants;
pub mod damage;
pub mod one_time;
pub mod probability;
pub mod reroll;
pub mod special_rules;
pub mod unit_damage;

pub use damage::{calculate_weapon_damage, weapon_damage_profile, DamageBreakdown, DamageOptions};
pub use one_time::is_one_time_weapon;
pub use reroll::{RerollConfig, RerollKind};
pub use special_rules::SpecialRules;
pub use unit_damage::{calculate_unit_damage, damage_per_point, UnitDamage, WeaponDamage};
