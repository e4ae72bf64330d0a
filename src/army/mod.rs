//! Army list data model

mod loader;
pub mod unit;
pub mod weapon;

pub use loader::load_army;
pub use unit::{Army, InlineRule, LinkedWeapons, Reference, RuleEntry, Unit, UnitStats};
pub use weapon::{ProfileMode, Weapon};
