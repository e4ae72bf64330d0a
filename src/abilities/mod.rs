//! Free-text ability extraction
//!
//! Unit rule text -> Corpus -> ordered pattern catalog -> CapabilitySnapshot

pub mod catalog;
pub mod corpus;
pub mod matcher;
pub mod parser;
pub mod snapshot;

pub use catalog::{AbilityCategory, Capability, PatternRule, PATTERN_RULES};
pub use corpus::{AbilityTextSource, Corpus};
pub use parser::{extract_capabilities, AbilityParser, CacheKey, NO_ARMY};
pub use snapshot::{CapabilitySnapshot, ParsedAbility};
