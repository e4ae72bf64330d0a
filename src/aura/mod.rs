//! Spatially scoped ability effects
//!
//! Detection (registry + range-aware text patterns) produces AuraSources;
//! application folds the in-range ones into AppliedAuraEffects per target.

pub mod catalog;
pub mod effect;
pub mod engine;
pub mod registry;

pub use effect::{AbilityEffect, AppliedAuraEffects, CombatPhase, EffectType, TargetScope};
pub use engine::{apply_aura_effects, apply_to_target, AuraEngine, AuraSource, AuraTarget};
pub use registry::{slugify, AbilityDefinition, AbilityRegistry};
