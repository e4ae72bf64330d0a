//! Caller-owned registry of pre-authored ability definitions
//!
//! Known named abilities ("Rites of Battle") carry structured effects so they
//! do not depend on how their rules text happens to be worded. New
//! definitions can be registered at runtime or loaded from TOML.

use crate::aura::effect::{AbilityEffect, EffectType};
use crate::combat::reroll::RerollKind;
use crate::core::error::{CalcError, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named ability with structured effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: Vec<AbilityEffect>,
}

impl AbilityDefinition {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            effects: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_effect(mut self, effect: AbilityEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Effects with a radius
    pub fn aura_effects(&self) -> impl Iterator<Item = &AbilityEffect> {
        self.effects.iter().filter(|e| e.range.is_some())
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    abilities: Vec<AbilityDefinition>,
}

/// Lowercase, dash-separated form of an ability name ("Rites of Battle" -> "rites-of-battle")
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Ability definitions indexed by id
#[derive(Debug, Clone, Default)]
pub struct AbilityRegistry {
    definitions: AHashMap<String, AbilityDefinition>,
}

impl AbilityRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in command abilities
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for definition in builtin_definitions() {
            registry.register_ability(definition);
        }
        registry
    }

    /// Add a definition, returning the one it replaced
    pub fn register_ability(&mut self, definition: AbilityDefinition) -> Option<AbilityDefinition> {
        tracing::debug!("Registering ability {:?}", definition.id);
        self.definitions.insert(definition.id.clone(), definition)
    }

    pub fn get(&self, id: &str) -> Option<&AbilityDefinition> {
        self.definitions.get(id)
    }

    /// Like [`get`](Self::get) but reports a missing id as an error
    pub fn require(&self, id: &str) -> Result<&AbilityDefinition> {
        self.get(id).ok_or_else(|| CalcError::UnknownAbility(id.to_string()))
    }

    /// Find a definition by id, or by the slug of a display name
    pub fn lookup(&self, id_or_name: &str) -> Option<&AbilityDefinition> {
        self.get(id_or_name).or_else(|| self.get(&slugify(id_or_name)))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions sorted by id
    pub fn definitions(&self) -> Vec<&AbilityDefinition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by(|a, b| a.id.cmp(&b.id));
        defs
    }

    /// Register every `[[abilities]]` table of a TOML document
    ///
    /// Returns how many definitions were registered.
    pub fn extend_from_toml_str(&mut self, content: &str) -> Result<usize> {
        let file: RegistryFile = toml::from_str(content)?;
        let count = file.abilities.len();
        for definition in file.abilities {
            if definition.effects.iter().any(|e| e.effect_type == EffectType::Unknown) {
                tracing::warn!("Ability {:?} has effects of an unknown type; they will be ignored", definition.id);
            }
            self.register_ability(definition);
        }
        Ok(count)
    }

    /// Built-ins plus the definitions in a TOML file
    pub fn load_toml(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut registry = Self::with_defaults();
        let count = registry.extend_from_toml_str(&contents)?;
        tracing::debug!("Loaded {} ability definitions from {:?}", count, path);
        Ok(registry)
    }
}

fn builtin_definitions() -> Vec<AbilityDefinition> {
    vec![
        AbilityDefinition::new("rites-of-battle", "Rites of Battle")
            .with_description("Friendly units within 6\" of this model can re-roll hit rolls of 1.")
            .with_effect(AbilityEffect::reroll_hits(RerollKind::Ones, 6.0)),
        AbilityDefinition::new("chapter-master-aura", "Chapter Master")
            .with_description("Friendly units within 6\" of this model can re-roll failed hit rolls.")
            .with_effect(AbilityEffect::reroll_hits(RerollKind::Failed, 6.0)),
        AbilityDefinition::new("tactical-precision", "Tactical Precision")
            .with_description("Friendly units within 6\" of this model can re-roll wound rolls of 1.")
            .with_effect(AbilityEffect::reroll_wounds(RerollKind::Ones, 6.0)),
    ]
}
