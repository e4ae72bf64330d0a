//! Searchable rule text for a unit
//!
//! Rule references come first, then ability references, each in insertion
//! order, joined by single spaces. Every source remembers the byte span it
//! occupies so a match can be traced back to the ability it came from.

use crate::army::{Army, Reference, Unit};
use std::ops::Range;

/// One resolved rule or ability contributing to the corpus
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityTextSource {
    /// Dictionary id, when the reference resolved against the army
    pub id: Option<String>,
    /// Display name (entry name, or the literal text itself)
    pub name: String,
    /// Text this source contributes to the corpus
    pub text: String,
}

/// Concatenated rule text with per-source spans
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    text: String,
    spans: Vec<(Range<usize>, usize)>,
    sources: Vec<AbilityTextSource>,
}

impl Corpus {
    pub fn build(unit: &Unit, army: Option<&Army>) -> Self {
        let sources = unit
            .rules
            .iter()
            .chain(unit.abilities.iter())
            .filter_map(|reference| resolve_reference(reference, army))
            .collect();
        Self::from_sources(sources)
    }

    pub fn from_sources(sources: Vec<AbilityTextSource>) -> Self {
        let mut text = String::new();
        let mut spans = Vec::with_capacity(sources.len());

        for (index, source) in sources.iter().enumerate() {
            if source.text.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            let start = text.len();
            text.push_str(&source.text);
            spans.push((start..text.len(), index));
        }

        Self { text, spans, sources }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sources(&self) -> &[AbilityTextSource] {
        &self.sources
    }

    /// The source whose text contains byte offset `at`
    pub fn source_at(&self, at: usize) -> Option<&AbilityTextSource> {
        self.spans
            .iter()
            .find(|(span, _)| span.contains(&at))
            .map(|(_, index)| &self.sources[*index])
    }
}

/// Resolve one reference to its text
///
/// Dictionary hits contribute "name description"; unresolved strings are used
/// as literal rule text; anything else is skipped.
pub fn resolve_reference(reference: &Reference, army: Option<&Army>) -> Option<AbilityTextSource> {
    match reference {
        Reference::Text(value) => {
            if let Some(entry) = army.and_then(|a| a.resolve(value)) {
                return Some(AbilityTextSource {
                    id: Some(value.clone()),
                    name: entry.name.clone(),
                    text: join_name_description(&entry.name, &entry.description),
                });
            }
            Some(AbilityTextSource {
                id: None,
                name: value.clone(),
                text: value.clone(),
            })
        }
        Reference::Inline(inline) => Some(AbilityTextSource {
            id: None,
            name: inline.name.clone(),
            text: join_name_description(&inline.name, &inline.description),
        }),
        Reference::Other(_) => None,
    }
}

fn join_name_description(name: &str, description: &str) -> String {
    match (name.is_empty(), description.is_empty()) {
        (_, true) => name.to_string(),
        (true, false) => description.to_string(),
        (false, false) => format!("{} {}", name, description),
    }
}
