//! Warcalc - combat resolution core for tabletop miniatures battles
//!
//! Reads unit rule text into structured capabilities, resolves positional
//! auras, and computes expected weapon damage.

pub mod abilities;
pub mod army;
pub mod aura;
pub mod combat;
pub mod core;
