//! Load army lists produced by the roster optimizer

use crate::army::unit::Army;
use crate::core::error::Result;
use std::fs;
use std::path::Path;

impl Army {
    pub fn from_json_str(content: &str) -> Result<Army> {
        let army: Army = serde_json::from_str(content)?;
        Ok(army)
    }
}

/// Load an army from a roster JSON file
pub fn load_army(path: &Path) -> Result<Army> {
    let contents = fs::read_to_string(path)?;
    let army = Army::from_json_str(&contents)?;

    tracing::debug!(
        "Loaded army {:?} ({} units, {} rules, {} abilities) from {:?}",
        army.army_name,
        army.units.len(),
        army.rules.len(),
        army.abilities.len(),
        path
    );

    Ok(army)
}
