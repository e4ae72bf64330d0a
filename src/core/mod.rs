//! Shared types, errors, stat parsing and calculator configuration

pub mod config;
pub mod error;
pub mod numeric;
pub mod types;

pub use config::{load_config, CalculatorConfig};
pub use numeric::{parse_numeric, parse_optional};
pub use types::{Inches, Vec2};
