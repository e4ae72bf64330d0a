//! Damage Table
//!
//! Loads an army roster and prints each unit's expected damage against a set
//! of target toughness values, with the capabilities read from its rules.

use clap::Parser;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use warcalc::abilities::{AbilityParser, CapabilitySnapshot};
use warcalc::army::{load_army, Army};
use warcalc::aura::{AbilityRegistry, AuraEngine, CombatPhase};
use warcalc::combat::{calculate_unit_damage, DamageOptions, UnitDamage};
use warcalc::core::error::Result;
use warcalc::core::{load_config, CalculatorConfig, Vec2};

/// Damage Table - expected damage per unit and toughness
#[derive(Parser, Debug)]
#[command(name = "damage_table")]
#[command(about = "Print expected damage per unit against a set of toughness values")]
struct Args {
    /// Army roster JSON
    #[arg(long)]
    army: PathBuf,

    /// Target toughness; repeat for more columns (overrides the config)
    #[arg(long, short = 't')]
    toughness: Vec<f64>,

    /// Calculator config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra ability definitions TOML
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Apply Rapid Fire and Melta bonuses
    #[arg(long)]
    optimal_range: bool,

    /// Use overcharge profiles
    #[arg(long)]
    overcharge: bool,

    /// Count one-time weapons
    #[arg(long)]
    include_one_time: bool,

    /// Only count weapons of one phase: shooting or fight
    #[arg(long)]
    phase: Option<String>,

    /// Print these registry definitions instead of the table
    #[arg(long)]
    ability: Vec<String>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// One table row
#[derive(Serialize)]
struct UnitRow {
    id: String,
    name: String,
    points: f64,
    damage: Vec<UnitDamage>,
    capabilities: Vec<String>,
    auras: Vec<String>,
}

impl UnitRow {
    fn headline(&self) -> f64 {
        self.damage.first().map_or(0.0, |d| d.total)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let config = resolve_config(&args)?;
    let registry = match args.registry.as_ref().or(config.registry.as_ref()) {
        Some(path) => AbilityRegistry::load_toml(path)?,
        None => AbilityRegistry::with_defaults(),
    };
    for definition in registry.definitions() {
        tracing::debug!("Ability {} ({} effects)", definition.id, definition.effects.len());
    }
    if !args.ability.is_empty() {
        let definitions = args
            .ability
            .iter()
            .map(|id| registry.require(id))
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }
    let army = load_army(&args.army)?;
    tracing::info!("Loaded {} ({} units)", army.army_name, army.units.len());

    let rows = build_rows(&army, &config, &registry);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => print_table(&army, &config, &rows),
    }

    Ok(())
}

/// Config file (or defaults) with command line flags layered on top
fn resolve_config(args: &Args) -> Result<CalculatorConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CalculatorConfig::new(),
    };
    if !args.toughness.is_empty() {
        config.toughness = args.toughness.clone();
    }
    config.optimal_range |= args.optimal_range;
    config.use_overcharge |= args.overcharge;
    config.include_one_time |= args.include_one_time;
    if let Some(phase) = &args.phase {
        config.phase = Some(phase.parse::<CombatPhase>()?);
    }
    config.validate()?;
    Ok(config)
}

fn build_rows(army: &Army, config: &CalculatorConfig, registry: &AbilityRegistry) -> Vec<UnitRow> {
    // Snapshots are Rc-cached per parser; take owned copies for the parallel pass
    let mut parser = AbilityParser::new();
    let snapshots: Vec<CapabilitySnapshot> = army
        .units
        .iter()
        .map(|unit| (*parser.parse_unit(unit, Some(army))).clone())
        .collect();

    let options = DamageOptions {
        use_overcharge: config.use_overcharge,
        include_one_time: config.include_one_time,
        optimal_range: config.optimal_range,
        scenario_rerolls: config.scenario_rerolls,
        phase: config.phase,
        ..Default::default()
    };

    // PARALLEL: one column per toughness value
    let columns: Vec<Vec<UnitDamage>> = config
        .toughness
        .par_iter()
        .map(|&toughness| {
            army.units
                .iter()
                .zip(&snapshots)
                .map(|(unit, snapshot)| calculate_unit_damage(unit, toughness, &options, Some(snapshot)))
                .collect()
        })
        .collect();

    let engine = AuraEngine::new(registry);
    let mut rows: Vec<UnitRow> = army
        .units
        .iter()
        .zip(&snapshots)
        .enumerate()
        .map(|(index, (unit, snapshot))| UnitRow {
            id: unit.id.clone(),
            name: unit.name.clone(),
            points: unit.points,
            damage: columns.iter().map(|column| column[index].clone()).collect(),
            capabilities: capability_flags(snapshot),
            auras: engine
                .detect_auras(unit, Some(army), Vec2::default())
                .iter()
                .map(|aura| format!("{} ({}, {}\")", aura.name, aura.effect.effect_type, aura.radius))
                .collect(),
        })
        .collect();

    rows.sort_by_key(|row| std::cmp::Reverse(OrderedFloat(row.headline())));
    rows
}

fn capability_flags(snapshot: &CapabilitySnapshot) -> Vec<String> {
    let mut flags = Vec::new();
    if snapshot.has_scout {
        flags.push(format!("Scout {}\"", snapshot.scout_distance.unwrap_or_default()));
    }
    for (on, label) in [
        (snapshot.has_infiltrator, "Infiltrators"),
        (snapshot.has_deep_strike, "Deep Strike"),
        (snapshot.has_stealth, "Stealth"),
        (snapshot.can_fly, "Fly"),
        (snapshot.can_advance_and_charge, "Advance+Charge"),
        (snapshot.can_fall_back_and_shoot, "Fall Back+Shoot"),
        (snapshot.can_fall_back_and_charge, "Fall Back+Charge"),
        (snapshot.has_objective_secured, "ObSec"),
        (snapshot.fights_first, "Fights First"),
        (snapshot.fights_last, "Fights Last"),
    ] {
        if on {
            flags.push(label.to_string());
        }
    }
    if let Some(fnp) = snapshot.feel_no_pain {
        flags.push(format!("FNP {}+", fnp));
    }
    if let Some(invuln) = snapshot.invulnerable_save {
        flags.push(format!("{}++", invuln));
    }
    if !snapshot.rerolls.is_empty() {
        flags.push(format!(
            "Re-roll hits:{} wounds:{}",
            snapshot.rerolls.hits, snapshot.rerolls.wounds
        ));
    }
    flags
}

fn print_table(army: &Army, config: &CalculatorConfig, rows: &[UnitRow]) {
    println!("{} ({}, {} pts)", army.army_name, army.faction, army.points_total);
    if let Some(phase) = config.phase {
        println!("{} phase weapons only", phase);
    }
    println!();

    let mut header = format!("{:<32} {:>6}", "Unit", "Pts");
    for toughness in &config.toughness {
        header.push_str(&format!(" {:>8}", format!("T{}", toughness)));
    }
    header.push_str(&format!(" {:>8}", "Dmg/Pt"));
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));

    for row in rows {
        let mut line = format!("{:<32} {:>6}", truncate(&row.name, 32), row.points);
        for damage in &row.damage {
            line.push_str(&format!(" {:>8.2}", damage.total));
        }
        let per_point = row.damage.first().map_or(0.0, |d| d.damage_per_point);
        line.push_str(&format!(" {:>8.4}", per_point));
        println!("{}", line);

        if !row.capabilities.is_empty() {
            println!("    {}", row.capabilities.join(", "));
        }
        for aura in &row.auras {
            println!("    aura: {}", aura);
        }
    }
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    name.chars().take(width - 1).chain(std::iter::once('~')).collect()
}
