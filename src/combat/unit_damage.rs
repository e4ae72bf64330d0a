//! Whole-unit damage output

use crate::abilities::CapabilitySnapshot;
use crate::army::{ProfileMode, Unit};
use crate::combat::damage::{weapon_damage_profile, DamageBreakdown, DamageOptions};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// One weapon's share of a unit's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDamage {
    pub weapon_id: String,
    pub weapon_name: String,
    pub breakdown: DamageBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDamage {
    pub unit_id: String,
    pub unit_name: String,
    pub toughness: f64,
    pub weapons: Vec<WeaponDamage>,
    pub total: f64,
    pub damage_per_point: f64,
}

/// Damage per point spent; 0 for free or unpriced units
pub fn damage_per_point(damage: f64, points: f64) -> f64 {
    if points <= 0.0 || !points.is_finite() || !damage.is_finite() {
        return 0.0;
    }
    damage / points
}

/// Ids of the linked profiles that are not in use for this calculation
fn inactive_profiles(unit: &Unit, use_overcharge: bool) -> AHashSet<&str> {
    let inactive = if use_overcharge {
        ProfileMode::Standard
    } else {
        ProfileMode::Overcharge
    };
    unit.linked_weapons
        .values()
        .filter(|group| group.has_both())
        .filter_map(|group| group.id_for(inactive))
        .collect()
}

/// Expected damage of every weapon a unit carries against `toughness`
///
/// The unit's own rerolls and flat modifiers from `snapshot` stack with the
/// ones already present in `options`.
pub fn calculate_unit_damage(
    unit: &Unit,
    toughness: f64,
    options: &DamageOptions<'_>,
    snapshot: Option<&CapabilitySnapshot>,
) -> UnitDamage {
    let mut options = *options;
    if options.unit_name.is_none() {
        options.unit_name = Some(unit.name.as_str());
    }
    if let Some(snapshot) = snapshot {
        options.unit_rerolls = options.unit_rerolls.merge(snapshot.rerolls);
        options.hit_modifier += snapshot.hit_modifier;
        options.wound_modifier += snapshot.wound_modifier;
    }

    let skipped = inactive_profiles(unit, options.use_overcharge);
    let weapons: Vec<WeaponDamage> = unit
        .all_weapons()
        .into_iter()
        .filter(|weapon| !skipped.contains(weapon.id.as_str()) && options.uses_weapon(weapon))
        .map(|weapon| WeaponDamage {
            weapon_id: weapon.id.clone(),
            weapon_name: weapon.name.clone(),
            breakdown: weapon_damage_profile(weapon, toughness, &options),
        })
        .collect();

    let total: f64 = weapons.iter().map(|w| w.breakdown.expected_damage).sum();
    tracing::debug!(
        "Unit {:?} deals {:.3} vs T{} across {} weapons",
        unit.name,
        total,
        toughness,
        weapons.len()
    );

    UnitDamage {
        unit_id: unit.id.clone(),
        unit_name: unit.name.clone(),
        toughness,
        weapons,
        total,
        damage_per_point: damage_per_point(total, unit.points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::army::{LinkedWeapons, Weapon};
    use crate::aura::CombatPhase;
    use crate::combat::reroll::{RerollConfig, RerollKind};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    fn plasma_unit() -> Unit {
        let standard = Weapon::new("std", "Plasma gun - standard")
            .with("a", "1")
            .with("bs", "3+")
            .with("s", "7")
            .with("d", "1");
        let supercharge = Weapon::new("hot", "Plasma gun - supercharge")
            .with("a", "1")
            .with("bs", "3+")
            .with("s", "8")
            .with("d", "2");
        let mut unit = Unit::new("u1", "Hellblasters").with_weapon(standard).with_weapon(supercharge);
        unit.points = 100.0;
        unit.linked_weapons.insert(
            "Plasma gun".into(),
            LinkedWeapons {
                standard: Some("std".into()),
                overcharge: Some("hot".into()),
            },
        );
        unit
    }

    #[test]
    fn test_damage_per_point_guards() {
        assert_eq!(damage_per_point(10.0, 0.0), 0.0);
        assert_eq!(damage_per_point(10.0, -5.0), 0.0);
        assert!(close(damage_per_point(10.0, 100.0), 0.1));
    }

    #[test]
    fn test_linked_profile_selection() {
        let unit = plasma_unit();
        let standard = calculate_unit_damage(&unit, 4.0, &DamageOptions::default(), None);
        assert_eq!(standard.weapons.len(), 1);
        assert_eq!(standard.weapons[0].weapon_id, "std");

        let options = DamageOptions {
            use_overcharge: true,
            ..Default::default()
        };
        let hot = calculate_unit_damage(&unit, 4.0, &options, None);
        assert_eq!(hot.weapons[0].weapon_id, "hot");
        assert!(hot.total > standard.total);
    }

    #[test]
    fn test_snapshot_rerolls_and_modifiers_merge() {
        let unit = plasma_unit();
        let snapshot = CapabilitySnapshot {
            rerolls: RerollConfig::hits(RerollKind::Failed),
            wound_modifier: 1,
            ..Default::default()
        };
        let result = calculate_unit_damage(&unit, 4.0, &DamageOptions::default(), Some(&snapshot));
        let breakdown = result.weapons[0].breakdown;
        assert_eq!(breakdown.hit_reroll, RerollKind::Failed);
        // S7 vs T4 wounds on 3+, +1 makes it 2+
        assert!(close(breakdown.wound_probability, 5.0 / 6.0));
    }

    #[test]
    fn test_phase_selects_ranged_or_melee_weapons() {
        let mut unit = plasma_unit();
        let mut sword = Weapon::new("sword", "Power sword")
            .with("a", "4")
            .with("ws", "3+")
            .with("s", "5")
            .with("d", "1");
        sword.weapon_type = "Melee Weapons".into();
        unit.weapons.push(sword);

        let ids = |phase: Option<CombatPhase>| -> Vec<String> {
            let options = DamageOptions {
                phase,
                ..Default::default()
            };
            calculate_unit_damage(&unit, 4.0, &options, None)
                .weapons
                .into_iter()
                .map(|w| w.weapon_id)
                .collect()
        };
        assert_eq!(ids(None), vec!["std", "sword"]);
        assert_eq!(ids(Some(CombatPhase::Any)), vec!["std", "sword"]);
        assert_eq!(ids(Some(CombatPhase::Shooting)), vec!["std"]);
        assert_eq!(ids(Some(CombatPhase::Fight)), vec!["sword"]);
    }

    #[test]
    fn test_nested_model_weapons_counted() {
        let mut unit = plasma_unit();
        unit.linked_weapons.clear();
        unit.weapons.clear();
        unit.models.push(Unit::new("m1", "Sergeant").with_weapon(
            Weapon::new("sword", "Power sword")
                .with("a", "6")
                .with("ws", "4+")
                .with("s", "4")
                .with("d", "1"),
        ));
        let result = calculate_unit_damage(&unit, 4.0, &DamageOptions::default(), None);
        assert_eq!(result.weapons.len(), 1);
        assert!(close(result.total, 1.5));
        assert!(close(result.damage_per_point, 0.015));
    }
}
