//! Once-per-battle weapon detection

use crate::army::Weapon;

const ONE_TIME_PHRASES: &[&str] = &[
    "seeker missile",
    "missile drone",
    "one-time",
    "one time",
    "single-use",
    "single use",
    "hunter-killer",
    "hunter killer",
];

/// Racks reload; a "seeker missile rack" is not a one-shot weapon
const RACK: &str = "rack";
const SEEKER_RACK: &str = "seeker missile rack";

/// Units whose plain "missile" profiles are single shots
const MISSILE_UNITS: &[&str] = &["hammerhead", "longstrike"];

/// Whether a weapon can be fired only once per battle
///
/// Explicit flags win; otherwise the weapon's name and keywords are scanned.
pub fn is_one_time_weapon(weapon: &Weapon, unit_name: Option<&str>) -> bool {
    if weapon.one_time {
        return true;
    }

    let text = format!("{} {}", weapon.name, weapon.keywords()).to_lowercase();
    let has_seeker_rack = text.contains(SEEKER_RACK);

    let phrase_hit = ONE_TIME_PHRASES
        .iter()
        .filter(|phrase| !(has_seeker_rack && **phrase == "seeker missile"))
        .any(|phrase| text.contains(phrase));
    if phrase_hit {
        return true;
    }

    let Some(unit_name) = unit_name.map(str::to_lowercase) else {
        return false;
    };
    MISSILE_UNITS.iter().any(|u| unit_name.contains(u)) && text.contains("missile") && !text.contains(RACK)
}
