//! Aura detection and application across units

use std::path::Path;
use warcalc::abilities::AbilityParser;
use warcalc::army::{Army, Unit, Weapon};
use warcalc::aura::{
    apply_aura_effects, apply_to_target, AbilityDefinition, AbilityEffect, AbilityRegistry, AuraEngine,
    AuraSource, AuraTarget, EffectType,
};
use warcalc::combat::{calculate_unit_damage, DamageOptions, RerollKind};
use warcalc::core::Vec2;

fn source(id: &str, name: &str, effect: AbilityEffect) -> AuraSource {
    AuraSource::new(id, Vec2::new(0.0, 0.0), effect, name)
}

#[test]
fn test_reroll_aura_range_and_friendliness() {
    let auras = vec![source(
        "captain",
        "Rites of Battle",
        AbilityEffect::reroll_hits(RerollKind::Ones, 6.0),
    )];

    let near = apply_aura_effects(Vec2::new(5.0, 0.0), &auras, true);
    assert_eq!(near.hit_reroll, Some(RerollKind::Ones));
    assert_eq!(near.sources, vec!["Rites of Battle"]);

    let far = apply_aura_effects(Vec2::new(10.0, 0.0), &auras, true);
    assert!(far.is_empty());

    for distance in [0.0, 5.0, 10.0] {
        let enemy = apply_aura_effects(Vec2::new(distance, 0.0), &auras, false);
        assert!(enemy.is_empty());
    }
}

#[test]
fn test_hit_modifiers_from_distinct_sources_sum() {
    let auras = vec![
        source("a", "Banner", AbilityEffect::new(EffectType::ModifierHit).with_value(1.0).with_range(6.0)),
        source("b", "Litany", AbilityEffect::new(EffectType::ModifierHit).with_value(1.0).with_range(6.0)),
    ];
    let applied = apply_aura_effects(Vec2::new(3.0, 0.0), &auras, true);
    assert_eq!(applied.hit_modifier, 2);
}

#[test]
fn test_reroll_kinds_resolve_to_strongest() {
    let auras = vec![
        source("a", "Rites", AbilityEffect::reroll_hits(RerollKind::Ones, 6.0)),
        source("b", "Chapter Master", AbilityEffect::reroll_hits(RerollKind::Failed, 6.0)),
        source("c", "Rites again", AbilityEffect::reroll_hits(RerollKind::Ones, 6.0)),
    ];
    let applied = apply_aura_effects(Vec2::new(1.0, 1.0), &auras, true);
    assert_eq!(applied.hit_reroll, Some(RerollKind::Failed));
    assert_eq!(applied.rerolls().hits, RerollKind::Failed);
}

#[test]
fn test_two_ones_auras_stay_ones() {
    let auras = vec![
        source("a", "Rites", AbilityEffect::reroll_hits(RerollKind::Ones, 6.0)),
        source("b", "Rites", AbilityEffect::reroll_hits(RerollKind::Ones, 6.0)),
    ];
    let applied = apply_aura_effects(Vec2::new(1.0, 0.0), &auras, true);
    assert_eq!(applied.hit_reroll, Some(RerollKind::Ones));
}

#[test]
fn test_own_aura_not_counted_twice() {
    let text = "While a friendly unit is within 6\" of this model, add 1 to the Hit roll.";
    let champion = Unit::new("champion", "Company Champion")
        .with_ability(text)
        .with_weapon(
            Weapon::new("blade", "Blade")
                .with("a", "6")
                .with("ws", "4+")
                .with("s", "4")
                .with("d", "1"),
        );

    let mut parser = AbilityParser::new();
    let snapshot = parser.parse_unit(&champion, None);
    assert_eq!(snapshot.hit_modifier, 1);

    let registry = AbilityRegistry::new();
    let auras = AuraEngine::new(&registry).detect_auras(&champion, None, Vec2::default());
    assert_eq!(auras.len(), 1);

    let target = AuraTarget::friendly(Vec2::default()).with_unit_id("champion");
    let applied = apply_to_target(&target, &auras);
    assert_eq!(applied.hit_modifier, 0);

    let options = DamageOptions::default().with_auras(&applied);
    let result = calculate_unit_damage(&champion, 4.0, &options, Some(&snapshot));
    // 4+ becomes 3+ once, not 2+
    assert!((result.weapons[0].breakdown.hit_probability - 2.0 / 3.0).abs() < 1e-9);

    let neighbour = AuraTarget::friendly(Vec2::new(2.0, 0.0)).with_unit_id("squad");
    assert_eq!(apply_to_target(&neighbour, &auras).hit_modifier, 1);
}

#[test]
fn test_detection_dedupes_within_one_unit() {
    let unit = Unit::new("cm", "Chapter Master")
        .with_ability("Friendly units within 6\" of this model can re-roll hit rolls of 1.")
        .with_ability("Friendly units within 12\" of this model can re-roll hit rolls of 1.")
        .with_ability("Units within 3\" of this model have the benefit of cover.");

    let registry = AbilityRegistry::new();
    let auras = AuraEngine::new(&registry).detect_auras(&unit, None, Vec2::new(4.0, 4.0));
    let keys: Vec<_> = auras.iter().map(|a| (a.effect.effect_type, a.radius)).collect();
    assert_eq!(keys, vec![(EffectType::RerollHits, 6.0), (EffectType::Cover, 3.0)]);
    assert!(auras.iter().all(|a| a.source_unit_id == "cm"));
}

#[test]
fn test_registry_definition_by_dictionary_name() {
    let mut registry = AbilityRegistry::with_defaults();
    registry.register_ability(
        AbilityDefinition::new("warlord-banner", "Warlord Banner")
            .with_effect(AbilityEffect::new(EffectType::ModifierWound).with_value(1.0).with_range(9.0)),
    );

    let unit = Unit::new("ancient", "Ancient").with_ability("banner");
    let army = Army::new("A").with_ability("banner", "Warlord Banner", "Hold the line.");

    let auras = AuraEngine::new(&registry).detect_auras(&unit, Some(&army), Vec2::default());
    assert_eq!(auras.len(), 1);
    assert_eq!(auras[0].name, "Warlord Banner");

    let applied = apply_aura_effects(Vec2::new(0.0, 9.0), &auras, true);
    assert_eq!(applied.wound_modifier, 1);
}

#[test]
fn test_registry_loaded_from_toml() {
    let registry = AbilityRegistry::load_toml(Path::new("tests/fixtures/abilities.toml")).expect("fixture loads");
    // built-ins survive, file entries replace by id
    assert!(registry.get("chapter-master-aura").is_some());
    let rites = registry.get("rites-of-battle").unwrap();
    assert_eq!(rites.effects[0].range, Some(9.0));

    let standard = registry.get("standard-of-the-emperor").unwrap();
    assert_eq!(standard.effects[1].effect_type, EffectType::Unknown);

    let unit = Unit::new("ancient", "Ancient").with_ability("Standard of the Emperor");
    let auras = AuraEngine::new(&registry).detect_auras(&unit, None, Vec2::default());
    assert_eq!(auras.len(), 2);

    let infantry = vec!["Infantry".to_string()];
    let target = AuraTarget::friendly(Vec2::new(1.0, 0.0)).with_keywords(&infantry);
    let applied = apply_to_target(&target, &auras);
    assert_eq!(applied.hit_modifier, 1);
    assert_eq!(applied.sources, vec!["Standard of the Emperor"]);
}
