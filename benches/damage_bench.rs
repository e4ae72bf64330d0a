//! Damage model and text extraction benchmarks
//!
//! Run with: cargo bench --bench damage_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use warcalc::abilities::{extract_capabilities, AbilityParser};
use warcalc::army::{Unit, Weapon};
use warcalc::combat::{calculate_unit_damage, calculate_weapon_damage, DamageOptions};

const CAPTAIN_TEXT: &str = "Deep Strike. Scouts 6\". This model has a 4+ invulnerable save. \
    While this model is leading a unit, each time a model in that unit makes an attack, \
    you can re-roll a Hit roll of 1. Feel No Pain 5+.";

fn squad(weapons: usize) -> Unit {
    (0..weapons).fold(Unit::new("squad", "Intercessor Squad"), |unit, i| {
        unit.with_weapon(
            Weapon::new(&format!("w{}", i), "Bolt rifle")
                .with("a", "2")
                .with("bs", "3+")
                .with("s", "4")
                .with("ap", "-1")
                .with("d", "D3")
                .with("keywords", "Assault, Heavy, Sustained Hits 1, Lethal Hits"),
        )
    })
}

fn bench_weapon_damage(c: &mut Criterion) {
    let weapon = squad(1).weapons.remove(0);
    let options = DamageOptions::default();
    c.bench_function("weapon_damage", |b| {
        b.iter(|| calculate_weapon_damage(black_box(&weapon), black_box(4.0), &options))
    });
}

fn bench_unit_damage(c: &mut Criterion) {
    let mut group = c.benchmark_group("unit_damage");
    for weapons in [1, 5, 20].iter() {
        let unit = squad(*weapons);
        group.bench_with_input(BenchmarkId::from_parameter(weapons), &unit, |b, unit| {
            b.iter(|| calculate_unit_damage(black_box(unit), 4.0, &DamageOptions::default(), None))
        });
    }
    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    c.bench_function("extract_capabilities", |b| {
        b.iter(|| extract_capabilities(black_box(CAPTAIN_TEXT)))
    });

    let unit = Unit::new("captain", "Captain").with_ability(CAPTAIN_TEXT);
    let mut parser = AbilityParser::new();
    c.bench_function("parse_unit_cached", |b| b.iter(|| parser.parse_unit(black_box(&unit), None)));
}

criterion_group!(benches, bench_weapon_damage, bench_unit_damage, bench_extraction);
criterion_main!(benches);
