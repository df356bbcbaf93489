//! Differential tests: every specialized shape must answer what parse +
//! evaluate answers for the same text and context.

use proptest::prelude::*;
use tripwire::helpers::roster::{position, squared_distance};
use tripwire::{Context, EngineConfig, ExpressionCache, Tier, Value};

use crate::{arena, unit};

fn ordering() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["<", "<=", ">", ">="])
}

fn coordinate() -> impl Strategy<Value = f64> {
    prop_oneof![(0i32..40).prop_map(f64::from), -50.0f64..50.0]
}

fn threshold() -> impl Strategy<Value = f64> {
    prop_oneof![(0u32..30).prop_map(f64::from), 0.0f64..30.0]
}

/// Exact distance to the closest enemy, the value a threshold is most
/// likely to round badly against.
fn closest_distance(subject: &Value, enemies: &[Value]) -> Option<f64> {
    let origin = position(subject)?;
    enemies
        .iter()
        .filter_map(position)
        .map(|p| squared_distance(origin, p))
        .min_by(|a, b| a.total_cmp(b))
        .map(f64::sqrt)
}

fn enemies() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(
        (coordinate(), coordinate()).prop_map(|(x, y)| unit(x, y, 50.0)),
        0..4,
    )
}

fn generic_cache() -> ExpressionCache {
    ExpressionCache::with_config(EngineConfig {
        specialization: false,
        ..EngineConfig::default()
    })
}

/// Evaluates `text` on both tiers, asserting the fast one really specialized.
fn both_tiers(text: &str, subject: &Value, context: &Context) -> (Value, Value) {
    let specialized = ExpressionCache::new().compile(text);
    assert!(
        matches!(specialized.tier(), Tier::Specialized(_)),
        "not specialized: {}",
        text
    );
    let generic = generic_cache().compile(text);
    assert_eq!(generic.tier(), Tier::Generic);
    (
        specialized.call(subject, context),
        generic.call(subject, context),
    )
}

fn subject_with_hp(hp: u32, max_hp: u32) -> Value {
    Value::object([
        ("pos", Value::point(10.0, 10.0)),
        ("hp", Value::Number(f64::from(hp))),
        ("maxHp", Value::Number(f64::from(max_hp))),
    ])
}

proptest! {
    #[test]
    fn hp_threshold_matches_generic(hp in 0u32..150, op in ordering(), limit in 0u32..150) {
        let subject = subject_with_hp(hp, 100);
        let text = format!("self.hp {} {}", op, limit);
        let (fast, slow) = both_tiers(&text, &subject, &Context::empty());
        prop_assert_eq!(fast, slow);
    }

    #[test]
    fn hp_fraction_matches_generic(
        hp in 0u32..150,
        max_hp in 1u32..150,
        op in ordering(),
        whole in 0u32..2,
        hundredths in 0u32..100,
    ) {
        let subject = subject_with_hp(hp, max_hp);
        let text = format!("self.hp {}self.maxHp*{}.{:02}", op, whole, hundredths);
        let (fast, slow) = both_tiers(&text, &subject, &Context::empty());
        prop_assert_eq!(fast, slow);
    }

    #[test]
    fn distance_threshold_matches_generic(
        x in coordinate(),
        y in coordinate(),
        enemies in enemies(),
        op in ordering(),
        limit in threshold(),
        on_edge in any::<bool>(),
        optional in any::<bool>(),
    ) {
        let subject = unit(x, y, 50.0);
        let limit = closest_distance(&subject, &enemies)
            .filter(|_| on_edge)
            .unwrap_or(limit);
        let context = arena(&subject, vec![], enemies);
        let access = if optional { "?." } else { "." };
        let text = format!("distance(closest.enemy(){}pos) {} {}", access, op, limit);
        let (fast, slow) = both_tiers(&text, &subject, &context);
        prop_assert_eq!(fast, slow);
    }

    #[test]
    fn distance_range_matches_generic(
        x in coordinate(),
        y in coordinate(),
        enemies in enemies(),
        lower_op in prop::sample::select(vec![">", ">="]),
        upper_op in prop::sample::select(vec!["<", "<="]),
        lower in threshold(),
        span in threshold(),
        on_edge in 0usize..3,
    ) {
        let subject = unit(x, y, 50.0);
        let (lower, upper) = match closest_distance(&subject, &enemies) {
            Some(edge) if on_edge == 1 => (edge, edge + span),
            Some(edge) if on_edge == 2 => ((edge - span).max(0.0), edge),
            _ => (lower, lower + span),
        };
        let context = arena(&subject, vec![], enemies);
        let text = format!(
            "distance(closest.enemy()?.pos) {} {} && distance(closest.enemy()?.pos) {} {}",
            lower_op, lower, upper_op, upper
        );
        let (fast, slow) = both_tiers(&text, &subject, &context);
        prop_assert_eq!(fast, slow);
    }

    #[test]
    fn compound_shapes_match_generic(
        hp in 0u32..100,
        enemies in enemies(),
        first in ordering(),
        second in ordering(),
        limit in 0u32..100,
        range in 0u32..30,
        flag in any::<bool>(),
        shape in 0usize..4,
    ) {
        let subject = Value::object([
            ("pos", Value::point(10.0, 10.0)),
            ("hp", Value::Number(f64::from(hp))),
            ("maxHp", Value::Number(100.0)),
        ]);
        let context = arena(&subject, vec![], enemies);
        let hp_check = format!("self.hp {} {}", first, limit);
        let distance_check = format!("distance(closest.enemy()?.pos) {} {}", second, range);
        let text = match shape {
            0 => format!("{} && {}", hp_check, distance_check),
            1 => format!("{} || {}", distance_check, hp_check),
            2 => format!("({} || {}) && {}", hp_check, flag, distance_check),
            _ => format!("{} && {} || ({})", flag, hp_check, distance_check),
        };
        let (fast, slow) = both_tiers(&text, &subject, &context);
        prop_assert_eq!(fast, slow);
    }
}

#[test]
fn boolean_literals_match_generic() {
    for text in ["true", "false", " ( true ) ", "true && false", "false || true"] {
        let (fast, slow) = both_tiers(text, &Value::Absent, &Context::empty());
        assert_eq!(fast, slow, "{}", text);
    }
}

#[test]
fn rounded_threshold_matches_generic() {
    // sqrt(2) の二乗は 2 より大きく丸められる
    let subject = unit(0.0, 0.0, 50.0);
    let context = arena(&subject, vec![], vec![unit(1.0, 1.0, 50.0)]);
    for (op, expected) in [("<", false), ("<=", true), (">", false), (">=", true)] {
        let text = format!("distance(closest.enemy()?.pos) {} 1.4142135623730951", op);
        let (fast, slow) = both_tiers(&text, &subject, &context);
        assert_eq!(fast, slow, "{}", text);
        assert_eq!(fast, Value::Boolean(expected), "{}", text);
    }

    let text = "distance(closest.enemy()?.pos) >= 1.4142135623730951 && distance(closest.enemy()?.pos) < 1.4142135623730951";
    let (fast, slow) = both_tiers(text, &subject, &context);
    assert_eq!(fast, slow);
    assert_eq!(fast, Value::Boolean(false));
}

#[test]
fn missing_data_matches_generic() {
    let subject = Value::object([("hp", Value::Number(10.0))]);
    for text in [
        "self.hp < self.maxHp * 0.5",
        "distance(closest.enemy()?.pos) < 5",
        "distance(closest.enemy()?.pos) >= 0",
    ] {
        let (fast, slow) = both_tiers(text, &subject, &Context::empty());
        assert_eq!(fast, slow, "{}", text);
        assert_eq!(fast, Value::Boolean(false));
    }
}
