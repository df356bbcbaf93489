use pretty_assertions::assert_eq;
use tripwire::{ExpressionCache, Value};

use crate::{arena, unit};

fn scenario(text: &str, enemies: Vec<Value>) -> Value {
    let subject = unit(10.0, 10.0, 40.0);
    let context = arena(&subject, vec![], enemies);
    ExpressionCache::new().evaluate(text, &subject, &context)
}

#[test]
fn test_concrete_scenarios() {
    let enemy = || vec![unit(12.0, 10.0, 80.0)];
    assert_eq!(
        scenario("distance(closest.enemy()?.pos) <= 2", enemy()),
        Value::Boolean(true)
    );
    assert_eq!(
        scenario("self.hp < self.maxHp * 0.5", enemy()),
        Value::Boolean(true)
    );
    assert_eq!(scenario("closest.enemy()?.pos", vec![]), Value::Absent);
    assert_eq!(scenario("true && false", enemy()), Value::Boolean(false));
    assert_eq!(scenario("true || false", enemy()), Value::Boolean(true));
    assert_eq!(scenario("1 / 0", enemy()), Value::Number(f64::INFINITY));
    assert!(scenario("0 / 0", enemy()).to_number().is_nan());
}

#[test]
fn test_standard_helpers() {
    let enemies = || {
        vec![
            unit(20.0, 10.0, 15.0),
            unit(13.0, 14.0, 90.0),
            unit(10.0, 30.0, 50.0),
        ]
    };
    assert_eq!(scenario("distance(closest.enemy().pos)", enemies()), Value::Number(5.0));
    assert_eq!(scenario("weakest.enemy().hp", enemies()), Value::Number(15.0));
    assert_eq!(scenario("healthiest.enemy().hp", enemies()), Value::Number(90.0));
    assert_eq!(scenario("count.enemies()", enemies()), Value::Number(3.0));
    assert_eq!(scenario("count.enemiesWithin(10)", enemies()), Value::Number(2.0));
    assert_eq!(scenario("centroid.enemies().y", enemies()), Value::Number(18.0));
    assert_eq!(scenario("round(hpFraction * 10)", enemies()), Value::Number(4.0));
    assert_eq!(scenario("closest.ally()", enemies()), Value::Null);
    assert_eq!(scenario("closest.ally()?.hp", enemies()), Value::Absent);
    assert_eq!(
        scenario("max(self.hp, weakest.enemy().hp, 3)", enemies()),
        Value::Number(40.0)
    );
}

#[test]
fn test_lazy_finders_run_only_when_referenced() {
    let subject = unit(0.0, 0.0, 40.0);
    let context = arena(&subject, vec![], vec![unit(1.0, 1.0, 10.0)]);
    let cache = ExpressionCache::new();

    cache.evaluate("self.hp < 50 || closest.enemy()", &subject, &context);
    assert_eq!(context.is_materialized("closest"), Some(false));

    cache.evaluate("weakest.enemy()?.hp < 50", &subject, &context);
    assert_eq!(context.is_materialized("weakest"), Some(true));
    assert_eq!(context.is_materialized("closest"), Some(false));
    assert_eq!(context.is_materialized("healthiest"), Some(false));
}

#[test]
fn test_repeated_evaluation_is_deterministic() {
    let subject = unit(10.0, 10.0, 40.0);
    let text = "random() < 0.5 || distance(closest.enemy()?.pos) > 3";
    let run = || {
        let cache = ExpressionCache::new();
        let context = arena(&subject, vec![], vec![unit(12.0, 10.0, 80.0)]);
        (0..8)
            .map(|_| cache.evaluate(text, &subject, &context))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());

    let cache = ExpressionCache::new();
    let context = arena(&subject, vec![], vec![unit(12.0, 10.0, 80.0)]);
    let first = cache.evaluate("self.hp * 2 + distance(closest.enemy().pos)", &subject, &context);
    for _ in 0..4 {
        assert_eq!(
            cache.evaluate("self.hp * 2 + distance(closest.enemy().pos)", &subject, &context),
            first
        );
    }
    assert_eq!(first, Value::Number(82.0));
}
