use pretty_assertions::assert_eq;
use tripwire::{CacheStats, Context, EngineConfig, ExpressionCache, Tier, Value};

use crate::{arena, unit};

#[test]
fn test_cache_identity() {
    let cache = ExpressionCache::new();
    let first = cache.compile("self.hp < 50");
    let second = cache.compile("self.hp < 50");
    assert!(first.ptr_eq(&second));

    // 別インスタンスでも振る舞いは同じ
    let other = ExpressionCache::new().compile("self.hp < 50");
    for hp in [0.0, 49.0, 50.0, 51.0, f64::NAN] {
        let subject = unit(0.0, 0.0, hp);
        let context = arena(&subject, vec![], vec![]);
        assert_eq!(
            first.call(&subject, &context),
            other.call(&subject, &context)
        );
    }
}

#[test]
fn test_tier_selection_and_stats() {
    let cache = ExpressionCache::new();
    let texts = [
        ("distance(closest.enemy()?.pos) <= 2", Tier::Specialized("distance threshold")),
        ("self.hp < self.maxHp * 0.3", Tier::Specialized("hp fraction")),
        (
            "distance(closest.enemy()?.pos) <= 2 && self.hp < self.maxHp * 0.3",
            Tier::Specialized("conjunction"),
        ),
        ("count.enemiesWithin(4) >= 2", Tier::Generic),
        ("not valid ((", Tier::Generic),
    ];
    for (text, tier) in texts {
        assert_eq!(cache.compile(text).tier(), tier, "{}", text);
    }
    for (text, _) in texts {
        cache.compile(text);
    }

    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 5,
            misses: 5,
            specialized: 3,
            generic: 2,
        }
    );
    assert_eq!(cache.len(), 5);
    // 特殊化された式は構文解析を経由しない
    assert_eq!(cache.registry().len(), 2);
}

#[test]
fn test_deeply_nested_text_is_absent() {
    let cache = ExpressionCache::new();
    for depth in [300, 500, 20_000] {
        let brackets = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        assert_eq!(
            cache.evaluate(&brackets, &Value::Null, &Context::empty()),
            Value::Absent
        );
        let parens = format!("{}true{}", "(".repeat(depth), ")".repeat(depth));
        let predicate = cache.compile(&parens);
        assert_eq!(predicate.tier(), Tier::Generic);
        assert_eq!(predicate.call(&Value::Null, &Context::empty()), Value::Absent);
    }
    let negations = format!("{}true", "!".repeat(100_000));
    assert_eq!(
        cache.evaluate(&negations, &Value::Null, &Context::empty()),
        Value::Absent
    );
    let sum = vec!["1"; 50_000].join(" + ");
    assert_eq!(
        cache.evaluate(&sum, &Value::Null, &Context::empty()),
        Value::Absent
    );

    // 上限以内の入れ子は普通に評価される
    let nested = format!("{}1{}", "[".repeat(32), "]".repeat(32));
    assert!(matches!(
        cache.evaluate(&nested, &Value::Null, &Context::empty()),
        Value::Array(_)
    ));
}

#[test]
fn test_clear_resets_everything() {
    let cache = ExpressionCache::new();
    let before = cache.compile("self.hp * 2");
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.stats(), CacheStats::default());

    let after = cache.compile("self.hp * 2");
    assert!(!before.ptr_eq(&after));
    let subject = unit(0.0, 0.0, 21.0);
    let context = arena(&subject, vec![], vec![]);
    assert_eq!(after.call(&subject, &context), Value::Number(42.0));
}

#[test]
fn test_config_from_json() {
    let config = EngineConfig::from_json(
        r#"{ "specialization": true, "subject_name": "me", "memoize_parse_failures": false }"#,
    )
    .unwrap();
    let cache = ExpressionCache::with_config(config);

    let subject = unit(0.0, 0.0, 30.0);
    let context = arena(&subject, vec![], vec![]);
    let predicate = cache.compile("me.hp < 50");
    assert_eq!(predicate.tier(), Tier::Generic);
    assert_eq!(predicate.call(&subject, &context), Value::Boolean(true));

    cache.compile("me.hp <");
    assert!(!cache.registry().contains("me.hp <"));
    assert_eq!(cache.registry().len(), 1);
}

#[test]
fn test_shared_between_threads() {
    let cache = ExpressionCache::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    cache.compile("self.hp < 50");
                    cache.compile("self.hp + 1 > 2");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.len(), 2);
    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 400);
    assert_eq!(stats.specialized, 1);
    assert_eq!(stats.generic, 1);
}
