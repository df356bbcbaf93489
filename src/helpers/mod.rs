//! # Standard Helper Groups
//!
//! Helper groups a game host composes into the evaluation context. None of
//! them is required by the language itself; they are built on [`Value`]
//! alone, and a host can register any other group next to them.
//!
//! | Group | Kind | Bindings |
//! |---|---|---|
//! | `subject` | eager | `self`, `hpFraction` |
//! | `math` | eager | `abs min max floor ceil round sqrt pow clamp PI` |
//! | `distance` | eager | `distance(p)`, `distance(a, b)`, `distanceSq(..)` |
//! | `closest`, `weakest`, `healthiest` | lazy | `.enemy()`, `.ally()` |
//! | `centroid` | lazy | `.enemies()`, `.allies()` |
//! | `count` | eager | `.enemies()`, `.allies()`, `.enemiesWithin(r)`, `.alliesWithin(r)` |
//! | `random` | eager | `random()` |

pub mod random;
pub mod roster;

use std::rc::Rc;

use crate::eval::{Bindings, Context, ContextBuilder, Value};
use random::{random_helpers, SharedRandom};
use roster::{centroid_bindings, count_bindings, finder_bindings, position, Ranking, Roster};

pub use random::{shared, RandomSource};

fn number_fn(f: fn(f64) -> f64) -> Value {
    Value::function(move |args| {
        Value::Number(f(args.first().map(Value::to_number).unwrap_or(f64::NAN)))
    })
}

fn arg(args: &[Value], i: usize) -> f64 {
    args.get(i).map(Value::to_number).unwrap_or(f64::NAN)
}

/// `self` and `hpFraction` (`hp / maxHp`).
pub fn subject_helpers(subject: &Value) -> Bindings {
    let fraction = subject.member("hp").to_number() / subject.member("maxHp").to_number();
    Bindings::from([
        ("self".to_string(), subject.clone()),
        ("hpFraction".to_string(), Value::Number(fraction)),
    ])
}

pub fn math_helpers() -> Bindings {
    let fold = |init: f64, pick: fn(f64, f64) -> f64| {
        Value::function(move |args| {
            // NaN が一つでもあれば NaN
            Value::Number(args.iter().map(Value::to_number).fold(init, |acc, n| {
                if acc.is_nan() || n.is_nan() {
                    f64::NAN
                } else {
                    pick(acc, n)
                }
            }))
        })
    };
    Bindings::from([
        ("abs".to_string(), number_fn(f64::abs)),
        ("floor".to_string(), number_fn(f64::floor)),
        ("ceil".to_string(), number_fn(f64::ceil)),
        ("round".to_string(), number_fn(|n| (n + 0.5).floor())),
        ("sqrt".to_string(), number_fn(f64::sqrt)),
        ("min".to_string(), fold(f64::INFINITY, f64::min)),
        ("max".to_string(), fold(f64::NEG_INFINITY, f64::max)),
        (
            "pow".to_string(),
            Value::function(|args| Value::Number(arg(args, 0).powf(arg(args, 1)))),
        ),
        (
            "clamp".to_string(),
            Value::function(|args| {
                let (n, low, high) = (arg(args, 0), arg(args, 1), arg(args, 2));
                Value::Number(n.max(low).min(high))
            }),
        ),
        ("PI".to_string(), Value::Number(std::f64::consts::PI)),
    ])
}

/// Distances relative to the subject's `pos`.
///
/// `distance(p)` measures from the subject, `distance(a, b)` between two
/// points. A missing point yields absent.
pub fn distance_helpers(subject: &Value) -> Bindings {
    let origin = position(subject);
    let squared = move |args: &[Value]| -> Value {
        let (a, b) = match args {
            [p] => (origin, p.as_point()),
            [a, b, ..] => (a.as_point(), b.as_point()),
            [] => (None, None),
        };
        match (a, b) {
            (Some(a), Some(b)) => Value::Number(roster::squared_distance(a, b)),
            _ => Value::Absent,
        }
    };
    Bindings::from([
        (
            "distance".to_string(),
            Value::function(move |args| match squared(args) {
                Value::Number(d2) => Value::Number(d2.sqrt()),
                other => other,
            }),
        ),
        ("distanceSq".to_string(), Value::function(squared)),
    ])
}

/// Context builder with every standard group, ready for host additions.
pub fn standard_builder(subject: &Value, roster: Roster, random: SharedRandom) -> ContextBuilder {
    let origin = position(subject);
    let roster = Rc::new(roster);

    let mut builder = ContextBuilder::new()
        .add_helpers("subject", subject_helpers(subject))
        .add_helpers("math", math_helpers())
        .add_helpers("distance", distance_helpers(subject));

    for ranking in [Ranking::Closest, Ranking::Weakest, Ranking::Healthiest] {
        let roster = roster.clone();
        builder = builder.add_lazy_helpers(ranking.group_name(), [ranking.group_name()], move || {
            finder_bindings(&roster, ranking, origin)
        });
    }

    let centroid_roster = roster.clone();
    builder
        .add_lazy_helpers("centroid", ["centroid"], move || {
            centroid_bindings(&centroid_roster)
        })
        .add_helpers("count", count_bindings(roster, origin))
        .add_helpers("random", random_helpers(random))
}

pub fn standard_context(subject: &Value, roster: Roster, random: SharedRandom) -> Context {
    standard_builder(subject, roster, random).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn unit(x: f64, y: f64, hp: f64) -> Value {
        Value::object([
            ("pos", Value::point(x, y)),
            ("hp", Value::Number(hp)),
            ("maxHp", Value::Number(100.0)),
        ])
    }

    fn context(subject: &Value, enemies: Vec<Value>) -> Context {
        standard_context(
            subject,
            Roster::new(vec![], enemies),
            shared(StdRng::seed_from_u64(1)),
        )
    }

    #[test]
    fn test_math() {
        let math = math_helpers();
        let call = |name: &str, args: &[f64]| {
            let args: Vec<Value> = args.iter().map(|n| Value::Number(*n)).collect();
            math[name].call(&args).to_number()
        };
        assert_eq!(call("abs", &[-3.0]), 3.0);
        assert_eq!(call("min", &[4.0, 2.0, 8.0]), 2.0);
        assert_eq!(call("max", &[4.0, 2.0, 8.0]), 8.0);
        assert_eq!(call("max", &[]), f64::NEG_INFINITY);
        assert!(call("min", &[1.0, f64::NAN]).is_nan());
        assert_eq!(call("round", &[2.5]), 3.0);
        assert_eq!(call("round", &[-2.5]), -2.0);
        assert_eq!(call("pow", &[2.0, 10.0]), 1024.0);
        assert_eq!(call("clamp", &[15.0, 0.0, 10.0]), 10.0);
        assert!(call("sqrt", &[]).is_nan());
    }

    #[test]
    fn test_distance() {
        let subject = unit(10.0, 10.0, 40.0);
        let distance = distance_helpers(&subject);
        assert_eq!(
            distance["distance"].call(&[Value::point(13.0, 14.0)]),
            Value::Number(5.0)
        );
        assert_eq!(
            distance["distanceSq"].call(&[Value::point(0.0, 0.0), Value::point(1.0, 2.0)]),
            Value::Number(5.0)
        );
        assert_eq!(distance["distance"].call(&[Value::Absent]), Value::Absent);
        assert_eq!(distance["distance"].call(&[]), Value::Absent);
    }

    #[test]
    fn test_finder_groups_are_lazy() {
        let subject = unit(10.0, 10.0, 40.0);
        let context = context(&subject, vec![unit(12.0, 10.0, 50.0)]);
        assert_eq!(context.is_materialized("closest"), Some(false));
        assert_eq!(context.is_materialized("centroid"), Some(false));

        let closest = context.resolve("closest").unwrap();
        assert_eq!(context.is_materialized("closest"), Some(true));
        assert_eq!(context.is_materialized("weakest"), Some(false));
        assert_eq!(
            closest.call_method("enemy", &[]).member("pos"),
            Value::point(12.0, 10.0)
        );
        assert_eq!(closest.call_method("ally", &[]), Value::Null);
    }

    #[test]
    fn test_subject_helpers() {
        let subject = unit(0.0, 0.0, 40.0);
        let context = context(&subject, vec![]);
        assert_eq!(context.resolve("self"), Some(subject.clone()));
        assert_eq!(context.resolve("hpFraction"), Some(Value::Number(0.4)));
        let centroid = context.resolve("centroid").unwrap();
        assert_eq!(centroid.call_method("enemies", &[]), Value::Null);
    }
}
