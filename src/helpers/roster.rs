use std::rc::Rc;

use crate::eval::{Bindings, Value};

/// Units visible to the subject, split by side.
///
/// A unit is any value with a `pos` point member; `hp` and `maxHp` are read
/// when a helper ranks by health.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub allies: Vec<Value>,
    pub enemies: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Allies,
    Enemies,
}

impl Roster {
    pub fn new(allies: Vec<Value>, enemies: Vec<Value>) -> Self {
        Self { allies, enemies }
    }

    pub fn side(&self, side: Side) -> &[Value] {
        match side {
            Side::Allies => &self.allies,
            Side::Enemies => &self.enemies,
        }
    }
}

pub fn position(unit: &Value) -> Option<(f64, f64)> {
    unit.member("pos").as_point()
}

pub fn squared_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

/// How a finder ranks candidates; the smallest key wins, ties keep roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    Closest,
    Weakest,
    Healthiest,
}

impl Ranking {
    pub fn group_name(&self) -> &'static str {
        match self {
            Ranking::Closest => "closest",
            Ranking::Weakest => "weakest",
            Ranking::Healthiest => "healthiest",
        }
    }

    fn key(&self, origin: Option<(f64, f64)>, unit: &Value) -> Option<f64> {
        let key = match self {
            Ranking::Closest => squared_distance(origin?, position(unit)?),
            Ranking::Weakest => unit.member("hp").as_number()?,
            Ranking::Healthiest => -unit.member("hp").as_number()?,
        };
        (!key.is_nan()).then_some(key)
    }
}

/// Best unit of one side, or `null` when none qualifies.
pub fn find(units: &[Value], ranking: Ranking, origin: Option<(f64, f64)>) -> Value {
    let mut best: Option<(f64, &Value)> = None;
    for unit in units {
        if let Some(key) = ranking.key(origin, unit) {
            if best.map(|(best_key, _)| key < best_key).unwrap_or(true) {
                best = Some((key, unit));
            }
        }
    }
    best.map(|(_, unit)| unit.clone()).unwrap_or(Value::Null)
}

/// Mean position of the positioned units, or `null` when there are none.
pub fn centroid(units: &[Value]) -> Value {
    let points: Vec<(f64, f64)> = units.iter().filter_map(position).collect();
    if points.is_empty() {
        return Value::Null;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    Value::point(sx / n, sy / n)
}

/// Units within `radius` of `origin`, boundary included.
pub fn count_within(units: &[Value], origin: Option<(f64, f64)>, radius: f64) -> usize {
    let Some(origin) = origin else {
        return 0;
    };
    units
        .iter()
        .filter_map(position)
        .filter(|p| squared_distance(origin, *p) <= radius * radius)
        .count()
}

/// Scan results for one ranking: `{ enemy(), ally() }`.
pub fn finder_bindings(roster: &Roster, ranking: Ranking, origin: Option<(f64, f64)>) -> Bindings {
    let enemy = find(&roster.enemies, ranking, origin);
    let ally = find(&roster.allies, ranking, origin);
    Bindings::from([(
        ranking.group_name().to_string(),
        Value::object([
            ("enemy", Value::function(move |_| enemy.clone())),
            ("ally", Value::function(move |_| ally.clone())),
        ]),
    )])
}

/// `centroid.enemies()`, `centroid.allies()`.
pub fn centroid_bindings(roster: &Roster) -> Bindings {
    let enemies = centroid(&roster.enemies);
    let allies = centroid(&roster.allies);
    Bindings::from([(
        "centroid".to_string(),
        Value::object([
            ("enemies", Value::function(move |_| enemies.clone())),
            ("allies", Value::function(move |_| allies.clone())),
        ]),
    )])
}

/// `count.enemies()`, `count.allies()`, `count.enemiesWithin(r)`,
/// `count.alliesWithin(r)`.
pub fn count_bindings(roster: Rc<Roster>, origin: Option<(f64, f64)>) -> Bindings {
    let counter = |side: Side| {
        let roster = roster.clone();
        Value::function(move |_| Value::Number(roster.side(side).len() as f64))
    };
    let within = |side: Side| {
        let roster = roster.clone();
        Value::function(move |args| {
            let radius = args.first().map(Value::to_number).unwrap_or(f64::NAN);
            Value::Number(count_within(roster.side(side), origin, radius) as f64)
        })
    };
    Bindings::from([(
        "count".to_string(),
        Value::object([
            ("enemies", counter(Side::Enemies)),
            ("allies", counter(Side::Allies)),
            ("enemiesWithin", within(Side::Enemies)),
            ("alliesWithin", within(Side::Allies)),
        ]),
    )])
}
