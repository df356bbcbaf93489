//! # Specialization Catalog
//!
//! Recognizers over raw expression text, each paired with a generator for a
//! closure that computes the same value as parse + evaluate would, straight
//! from host data.
//!
//! | Pattern | Shape |
//! |---|---|
//! | `boolean literal` | `true`, `false` |
//! | `distance range` | `distance(closest.enemy()?.pos) >|>= A && distance(closest.enemy()?.pos) <|<= B` |
//! | `distance threshold` | `distance(closest.enemy()?.pos) <op> N` |
//! | `hp fraction` | `self.hp <op> self.maxHp * N` |
//! | `hp threshold` | `self.hp <op> N` |
//! | `parenthesized` | `( <recognized> )` |
//! | `disjunction` | `<recognized> \|\| <recognized>` |
//! | `conjunction` | `<recognized> && <recognized>` |
//!
//! `<op>` is one of `< <= > >=`, literals are non-negative, and `?.pos` may
//! also be written `.pos`. Distances are compared squared.
//!
//! The generated closures rely on the standard helper contract: `distance`
//! measures from the subject's `pos`, and `closest.enemy()` answers the
//! nearest enemy or `null`.

use std::str::FromStr;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::PredicateFn;
use crate::ast::BinaryOperator;
use crate::eval::{expression::ordering_holds, Context, Value};
use crate::grammar;
use crate::helpers::roster::{position, squared_distance};
use crate::tokenizer::symbol::Operator;

const NUMBER: &str = r"(\d+(?:\.\d+)?)";
const ORDERING: &str = r"(<=|>=|<|>)";
const SELF_HP: &str = r"self\s*\.\s*hp";
const SELF_MAX_HP: &str = r"self\s*\.\s*maxHp";
const CLOSEST_ENEMY_DISTANCE: &str =
    r"distance\s*\(\s*closest\s*\.\s*enemy\s*\(\s*\)\s*(?:\?\.|\.)\s*pos\s*\)";

lazy_static! {
    static ref BOOLEAN_LITERAL: Regex = Regex::new(r"^\s*(true|false)\s*$").unwrap();
    static ref HP_THRESHOLD: Regex =
        Regex::new(&format!(r"^\s*{SELF_HP}\s*{ORDERING}\s*{NUMBER}\s*$")).unwrap();
    static ref HP_FRACTION: Regex = Regex::new(&format!(
        r"^\s*{SELF_HP}\s*{ORDERING}\s*{SELF_MAX_HP}\s*\*\s*{NUMBER}\s*$"
    ))
    .unwrap();
    static ref DISTANCE_THRESHOLD: Regex = Regex::new(&format!(
        r"^\s*{CLOSEST_ENEMY_DISTANCE}\s*{ORDERING}\s*{NUMBER}\s*$"
    ))
    .unwrap();
    static ref DISTANCE_RANGE: Regex = Regex::new(&format!(
        r"^\s*{CLOSEST_ENEMY_DISTANCE}\s*(>=|>)\s*{NUMBER}\s*&&\s*{CLOSEST_ENEMY_DISTANCE}\s*(<=|<)\s*{NUMBER}\s*$"
    ))
    .unwrap();
}

type Recognizer = fn(&str) -> Option<Arc<PredicateFn>>;

/// Tried in order; the first recognizer that accepts the text wins.
const RECOGNIZERS: &[(&str, Recognizer)] = &[
    ("boolean literal", boolean_literal),
    ("distance range", distance_range),
    ("distance threshold", distance_threshold),
    ("hp fraction", hp_fraction),
    ("hp threshold", hp_threshold),
    ("parenthesized", parenthesized),
    ("disjunction", disjunction),
    ("conjunction", conjunction),
];

/// Name of the matching pattern and its closure, if any pattern applies.
pub fn specialize(text: &str) -> Option<(&'static str, Arc<PredicateFn>)> {
    RECOGNIZERS
        .iter()
        .find_map(|(name, recognize)| recognize(text).map(|predicate| (*name, predicate)))
}

fn comparison(symbol: &str) -> Option<BinaryOperator> {
    grammar::COMPARISON.lookup(&Operator::from_str(symbol).ok()?)
}

fn number(caps: &Captures, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse::<f64>().ok()
}

fn boolean_literal(text: &str) -> Option<Arc<PredicateFn>> {
    let caps = BOOLEAN_LITERAL.captures(text)?;
    let value = &caps[1] == "true";
    Some(Arc::new(move |_: &Value, _: &Context| Value::Boolean(value)))
}

fn hp_threshold(text: &str) -> Option<Arc<PredicateFn>> {
    let caps = HP_THRESHOLD.captures(text)?;
    let op = comparison(&caps[1])?;
    let limit = number(&caps, 2)?;
    Some(Arc::new(move |subject: &Value, _: &Context| {
        let hp = subject.member("hp");
        Value::Boolean(ordering_holds(op, hp.compare(&Value::Number(limit))))
    }))
}

fn hp_fraction(text: &str) -> Option<Arc<PredicateFn>> {
    let caps = HP_FRACTION.captures(text)?;
    let op = comparison(&caps[1])?;
    let fraction = number(&caps, 2)?;
    Some(Arc::new(move |subject: &Value, _: &Context| {
        let hp = subject.member("hp");
        let limit = Value::Number(subject.member("maxHp").to_number() * fraction);
        Value::Boolean(ordering_holds(op, hp.compare(&limit)))
    }))
}

/// Squared distance from the subject to `closest.enemy()`, when both have a
/// position.
fn closest_enemy_squared(subject: &Value, context: &Context) -> Option<f64> {
    let origin = position(subject)?;
    let enemy = context.resolve("closest")?.call_method("enemy", &[]);
    Some(squared_distance(origin, position(&enemy)?))
}

/// `sqrt(d2) <op> limit`, decided on squares unless `d2` lies close enough
/// to the rounded `limit²` for the two comparisons to disagree.
#[derive(Debug, Clone, Copy)]
struct DistanceBound {
    op: BinaryOperator,
    limit: f64,
    limit_squared: f64,
    slack: f64,
}

impl DistanceBound {
    fn new(op: BinaryOperator, limit: f64) -> Self {
        let limit_squared = limit * limit;
        Self {
            op,
            limit,
            limit_squared,
            // 丸め誤差の数 ULP 分と、非正規化数の範囲
            slack: limit_squared * 4.0 * f64::EPSILON + f64::MIN_POSITIVE,
        }
    }

    fn holds(&self, d2: f64) -> bool {
        if (d2 - self.limit_squared).abs() > self.slack {
            ordering_holds(self.op, d2.partial_cmp(&self.limit_squared))
        } else {
            ordering_holds(self.op, d2.sqrt().partial_cmp(&self.limit))
        }
    }
}

fn distance_threshold(text: &str) -> Option<Arc<PredicateFn>> {
    let caps = DISTANCE_THRESHOLD.captures(text)?;
    let bound = DistanceBound::new(comparison(&caps[1])?, number(&caps, 2)?);
    Some(Arc::new(move |subject: &Value, context: &Context| {
        let holds = closest_enemy_squared(subject, context)
            .map(|d2| bound.holds(d2))
            .unwrap_or(false);
        Value::Boolean(holds)
    }))
}

fn distance_range(text: &str) -> Option<Arc<PredicateFn>> {
    let caps = DISTANCE_RANGE.captures(text)?;
    let lower = DistanceBound::new(comparison(&caps[1])?, number(&caps, 2)?);
    let upper = DistanceBound::new(comparison(&caps[3])?, number(&caps, 4)?);
    Some(Arc::new(move |subject: &Value, context: &Context| {
        let holds = closest_enemy_squared(subject, context)
            .map(|d2| lower.holds(d2) && upper.holds(d2))
            .unwrap_or(false);
        Value::Boolean(holds)
    }))
}

fn parenthesized(text: &str) -> Option<Arc<PredicateFn>> {
    let inner = strip_parens(text)?;
    specialize(inner).map(|(_, predicate)| predicate)
}

fn disjunction(text: &str) -> Option<Arc<PredicateFn>> {
    let (left, right) = split_top_level(text, "||")?;
    let (_, left) = specialize(left)?;
    let (_, right) = specialize(right)?;
    Some(Arc::new(move |subject: &Value, context: &Context| {
        let value = left(subject, context);
        if value.is_truthy() {
            value
        } else {
            right(subject, context)
        }
    }))
}

fn conjunction(text: &str) -> Option<Arc<PredicateFn>> {
    // `||` binds looser; such text is a disjunction or nothing
    if split_top_level(text, "||").is_some() {
        return None;
    }
    let (left, right) = split_top_level(text, "&&")?;
    let (_, left) = specialize(left)?;
    let (_, right) = specialize(right)?;
    Some(Arc::new(move |subject: &Value, context: &Context| {
        let value = left(subject, context);
        if value.is_truthy() {
            right(subject, context)
        } else {
            value
        }
    }))
}

/// Walks `text` outside string literals and calls `visit` with the byte
/// offset of every character at bracket depth zero. False when the brackets
/// or quotes are unbalanced.
fn scan_top_level(text: &str, mut visit: impl FnMut(usize)) -> bool {
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ if depth == 0 => visit(i),
            _ => {}
        }
    }

    depth == 0 && quote.is_none()
}

/// Splits at the rightmost top-level `operator`, so a chain `a op b op c`
/// splits as `(a op b) op c`.
fn split_top_level<'a>(text: &'a str, operator: &str) -> Option<(&'a str, &'a str)> {
    let mut at = None;
    let balanced = scan_top_level(text, |i| {
        if text[i..].starts_with(operator) {
            at = Some(i);
        }
    });
    let at = at.filter(|_| balanced)?;
    Some((&text[..at], &text[at + operator.len()..]))
}

/// Inner text of `( ... )` when the opening parenthesis closes at the end.
fn strip_parens(text: &str) -> Option<&str> {
    let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
    // "(a) && (b)" は中身が釣り合わない
    scan_top_level(inner, |_| {}).then_some(inner)
}
