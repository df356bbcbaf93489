use core::fmt;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

/// Capability interface for opaque host entities (units, handles, ...).
///
/// The evaluator never looks inside a host value; member access and method
/// calls are forwarded here. Unknown members and methods should answer
/// [`Value::Absent`].
#[cfg_attr(test, mockall::automock)]
pub trait HostObject {
    fn get_member(&self, name: &str) -> Value;

    /// By default a method is a function-valued member.
    fn call_method(&self, name: &str, args: &[Value]) -> Value {
        self.get_member(name).call(args)
    }

    fn type_name(&self) -> &'static str {
        "host"
    }
}

/// A host-supplied function reachable from expressions.
#[derive(Clone)]
pub struct Callable(Rc<dyn Fn(&[Value]) -> Value>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// 値の型システム
#[derive(Clone, Default)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    /// Result of any unresolved or failed access.
    #[default]
    Absent,
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
    Function(Callable),
    Host(Rc<dyn HostObject>),
}

impl Value {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Value::Function(Callable::new(f))
    }

    pub fn host<H: HostObject + 'static>(host: H) -> Self {
        Value::Host(Rc::new(host))
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// `{x, y}` object; the point shape understood by the distance helpers.
    pub fn point(x: f64, y: f64) -> Self {
        Value::object([("x", Value::Number(x)), ("y", Value::Number(y))])
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Absent => "undefined",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Host(host) => host.type_name(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// `null` or absent; the values `?.` stops at.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Absent)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Null | Value::Absent => false,
            Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Host(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric coercion used by arithmetic and ordering.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Boolean(true) => 1.0,
            Value::Boolean(false) | Value::Null => 0.0,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    numeric_string(trimmed)
                }
            }
            _ => f64::NAN,
        }
    }

    /// Coordinates of a point: an object or host with numeric `x` and `y`
    /// members, or a two element array.
    pub fn as_point(&self) -> Option<(f64, f64)> {
        match self {
            Value::Array(items) if items.len() == 2 => {
                Some((items[0].as_number()?, items[1].as_number()?))
            }
            Value::Object(_) | Value::Host(_) => {
                Some((self.member("x").as_number()?, self.member("y").as_number()?))
            }
            _ => None,
        }
    }

    /// `==` with coercion between numbers, numeric strings and booleans.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (a, b) if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(_), Value::String(_) | Value::Boolean(_))
            | (Value::String(_) | Value::Boolean(_), Value::Number(_))
            | (Value::String(_), Value::Boolean(_))
            | (Value::Boolean(_), Value::String(_)) => self.to_number() == other.to_number(),
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_equals(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).map(|w| v.loose_equals(w)).unwrap_or(false))
            }
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Host(a), Value::Host(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Ordering for `< <= > >=`: two strings compare lexically, anything else
    /// numerically. `None` when either side is NaN after coercion.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => self.to_number().partial_cmp(&other.to_number()),
        }
    }

    /// `.name` access. Never fails; unknown members are absent.
    pub fn member(&self, name: &str) -> Value {
        match self {
            Value::Object(map) => map.get(name).cloned().unwrap_or(Value::Absent),
            Value::Host(host) => host.get_member(name),
            Value::Array(items) if name == "length" => Value::Number(items.len() as f64),
            Value::String(s) if name == "length" => Value::Number(s.chars().count() as f64),
            _ => Value::Absent,
        }
    }

    /// `[key]` access.
    pub fn index(&self, key: &Value) -> Value {
        match self {
            Value::Array(items) => match array_position(key) {
                Some(i) => items.get(i).cloned().unwrap_or(Value::Absent),
                None => match key {
                    Value::String(name) => self.member(name),
                    _ => Value::Absent,
                },
            },
            Value::String(s) => match array_position(key) {
                Some(i) => s
                    .chars()
                    .nth(i)
                    .map(|c| Value::String(c.to_string()))
                    .unwrap_or(Value::Absent),
                None => match key {
                    Value::String(name) => self.member(name),
                    _ => Value::Absent,
                },
            },
            Value::Object(_) | Value::Host(_) => match property_key(key) {
                Some(name) => self.member(&name),
                None => Value::Absent,
            },
            _ => Value::Absent,
        }
    }

    /// `.name(args)` with already evaluated arguments.
    pub fn call_method(&self, name: &str, args: &[Value]) -> Value {
        match self {
            Value::Host(host) => host.call_method(name, args),
            other => other.member(name).call(args),
        }
    }

    /// Calls a function value; anything else answers absent.
    pub fn call(&self, args: &[Value]) -> Value {
        match self {
            Value::Function(f) => f.call(args),
            _ => Value::Absent,
        }
    }
}

fn array_position(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as usize),
        _ => None,
    }
}

fn property_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Boolean(_) => Some(key.to_string()),
        _ => None,
    }
}

/// Structural equality for tests and caches; numbers compare with `==`,
/// functions and host objects by identity. Use
/// [`Value::loose_equals`] for the language's `==`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) | (Value::Absent, Value::Absent) => true,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Host(a), Value::Host(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({:?})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::Null => write!(f, "Null"),
            Value::Absent => write!(f, "Absent"),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Object(map) => f.debug_tuple("Object").field(map).finish(),
            Value::Function(_) => write!(f, "Function"),
            Value::Host(host) => write!(f, "Host({})", host.type_name()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) if n.is_infinite() => {
                write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
            }
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Absent => write!(f, "undefined"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(_) => write!(f, "[object Object]"),
            Value::Function(_) => write!(f, "[function]"),
            Value::Host(host) => write!(f, "[{}]", host.type_name()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Numeric reading of a non-empty trimmed string. Only the exact spelling
/// `Infinity` names an infinity; `inf`, `nan` and friends are not numbers.
fn numeric_string(s: &str) -> f64 {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned == "Infinity" {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}
