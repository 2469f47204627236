//! Value types for nested, dynamically-shaped data.
//!
//! [`Value`] is either an atomic value (null, booleans, numbers, text, dates)
//! or a container ([`Record`] or [`Sequence`]). Containers are reference
//! counted and immutable, so a value can be cheaply cloned and shared between
//! many versions of a larger tree.
//!
//! # Identity vs. equality
//!
//! `Value` implements [`PartialEq`] structurally (two separately built
//! records with the same entries are equal). The update engine instead uses
//! [`Value::same`], which compares containers by reference and scalars by
//! value, and treats `NaN` as the same as `NaN`. That rule is what decides
//! whether an update changed anything.
//!
//! ```
//! use immutree::{record, Value};
//!
//! let a = record! { "x" => 1 };
//! let b = record! { "x" => 1 };
//! assert_eq!(a, b);            // structurally equal
//! assert!(!a.same(&b));        // different containers
//! assert!(a.same(&a.clone())); // clones share the container
//! assert!(Value::Float(f64::NAN).same(&Value::Float(f64::NAN)));
//! ```

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};

pub mod record;
pub mod sequence;

pub use record::{Record, Shape};
pub use sequence::Sequence;

/// Values that can be stored in a nested tree.
///
/// ## Atomic values
/// - [`Value::Null`], [`Value::Bool`], [`Value::Int`], [`Value::Float`], [`Value::Text`]
/// - [`Value::Date`] - object-like but never recursed into or merged
///
/// ## Containers
/// - [`Value::Record`] - string-keyed mapping
/// - [`Value::Sequence`] - ordered list
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Arc<str>),
    /// Timestamp treated as an opaque atom
    Date(DateTime<Utc>),
    Record(Record),
    Sequence(Sequence),
}

impl Value {
    /// The update engine's equality rule.
    ///
    /// Containers are the same only when they are the same allocation.
    /// Scalars compare by value, integers and floats compare numerically,
    /// and `NaN` is the same as `NaN` so that writing `NaN` over `NaN` is a
    /// no-op.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => int_eq_float(*a, *b),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => Record::ptr_eq(a, b),
            (Value::Sequence(a), Value::Sequence(b)) => Sequence::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns true for records and sequences
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Record(_) | Value::Sequence(_))
    }

    /// Returns true if deep merge may recurse into this value.
    ///
    /// Only records qualify: sequences are always replaced wholesale and
    /// dates are atomic.
    pub fn is_mergeable(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Record(_) => "record",
            Value::Sequence(_) => "sequence",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of ints and floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Converts to a JSON-like string representation for human-readable output.
    ///
    /// Dates render as RFC 3339 strings; non-finite floats render as `null`.
    pub fn to_json_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) if n.is_finite() => n.to_string(),
            Value::Float(_) => "null".to_string(),
            Value::Text(s) => format!("\"{}\"", s.replace('\"', "\\\"")),
            Value::Date(d) => format!("\"{}\"", d.to_rfc3339()),
            Value::Record(record) => {
                let mut result = String::with_capacity(record.len() * 16);
                result.push('{');
                for (i, (key, value)) in record.iter().enumerate() {
                    if i > 0 {
                        result.push(',');
                    }
                    result.push_str(&format!("\"{}\":{}", key, value.to_json_string()));
                }
                result.push('}');
                result
            }
            Value::Sequence(seq) => {
                let mut result = String::with_capacity(seq.len() * 8);
                result.push('[');
                for (i, item) in seq.iter().enumerate() {
                    if i > 0 {
                        result.push(',');
                    }
                    result.push_str(&item.to_json_string());
                }
                result.push(']');
                result
            }
        }
    }
}

/// Exact numeric equality between an integer and a float.
///
/// Holds only when `b` is integral, within `i64` range, and converts back to
/// exactly `a`; `2^53 + 1` is not equal to `2^53 as f64`.
fn int_eq_float(a: i64, b: f64) -> bool {
    // i64::MIN as f64 is exact; i64::MAX as f64 rounds up to 2^63
    const LOWER: f64 = i64::MIN as f64;
    const UPPER: f64 = -(i64::MIN as f64);
    b.fract() == 0.0 && (LOWER..UPPER).contains(&b) && b as i64 == a
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl PartialEq for Value {
    /// Structural equality. Unlike [`Value::same`], `NaN != NaN` here and
    /// containers compare by content.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => int_eq_float(*a, *b),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Value::Record(record) => write!(f, "{record}"),
            Value::Sequence(seq) => write!(f, "{seq}"),
        }
    }
}

// Direct comparisons with primitives, as used heavily in tests
impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self == &Value::Int(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self == &Value::Float(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Value::Text(s) if &**s == *other)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        // Clamp rather than wrap for lengths beyond i64::MAX
        Value::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value.into())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<Sequence> for Value {
    fn from(value: Sequence) -> Self {
        Value::Sequence(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl From<serde_json::Value> for Value {
    /// Builds a fresh tree from JSON: objects become plain records (keeping
    /// key order), arrays become sequences, integral numbers become ints.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s.into()),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Record(map.into_iter().collect()),
        }
    }
}

/// Builds a plain [`Value::Record`] from `key => value` pairs.
///
/// ```
/// use immutree::record;
///
/// let user = record! { "name" => "Ada", "tags" => immutree::seq!["admin"] };
/// assert_eq!(user.as_record().map(|r| r.len()), Some(2));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Value::Record($crate::Record::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Value::Record(
            [$((::std::string::String::from($key), $crate::Value::from($value))),+]
                .into_iter()
                .collect::<$crate::Record>(),
        )
    };
}

/// Builds a [`Value::Sequence`] from elements.
///
/// ```
/// use immutree::seq;
///
/// let nested = seq![1, seq![2, 3], "four"];
/// assert_eq!(nested.as_sequence().map(|s| s.len()), Some(3));
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Value::Sequence($crate::Sequence::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::Sequence(
            ::std::vec![$($crate::Value::from($item)),+].into(),
        )
    };
}
