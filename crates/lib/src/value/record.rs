//! Record containers and their shapes.
//!
//! A [`Record`] is a cheaply-clonable handle to an immutable, insertion-ordered
//! map of own entries. Cloning a record clones the handle, not the entries, so
//! two handles to the same allocation are "the same record" in the sense of
//! [`Record::ptr_eq`]. Every update that changes a record produces a new
//! allocation and leaves the old one untouched.
//!
//! Each record carries a [`Shape`]: an optional class-like name plus optional
//! inherited default entries. Forked copies of a record always keep the shape
//! of the record they replace.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use super::Value;

/// The prototype token of a [`Record`].
///
/// Shapes compare by identity: two shapes are the same only when one was
/// cloned from the other. The default shape is the plain, anonymous shape
/// with no inherited entries.
///
/// ```
/// use immutree::{Record, Shape, Value};
///
/// let point = Shape::named("Point").with_default("z", 0);
/// let p = Record::with_shape(point.clone(), [("x", Value::from(1)), ("y", Value::from(2))]);
///
/// assert_eq!(p.get("z"), Some(&Value::Int(0))); // inherited
/// assert!(!p.has_own("z"));
/// assert!(p.shape().same(&point));
/// ```
#[derive(Clone, Default)]
pub struct Shape(Option<Arc<ShapeInner>>);

struct ShapeInner {
    name: String,
    defaults: IndexMap<String, Value>,
}

impl Shape {
    /// The plain shape shared by all ordinary records.
    pub fn plain() -> Self {
        Self(None)
    }

    /// Creates a new named shape with no inherited entries.
    pub fn named(name: impl Into<String>) -> Self {
        Self(Some(Arc::new(ShapeInner {
            name: name.into(),
            defaults: IndexMap::new(),
        })))
    }

    /// Returns a new shape that additionally inherits `key`.
    ///
    /// The result is a distinct shape; records built from `self` do not see
    /// the new default.
    pub fn with_default(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let (name, mut defaults) = match self.0 {
            Some(inner) => (inner.name.clone(), inner.defaults.clone()),
            None => (String::new(), IndexMap::new()),
        };
        defaults.insert(key.into(), value.into());
        Self(Some(Arc::new(ShapeInner { name, defaults })))
    }

    /// The shape's name, or `None` for the plain shape.
    pub fn name(&self) -> Option<&str> {
        self.0.as_ref().map(|inner| inner.name.as_str())
    }

    /// Returns true for the plain shape.
    pub fn is_plain(&self) -> bool {
        self.0.is_none()
    }

    /// Looks up an inherited entry.
    pub fn default_for(&self, key: &str) -> Option<&Value> {
        self.0.as_ref().and_then(|inner| inner.defaults.get(key))
    }

    /// Identity comparison.
    pub fn same(&self, other: &Shape) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => write!(f, "Shape(plain)"),
            Some(inner) => write!(f, "Shape({:?})", inner.name),
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

/// An immutable mapping from string keys to values.
#[derive(Clone)]
pub struct Record {
    inner: Arc<RecordInner>,
}

#[derive(Clone)]
struct RecordInner {
    shape: Shape,
    entries: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty plain record.
    pub fn new() -> Self {
        Self::from_parts(Shape::plain(), IndexMap::new())
    }

    /// Creates a record of the given shape from own entries.
    pub fn with_shape<K, V>(shape: Shape, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_parts(shape, entries)
    }

    pub(crate) fn from_parts(shape: Shape, entries: IndexMap<String, Value>) -> Self {
        Self {
            inner: Arc::new(RecordInner { shape, entries }),
        }
    }

    /// A private copy of the own entries, for building a forked record.
    pub(crate) fn clone_entries(&self) -> IndexMap<String, Value> {
        self.inner.entries.clone()
    }

    pub fn shape(&self) -> &Shape {
        &self.inner.shape
    }

    /// Number of own entries.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Returns true if the record has no own entries.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Looks up a key, falling through to the shape's inherited entries.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner
            .entries
            .get(key)
            .or_else(|| self.inner.shape.default_for(key))
    }

    /// Looks up an own entry only.
    pub fn get_own(&self, key: &str) -> Option<&Value> {
        self.inner.entries.get(key)
    }

    /// Returns true if `key` is an own entry (inherited entries don't count).
    pub fn has_own(&self, key: &str) -> bool {
        self.inner.entries.contains_key(key)
    }

    /// Own keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.entries.keys().map(String::as_str)
    }

    /// Own values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.inner.entries.values()
    }

    /// Own entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if both handles point at the same allocation.
    pub fn ptr_eq(a: &Record, b: &Record) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Record {
    /// Structural equality: same shape and equal own entries, in any order.
    fn eq(&self, other: &Self) -> bool {
        Record::ptr_eq(self, other)
            || (self.inner.shape.same(&other.inner.shape)
                && self.inner.entries == other.inner.entries)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.inner.shape.name() {
            write!(f, "{name} ")?;
        }
        f.debug_map().entries(self.inner.entries.iter()).finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::with_shape(Shape::plain(), iter)
    }
}
