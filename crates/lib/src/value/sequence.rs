//! Sequence containers.
//!
//! A [`Sequence`] is a cheaply-clonable handle to an immutable, 0-indexed list
//! of values. Like [`Record`](super::Record) it is shared by reference: cloning
//! the handle never copies the elements.

use std::{fmt, sync::Arc};

use super::Value;

/// An immutable ordered list of values.
#[derive(Clone, Default)]
pub struct Sequence {
    items: Arc<Vec<Value>>,
}

impl Sequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// A private copy of the elements, for building a forked sequence.
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.as_ref().clone()
    }

    /// Returns true if both handles point at the same allocation.
    pub fn ptr_eq(a: &Sequence, b: &Sequence) -> bool {
        Arc::ptr_eq(&a.items, &b.items)
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(items: Vec<Value>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }
}

impl<V: Into<Value>> FromIterator<V> for Sequence {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        iter.into_iter()
            .map(Into::into)
            .collect::<Vec<Value>>()
            .into()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        Sequence::ptr_eq(self, other) || self.items == other.items
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}
