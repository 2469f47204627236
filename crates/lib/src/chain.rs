//! Fluent builder over the update engine.
//!
//! A [`Chain`] owns the value being built. Each step consumes the chain and
//! returns it again (or the first error), so a sequence of updates reads top
//! to bottom and short-circuits with `?`.
//!
//! ```
//! use immutree::{chain, record, seq, MergeConfig};
//!
//! let state = record! { "a" => record! { "b" => 1 }, "list" => seq![1, 2] };
//! let next = chain(state.clone())
//!     .set_in("a.c", 2)?
//!     .merge_deep(&record! { "a" => record! { "b" => 10 } })?
//!     .concat("list", seq![3])?
//!     .value();
//!
//! assert_eq!(next, record! {
//!     "a" => record! { "b" => 10, "c" => 2 },
//!     "list" => seq![1, 2, 3],
//! });
//! # Ok::<(), immutree::Error>(())
//! ```

use crate::{
    Result,
    ops::{self, KeySelector, MergeConfig},
    path::{Path, Segment},
    value::Value,
};

/// Starts a [`Chain`] over `value`.
pub fn chain(value: impl Into<Value>) -> Chain {
    Chain::new(value)
}

/// An owned, accumulating value with the update engine's operations as methods.
#[derive(Debug, Clone)]
pub struct Chain {
    value: Value,
}

impl Chain {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Borrows the current value.
    pub fn peek(&self) -> &Value {
        &self.value
    }

    /// Finishes the chain, returning the final value.
    pub fn value(self) -> Value {
        self.value
    }

    fn then(self, step: impl FnOnce(&Value) -> Result<Value>) -> Result<Self> {
        Ok(Self {
            value: step(&self.value)?,
        })
    }

    pub fn set(self, key: impl Into<Segment>, value: impl Into<Value>) -> Result<Self> {
        self.then(|current| ops::set(current, key, value))
    }

    pub fn set_in(self, path: impl Into<Path>, value: impl Into<Value>) -> Result<Self> {
        self.then(|current| ops::set_in(current, path, value))
    }

    pub fn merge(self, source: &Value, config: &MergeConfig) -> Result<Self> {
        self.then(|current| ops::merge(current, source, config))
    }

    pub fn merge_in(self, path: impl Into<Path>, source: &Value, config: &MergeConfig) -> Result<Self> {
        self.then(|current| ops::merge_in(current, path, source, config))
    }

    pub fn merge_deep(self, source: &Value) -> Result<Self> {
        self.then(|current| ops::merge(current, source, &MergeConfig::deep()))
    }

    pub fn merge_deep_in(self, path: impl Into<Path>, source: &Value) -> Result<Self> {
        self.then(|current| ops::merge_in(current, path, source, &MergeConfig::deep()))
    }

    pub fn without<'a>(self, selector: impl Into<KeySelector<'a>>) -> Result<Self> {
        self.then(|current| ops::without(current, selector))
    }

    pub fn update<F>(self, key: impl Into<Segment>, transform: F) -> Result<Self>
    where
        F: FnOnce(Option<&Value>) -> Value,
    {
        self.then(|current| ops::update(current, key, transform))
    }

    pub fn update_in<F>(self, path: impl Into<Path>, transform: F) -> Result<Self>
    where
        F: FnOnce(Option<&Value>) -> Value,
    {
        self.then(|current| ops::update_in(current, path, transform))
    }

    pub fn flat_map<F>(self, mapper: F) -> Result<Self>
    where
        F: FnMut(&Value, usize) -> Value,
    {
        self.then(|current| ops::flat_map(current, mapper))
    }

    pub fn replace(self, source: &Value, config: &MergeConfig) -> Result<Self> {
        self.then(|current| ops::replace(current, source, config))
    }

    pub fn replace_deep(self, source: &Value) -> Result<Self> {
        self.then(|current| ops::replace_deep(current, source))
    }

    pub fn concat(self, path: impl Into<Path>, items: impl Into<Value>) -> Result<Self> {
        self.then(|current| ops::concat(current, path, items))
    }

    pub fn unshift(self, path: impl Into<Path>, items: impl Into<Value>) -> Result<Self> {
        self.then(|current| ops::unshift(current, path, items))
    }

    /// Replaces the (sequence) value with a slice of itself.
    pub fn slice(self, start: i64, end: Option<i64>) -> Result<Self> {
        self.then(|current| ops::slice(current, start, end))
    }

    /// Replaces the sequence at `path` with a slice of itself.
    pub fn slice_in(self, path: impl Into<Path>, start: i64, end: Option<i64>) -> Result<Self> {
        let path = path.into();
        self.then(|current| {
            let sliced = ops::slice_in(current, &path, start, end)?;
            ops::set_in(current, &path, sliced)
        })
    }

    pub fn splice(
        self,
        start: i64,
        delete_count: i64,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        self.then(|current| ops::splice(current, start, delete_count, items))
    }

    pub fn splice_in(
        self,
        path: impl Into<Path>,
        start: i64,
        delete_count: i64,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        self.then(|current| ops::splice_in(current, path, start, delete_count, items))
    }
}

impl From<Chain> for Value {
    fn from(chain: Chain) -> Self {
        chain.value
    }
}
