//! Read-transform-write updates.
//!
//! An update reads the current value at a path, hands it to a transform and
//! writes the result back through the path setter. Extra arguments for the
//! transform are simply captured by the closure.

use crate::{
    Result,
    ops::{
        get::{child, get_segments},
        merge::{MergeConfig, merge},
        set::set_segments,
    },
    path::{Path, Segment},
    value::Value,
};

/// Updates a single key (or index) with `transform`.
///
/// The transform receives `None` when the key is absent.
///
/// ```
/// use immutree::{record, update, Value};
///
/// let state = record! { "count" => 1 };
/// let step = 10;
/// let next = update(&state, "count", |current| {
///     Value::from(current.and_then(Value::as_int).unwrap_or(0) + step)
/// })?;
/// assert_eq!(next, record! { "count" => 11 });
/// # Ok::<(), immutree::Error>(())
/// ```
pub fn update<F>(root: &Value, key: impl Into<Segment>, transform: F) -> Result<Value>
where
    F: FnOnce(Option<&Value>) -> Value,
{
    let key = key.into();
    let next = transform(child(root, &key));
    set_segments(root, std::slice::from_ref(&key), next)
}

/// Updates the value at `path` with `transform`.
///
/// Missing segments resolve to `None` rather than an error; the write then
/// creates whatever containers are needed.
///
/// # Errors
/// Fails like [`set_in`](crate::set_in) if `path` is empty or cannot address
/// the containers it passes through.
pub fn update_in<F>(root: &Value, path: impl Into<Path>, transform: F) -> Result<Value>
where
    F: FnOnce(Option<&Value>) -> Value,
{
    try_update_in(root, path, |current| Ok(transform(current)))
}

/// Like [`update_in`], for transforms that can fail.
///
/// The transform's error is returned as-is and nothing is written.
pub fn try_update_in<F>(root: &Value, path: impl Into<Path>, transform: F) -> Result<Value>
where
    F: FnOnce(Option<&Value>) -> Result<Value>,
{
    let path = path.into();
    let next = transform(get_segments(root, path.segments()))?;
    set_segments(root, path.segments(), next)
}

/// Merges `source` into the value at `path`.
///
/// An absent value at `path` takes `source` as-is.
///
/// ```
/// use immutree::{merge_in, record, MergeConfig};
///
/// let state = record! { "user" => record! { "name" => "Ada" } };
/// let next = merge_in(&state, "user", &record! { "role" => "admin" }, &MergeConfig::new())?;
/// assert_eq!(next, record! { "user" => record! { "name" => "Ada", "role" => "admin" } });
/// # Ok::<(), immutree::Error>(())
/// ```
pub fn merge_in(
    root: &Value,
    path: impl Into<Path>,
    source: &Value,
    config: &MergeConfig,
) -> Result<Value> {
    try_update_in(root, path, |current| {
        merge(current.unwrap_or(&Value::Null), source, config)
    })
}

/// [`merge_in`] with `deep` forced on.
pub fn merge_deep_in(
    root: &Value,
    path: impl Into<Path>,
    source: &Value,
    config: &MergeConfig,
) -> Result<Value> {
    merge_in(root, path, source, &config.clone().with_deep(true))
}
