//! Safe nested reads.

use crate::{
    path::{Path, Segment},
    value::Value,
};

/// Returns the value at `path`, or `None` if any segment is missing.
///
/// Indexing into a scalar or a date, an out-of-range index, and a key that
/// does not name an index of a sequence all resolve to `None`. Record
/// lookups see inherited shape entries. An empty path resolves to `None`.
///
/// ```
/// use immutree::{get, record, seq, Value};
///
/// let state = record! { "users" => seq![record! { "name" => "Ada" }] };
/// assert_eq!(get(&state, "users[0].name"), Some(&Value::from("Ada")));
/// assert_eq!(get(&state, "users[3].name"), None);
/// ```
pub fn get<'a>(value: &'a Value, path: impl Into<Path>) -> Option<&'a Value> {
    get_segments(value, path.into().segments())
}

/// Like [`get`], but returns `default` when the path does not resolve.
pub fn get_or(value: &Value, path: impl Into<Path>, default: impl Into<Value>) -> Value {
    match get(value, path) {
        Some(found) => found.clone(),
        None => default.into(),
    }
}

pub(crate) fn get_segments<'a>(value: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    if segments.is_empty() {
        return None;
    }
    segments
        .iter()
        .try_fold(value, |current, segment| child(current, segment))
}

/// One step of a read: the child of `value` named by `segment`.
pub(crate) fn child<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match value {
        Value::Record(record) => record.get(&segment.to_key()),
        Value::Sequence(seq) => segment.to_index().and_then(|i| seq.get(i)),
        _ => None,
    }
}
