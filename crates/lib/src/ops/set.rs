//! The path setter.
//!
//! Writes a value at a path and returns a new root. Only the containers on the
//! way from the root to the written leaf are copied; every sibling branch is
//! shared with the input by reference. When the write does not change
//! anything (per [`Value::same`]) the input root itself is returned.

use tracing::{debug, trace};

use crate::{
    Result,
    errors::UpdateError,
    path::{Path, Segment, display_segments},
    value::{Record, Sequence, Value},
};

/// How far past the end of a sequence a write may land.
///
/// The gap is padded with `Null`, so an unbounded index would ask for an
/// arbitrarily large allocation.
pub const MAX_SEQUENCE_GAP: usize = 1 << 16;

/// Sets a single key (or index) of a container.
///
/// ```
/// use immutree::{record, set, Value};
///
/// let state = record! { "a" => 1, "b" => 2 };
/// let next = set(&state, "a", 10)?;
/// assert_eq!(next, record! { "a" => 10, "b" => 2 });
/// assert!(set(&next, "a", 10)?.same(&next));
/// # Ok::<(), immutree::Error>(())
/// ```
pub fn set(root: &Value, key: impl Into<Segment>, value: impl Into<Value>) -> Result<Value> {
    let segments = [key.into()];
    set_segments(root, &segments, value.into())
}

/// Sets the value at `path`, creating missing containers on the way.
///
/// Missing or non-container intermediates are replaced by an empty record,
/// or by an empty sequence when the next segment is an index.
///
/// # Errors
/// - [`UpdateError::InvalidPath`] if `path` is empty, if a key that is not
///   an index is used to address a sequence, or if an index lands more than
///   [`MAX_SEQUENCE_GAP`] elements past the end of a sequence.
///
/// ```
/// use immutree::{record, seq, set_in};
///
/// let state = record! { "a" => record! { "x" => 1 }, "b" => record! { "y" => 2 } };
/// let next = set_in(&state, "a.x", 9)?;
///
/// let b_before = state.as_record().unwrap().get("b").unwrap();
/// let b_after = next.as_record().unwrap().get("b").unwrap();
/// assert!(b_before.same(b_after));
///
/// let grown = set_in(&record! {}, "list[1].name", "x")?;
/// assert_eq!(grown, record! { "list" => seq![(), record! { "name" => "x" }] });
/// # Ok::<(), immutree::Error>(())
/// ```
pub fn set_in(root: &Value, path: impl Into<Path>, value: impl Into<Value>) -> Result<Value> {
    let path = path.into();
    set_segments(root, path.segments(), value.into())
}

pub(crate) fn set_segments(root: &Value, segments: &[Segment], value: Value) -> Result<Value> {
    if segments.is_empty() {
        debug!("rejecting write through an empty path");
        return Err(UpdateError::InvalidPath {
            path: display_segments(segments),
            reason: "path must contain at least one segment".to_string(),
        }
        .into());
    }
    set_at(root, segments, value, segments)
}

/// Recursive step. `remaining` is a non-empty suffix of `full`.
fn set_at(container: &Value, remaining: &[Segment], value: Value, full: &[Segment]) -> Result<Value> {
    let Some((head, tail)) = remaining.split_first() else {
        return Ok(value);
    };

    match container {
        Value::Sequence(seq) => {
            let Some(index) = head.to_index() else {
                let at = display_segments(&full[..full.len() - tail.len()]);
                debug!(path = %at, "key cannot address a sequence");
                return Err(UpdateError::InvalidPath {
                    path: at,
                    reason: format!("key '{head}' cannot index a sequence"),
                }
                .into());
            };
            if index.saturating_sub(seq.len()) > MAX_SEQUENCE_GAP {
                let at = display_segments(&full[..full.len() - tail.len()]);
                debug!(path = %at, index, len = seq.len(), "index too far past sequence end");
                return Err(UpdateError::InvalidPath {
                    path: at,
                    reason: format!(
                        "index {index} is more than {MAX_SEQUENCE_GAP} past the end of a sequence of length {}",
                        seq.len()
                    ),
                }
                .into());
            }
            let existing = seq.get(index);
            let child = new_child(existing, tail, value, full)?;
            if existing.is_some_and(|current| current.same(&child)) {
                return Ok(container.clone());
            }
            trace!(index, len = seq.len(), "forking sequence");
            Ok(Value::Sequence(write_index(seq, index, child)))
        }
        Value::Record(record) => {
            let key = head.to_key();
            let existing = record.get_own(&key);
            let child = new_child(existing, tail, value, full)?;
            if existing.is_some_and(|current| current.same(&child)) {
                return Ok(container.clone());
            }
            trace!(key = %key, "forking record");
            Ok(Value::Record(write_key(record, key.into_owned(), child)))
        }
        _ => set_at(&vivify(head), remaining, value, full),
    }
}

/// Computes the value that will live under the current segment.
fn new_child(
    existing: Option<&Value>,
    tail: &[Segment],
    value: Value,
    full: &[Segment],
) -> Result<Value> {
    let Some(next) = tail.first() else {
        return Ok(value);
    };
    match existing {
        Some(child) if child.is_container() => set_at(child, tail, value, full),
        _ => set_at(&vivify(next), tail, value, full),
    }
}

/// An empty container suitable for being addressed by `next`.
pub(crate) fn vivify(next: &Segment) -> Value {
    if next.is_index() {
        Value::Sequence(Sequence::new())
    } else {
        Value::Record(Record::new())
    }
}

/// Copy of `seq` with `index` overwritten. Gaps are padded with `Null`.
///
/// Callers bound `index` to at most [`MAX_SEQUENCE_GAP`] past the end.
pub(crate) fn write_index(seq: &Sequence, index: usize, value: Value) -> Sequence {
    let mut items = seq.to_vec();
    if index < items.len() {
        items[index] = value;
    } else {
        items.resize(index, Value::Null);
        items.push(value);
    }
    items.into()
}

/// Copy of `record` (same shape) with `key` overwritten or added.
pub(crate) fn write_key(record: &Record, key: String, value: Value) -> Record {
    let mut entries = record.clone_entries();
    entries.insert(key, value);
    Record::from_parts(record.shape().clone(), entries)
}
