//! Copy-on-write sequence operations.
//!
//! None of these ever modify the input sequence; each returns a fresh one.
//! Index arguments are signed so that negative positions count from the end,
//! the way conventional `slice`/`splice` do.

use tracing::debug;

use crate::{
    Result,
    errors::UpdateError,
    ops::{get::get_segments, set::set_segments, update::try_update_in},
    path::Path,
    value::{Sequence, Value},
};

const STANDALONE: &str = "(value)";

fn not_an_array(path: &str, found: &Value) -> crate::Error {
    debug!(path, found = found.type_name(), "expected a sequence");
    UpdateError::NotAnArray {
        path: path.to_string(),
        found: found.type_name(),
    }
    .into()
}

fn expect_sequence<'v>(value: &'v Value, path: &str) -> Result<&'v Sequence> {
    match value {
        Value::Sequence(seq) => Ok(seq),
        other => Err(not_an_array(path, other)),
    }
}

/// Resolves a possibly-negative position against `len`, clamped to `0..=len`.
fn resolve_position(position: i64, len: usize) -> usize {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if position < 0 {
        len_i.saturating_add(position).max(0)
    } else {
        position.min(len_i)
    };
    // Always within 0..=len here
    usize::try_from(resolved).unwrap_or(len)
}

/// Appends `items` to the sequence at `path`.
///
/// An absent value at `path` is treated as an empty sequence.
///
/// # Errors
/// [`UpdateError::NotAnArray`] if `items`, or the value at `path`, is not a
/// sequence.
///
/// ```
/// use immutree::{concat, record, seq};
///
/// let state = record! { "a" => seq![1, 2] };
/// assert_eq!(concat(&state, "a", seq![3])?, record! { "a" => seq![1, 2, 3] });
/// assert_eq!(concat(&state, "b", seq![3])?, record! { "a" => seq![1, 2], "b" => seq![3] });
/// # Ok::<(), immutree::Error>(())
/// ```
pub fn concat(root: &Value, path: impl Into<Path>, items: impl Into<Value>) -> Result<Value> {
    concat_direction(root, path.into(), items.into(), Direction::Append)
}

/// Prepends `items` to the sequence at `path`. See [`concat`].
pub fn unshift(root: &Value, path: impl Into<Path>, items: impl Into<Value>) -> Result<Value> {
    concat_direction(root, path.into(), items.into(), Direction::Prepend)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Append,
    Prepend,
}

fn concat_direction(root: &Value, path: Path, items: Value, direction: Direction) -> Result<Value> {
    let at = path.to_string();
    let items = expect_sequence(&items, STANDALONE)?;

    try_update_in(root, path, |current| {
        let existing = match current {
            None => &[][..],
            Some(value) => expect_sequence(value, &at)?.as_slice(),
        };
        let (first, second) = match direction {
            Direction::Append => (existing, items.as_slice()),
            Direction::Prepend => (items.as_slice(), existing),
        };
        let mut joined = Vec::with_capacity(first.len() + second.len());
        joined.extend_from_slice(first);
        joined.extend_from_slice(second);
        Ok(Value::Sequence(joined.into()))
    })
}

/// Returns the elements of `array` from `start` up to, but not including, `end`.
///
/// Negative positions count from the end; `None` for `end` means the length.
///
/// # Errors
/// [`UpdateError::NotAnArray`] if `array` is not a sequence.
pub fn slice(array: &Value, start: i64, end: Option<i64>) -> Result<Value> {
    let seq = expect_sequence(array, STANDALONE)?;
    Ok(Value::Sequence(slice_sequence(seq, start, end)))
}

fn slice_sequence(seq: &Sequence, start: i64, end: Option<i64>) -> Sequence {
    let len = seq.len();
    let from = resolve_position(start, len);
    let to = end.map_or(len, |end| resolve_position(end, len));
    if from >= to {
        return Sequence::new();
    }
    seq.as_slice()[from..to].to_vec().into()
}

/// Returns a slice of the sequence found at `path`. See [`slice`].
///
/// # Errors
/// [`UpdateError::NotAnArray`] if the value at `path` is absent or not a
/// sequence.
pub fn slice_in(root: &Value, path: impl Into<Path>, start: i64, end: Option<i64>) -> Result<Value> {
    let path = path.into();
    let seq = sequence_at(root, &path)?;
    Ok(Value::Sequence(slice_sequence(seq, start, end)))
}

/// Returns a copy of `array` with `delete_count` elements removed at `start`
/// and `items` inserted in their place.
///
/// `start` is clamped into the sequence (negative counts from the end) and
/// `delete_count` is clamped to what is available, never below zero. Items
/// that are themselves sequences are inserted as single elements.
///
/// ```
/// use immutree::{seq, splice, Value};
///
/// let spliced = splice(
///     &seq![1, 2, 3, 4],
///     0,
///     0,
///     vec![seq![seq![0.1], 0.2], Value::from(0.3), Value::from(0.4)],
/// )?;
/// assert_eq!(spliced, seq![seq![seq![0.1], 0.2], 0.3, 0.4, 1, 2, 3, 4]);
/// # Ok::<(), immutree::Error>(())
/// ```
///
/// # Errors
/// [`UpdateError::NotAnArray`] if `array` is not a sequence.
pub fn splice(
    array: &Value,
    start: i64,
    delete_count: i64,
    items: impl IntoIterator<Item = Value>,
) -> Result<Value> {
    let seq = expect_sequence(array, STANDALONE)?;
    Ok(Value::Sequence(splice_sequence(seq, start, delete_count, items)))
}

fn splice_sequence(
    seq: &Sequence,
    start: i64,
    delete_count: i64,
    items: impl IntoIterator<Item = Value>,
) -> Sequence {
    let len = seq.len();
    let from = resolve_position(start, len);
    let available = len - from;
    let deleted = usize::try_from(delete_count.max(0))
        .unwrap_or(usize::MAX)
        .min(available);

    let mut copy = seq.to_vec();
    copy.splice(from..from + deleted, items);
    copy.into()
}

/// Splices the sequence found at `path` and writes the result back.
///
/// # Errors
/// [`UpdateError::NotAnArray`] if the value at `path` is absent or not a
/// sequence; path errors as for [`set_in`](crate::set_in).
pub fn splice_in(
    root: &Value,
    path: impl Into<Path>,
    start: i64,
    delete_count: i64,
    items: impl IntoIterator<Item = Value>,
) -> Result<Value> {
    let path = path.into();
    let seq = sequence_at(root, &path)?;
    let spliced = splice_sequence(seq, start, delete_count, items);
    set_segments(root, path.segments(), Value::Sequence(spliced))
}

/// Maps every element through `mapper`, splicing sequence results in one level
/// deep and pushing any other result as a single element.
///
/// ```
/// use immutree::{flat_map, seq, Value};
///
/// let letters = flat_map(&seq![97, 98], |v, _| {
///     let c = char::from(v.as_int().unwrap_or(0) as u8);
///     seq![c.to_string(), c.to_ascii_uppercase().to_string()]
/// })?;
/// assert_eq!(letters, seq!["a", "A", "b", "B"]);
/// # Ok::<(), immutree::Error>(())
/// ```
///
/// # Errors
/// [`UpdateError::NotAnArray`] if `array` is not a sequence.
pub fn flat_map<F>(array: &Value, mut mapper: F) -> Result<Value>
where
    F: FnMut(&Value, usize) -> Value,
{
    let seq = expect_sequence(array, STANDALONE)?;
    let mut result = Vec::with_capacity(seq.len());
    for (index, item) in seq.iter().enumerate() {
        match mapper(item, index) {
            Value::Sequence(inner) => result.extend_from_slice(inner.as_slice()),
            other => result.push(other),
        }
    }
    Ok(Value::Sequence(result.into()))
}

fn sequence_at<'v>(root: &'v Value, path: &Path) -> Result<&'v Sequence> {
    match get_segments(root, path.segments()) {
        Some(value) => expect_sequence(value, &path.to_string()),
        None => Err(not_an_array(&path.to_string(), &Value::Null)),
    }
}
