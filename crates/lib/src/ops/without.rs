//! Key removal.

use std::{collections::HashSet, fmt};

use tracing::{debug, trace};

use crate::{
    Result,
    errors::UpdateError,
    path::Segment,
    value::{Record, Value},
};

/// Which keys [`without`] drops.
///
/// Every calling convention (one key, a list of keys, a predicate) is
/// resolved into one of these two variants before the record is touched.
pub enum KeySelector<'a> {
    /// Drop exactly these keys. Index keys are matched by their decimal form.
    Keys(Vec<String>),
    /// Drop every entry for which the predicate returns true.
    Predicate(Box<dyn Fn(&Value, &str) -> bool + 'a>),
}

impl<'a> KeySelector<'a> {
    /// Selects the given keys.
    pub fn keys<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Segment>,
    {
        KeySelector::Keys(
            keys.into_iter()
                .map(|key| key.into().to_key().into_owned())
                .collect(),
        )
    }

    /// Selects entries by `(value, key)`.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &str) -> bool + 'a,
    {
        KeySelector::Predicate(Box::new(predicate))
    }

    /// True for an empty key list, which makes [`without`] a no-op.
    pub fn is_empty(&self) -> bool {
        matches!(self, KeySelector::Keys(keys) if keys.is_empty())
    }
}

impl fmt::Debug for KeySelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySelector::Keys(keys) => f.debug_tuple("Keys").field(keys).finish(),
            KeySelector::Predicate(_) => f.write_str("Predicate(<fn>)"),
        }
    }
}

impl From<&str> for KeySelector<'_> {
    fn from(key: &str) -> Self {
        KeySelector::keys([key])
    }
}

impl From<String> for KeySelector<'_> {
    fn from(key: String) -> Self {
        KeySelector::keys([key])
    }
}

impl From<usize> for KeySelector<'_> {
    fn from(key: usize) -> Self {
        KeySelector::keys([key])
    }
}

impl From<i32> for KeySelector<'_> {
    fn from(key: i32) -> Self {
        KeySelector::keys([key])
    }
}

impl From<Vec<&str>> for KeySelector<'_> {
    fn from(keys: Vec<&str>) -> Self {
        KeySelector::keys(keys)
    }
}

impl From<Vec<String>> for KeySelector<'_> {
    fn from(keys: Vec<String>) -> Self {
        KeySelector::Keys(keys)
    }
}

impl<const N: usize> From<[&str; N]> for KeySelector<'_> {
    fn from(keys: [&str; N]) -> Self {
        KeySelector::keys(keys)
    }
}

/// Returns a copy of `record` without the selected own keys.
///
/// The copy keeps the record's shape. Dropped keys are removed entirely.
/// When nothing is dropped the input is returned as-is.
///
/// # Errors
/// [`UpdateError::NotARecord`] if `record` is not a record.
///
/// ```
/// use immutree::{record, without, KeySelector};
///
/// let numbers = record! { "a" => 1, "b" => 2, "c" => 3, "d" => 4, "e" => 5 };
/// let odd = without(&numbers, KeySelector::predicate(|v, _| v.as_int().is_some_and(|n| n % 2 == 0)))?;
/// assert_eq!(odd, record! { "a" => 1, "c" => 3, "e" => 5 });
///
/// let trimmed = without(&numbers, ["a", "c", "e"])?;
/// assert_eq!(trimmed, record! { "b" => 2, "d" => 4 });
/// # Ok::<(), immutree::Error>(())
/// ```
pub fn without<'a>(record: &Value, selector: impl Into<KeySelector<'a>>) -> Result<Value> {
    let Value::Record(source) = record else {
        debug!(found = record.type_name(), "without applied to a non-record");
        return Err(UpdateError::NotARecord {
            operation: "without",
            found: record.type_name(),
        }
        .into());
    };

    let selector = selector.into();
    if selector.is_empty() {
        return Ok(record.clone());
    }

    let kept = match &selector {
        KeySelector::Keys(keys) => {
            let removed: HashSet<&str> = keys.iter().map(String::as_str).collect();
            filter_entries(source, |_, key| removed.contains(key))
        }
        KeySelector::Predicate(predicate) => filter_entries(source, |value, key| predicate(value, key)),
    };

    if kept.len() == source.len() {
        return Ok(record.clone());
    }
    trace!(removed = source.len() - kept.len(), "forking record without keys");
    Ok(Value::Record(kept))
}

fn filter_entries(source: &Record, remove: impl Fn(&Value, &str) -> bool) -> Record {
    let entries = source
        .iter()
        .filter(|(key, value)| !remove(value, key))
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    Record::from_parts(source.shape().clone(), entries)
}
