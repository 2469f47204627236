//! The merge engine.
//!
//! Merging copies the keys of one or more source records onto a target
//! record. The target is only copied ("forked") on the first key whose value
//! actually changes, so a merge that changes nothing returns the target
//! itself, and under deep merge every untouched nested record is shared.

use std::{collections::HashSet, fmt, sync::Arc};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Result,
    errors::UpdateError,
    value::{Record, Value},
};

/// Custom per-key combiner.
///
/// Called with the target's current value for the key (if any, including
/// inherited shape entries), the incoming value, and the active
/// configuration. Returning `Some` overrides the normal merge behaviour for
/// that key; `None` falls back to it.
pub type Merger = Arc<dyn Fn(Option<&Value>, &Value, &MergeConfig) -> Option<Value> + Send + Sync>;

/// How keys missing from the source are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Keys absent from the source are kept
    #[default]
    Merge,
    /// Keys absent from the source are dropped
    Replace,
}

/// Settings for merge-family operations.
///
/// The declarative part (`deep`, `mode`) can be loaded from configuration:
///
/// ```
/// use immutree::{MergeConfig, MergeMode};
///
/// let config: MergeConfig = serde_json::from_str(r#"{"deep": true, "mode": "replace"}"#)?;
/// assert!(config.deep);
/// assert_eq!(config.mode, MergeMode::Replace);
/// assert!(config.merger.is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Recursively merge nested records instead of overwriting them
    pub deep: bool,
    pub mode: MergeMode,
    /// Optional per-key override
    #[serde(skip)]
    pub merger: Option<Merger>,
}

impl MergeConfig {
    /// Shallow merge, the default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep merge.
    pub fn deep() -> Self {
        Self::default().with_deep(true)
    }

    /// Shallow replace.
    pub fn replace() -> Self {
        Self::default().with_mode(MergeMode::Replace)
    }

    pub fn with_deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    pub fn with_mode(mut self, mode: MergeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_merger<F>(mut self, merger: F) -> Self
    where
        F: Fn(Option<&Value>, &Value, &MergeConfig) -> Option<Value> + Send + Sync + 'static,
    {
        self.merger = Some(Arc::new(merger));
        self
    }
}

impl fmt::Debug for MergeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeConfig")
            .field("deep", &self.deep)
            .field("mode", &self.mode)
            .field("merger", &self.merger.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Merges `source` into `target`.
///
/// - A `Null` target yields `source` unchanged; a `Null` source yields
///   `target` unchanged.
/// - A record source is merged key by key.
/// - A sequence source is a prioritized list of records, merged in order
///   (later entries win). See [`merge_all`].
///
/// Sequences inside records are never merged element-wise; the incoming
/// sequence replaces the current one.
///
/// # Errors
/// - [`UpdateError::InvalidMergeSource`] if `source` is a scalar or date, or
///   a sequence containing one.
/// - [`UpdateError::InvalidMergeTarget`] if `target` is not a record.
///
/// ```
/// use immutree::{merge, record, seq, MergeConfig};
///
/// let target = record! { "a" => seq![1, 2, 3], "b" => 1 };
/// let merged = merge(&target, &record! { "a" => seq![2, 3, 4] }, &MergeConfig::new())?;
/// assert_eq!(merged, record! { "a" => seq![2, 3, 4], "b" => 1 });
/// # Ok::<(), immutree::Error>(())
/// ```
pub fn merge(target: &Value, source: &Value, config: &MergeConfig) -> Result<Value> {
    if target.is_null() {
        return Ok(source.clone());
    }
    match source {
        Value::Null => Ok(target.clone()),
        Value::Record(record) => {
            let base = target_record(target)?;
            merge_records(target, base, std::slice::from_ref(record), config)
        }
        Value::Sequence(seq) => {
            let base = target_record(target)?;
            let sources = source_records(seq.as_slice())?;
            merge_records(target, base, &sources, config)
        }
        other => Err(invalid_source(other)),
    }
}

/// Merges an explicit, prioritized list of sources into `target`.
///
/// Sources are applied left to right against the accumulating result, so a
/// later source overrides an earlier one. `Null` entries are skipped. A
/// `Null` target starts from an empty plain record.
pub fn merge_all(target: &Value, sources: &[Value], config: &MergeConfig) -> Result<Value> {
    let empty = Value::Record(Record::new());
    let target = if target.is_null() { &empty } else { target };
    let base = target_record(target)?;
    let sources = source_records(sources)?;
    merge_records(target, base, &sources, config)
}

/// [`merge`] with `deep` forced on.
pub fn merge_deep(target: &Value, source: &Value, config: &MergeConfig) -> Result<Value> {
    merge(target, source, &config.clone().with_deep(true))
}

/// [`merge`] in replace mode: target keys absent from `source` are dropped.
///
/// A record whose key set and values already match is returned unchanged.
pub fn replace(target: &Value, source: &Value, config: &MergeConfig) -> Result<Value> {
    if !source.is_container() {
        return Err(invalid_source(source));
    }
    merge(target, source, &config.clone().with_mode(MergeMode::Replace))
}

/// [`replace`] with `deep` on: nested records are replaced recursively, so
/// identical nested branches keep their identity.
pub fn replace_deep(target: &Value, source: &Value) -> Result<Value> {
    replace(target, source, &MergeConfig::deep())
}

fn target_record(target: &Value) -> Result<&Record> {
    match target {
        Value::Record(record) => Ok(record),
        other => {
            debug!(found = other.type_name(), "rejecting merge target");
            Err(UpdateError::InvalidMergeTarget {
                found: other.type_name(),
            }
            .into())
        }
    }
}

fn source_records(sources: &[Value]) -> Result<Vec<Record>> {
    sources
        .iter()
        .filter(|source| !source.is_null())
        .map(|source| match source {
            Value::Record(record) => Ok(record.clone()),
            other => Err(invalid_source(other)),
        })
        .collect()
}

fn invalid_source(source: &Value) -> crate::Error {
    debug!(found = source.type_name(), "rejecting merge source");
    UpdateError::InvalidMergeSource {
        found: source.type_name(),
    }
    .into()
}

/// Clone-on-first-write view of the record being merged into.
struct Fork<'a> {
    base: &'a Record,
    entries: Option<IndexMap<String, Value>>,
}

impl<'a> Fork<'a> {
    fn new(base: &'a Record) -> Self {
        Self {
            base,
            entries: None,
        }
    }

    fn is_forked(&self) -> bool {
        self.entries.is_some()
    }

    /// Current value for `key`, inherited entries included.
    fn current(&self, key: &str) -> Option<&Value> {
        match &self.entries {
            Some(entries) => entries
                .get(key)
                .or_else(|| self.base.shape().default_for(key)),
            None => self.base.get(key),
        }
    }

    fn has_own(&self, key: &str) -> bool {
        match &self.entries {
            Some(entries) => entries.contains_key(key),
            None => self.base.has_own(key),
        }
    }

    fn entries_mut(&mut self) -> &mut IndexMap<String, Value> {
        let base = self.base;
        self.entries.get_or_insert_with(|| {
            trace!(len = base.len(), "forking record for merge");
            base.clone_entries()
        })
    }

    fn write(&mut self, key: &str, value: Value) {
        self.entries_mut().insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries_mut().shift_remove(key);
    }

    fn finish(self, original: &Value) -> Value {
        match self.entries {
            Some(entries) => Value::Record(Record::from_parts(self.base.shape().clone(), entries)),
            None => original.clone(),
        }
    }
}

fn merge_records(
    original: &Value,
    base: &Record,
    sources: &[Record],
    config: &MergeConfig,
) -> Result<Value> {
    let mut fork = Fork::new(base);

    for source in sources {
        for (key, incoming) in source.iter() {
            merge_key(&mut fork, key, incoming, config)?;
        }
    }

    if config.mode == MergeMode::Replace {
        let kept: HashSet<&str> = sources.iter().flat_map(Record::keys).collect();
        for key in base.keys().filter(|key| !kept.contains(key)) {
            fork.remove(key);
        }
    }

    Ok(fork.finish(original))
}

fn merge_key(fork: &mut Fork<'_>, key: &str, incoming: &Value, config: &MergeConfig) -> Result<()> {
    let has_own = fork.has_own(key);
    let current = fork.current(key);
    let overridden = config
        .merger
        .as_ref()
        .and_then(|merger| merger(current, incoming, config));

    let unchanged = has_own && current.is_some_and(|current| incoming.same(current));
    if !fork.is_forked() && overridden.is_none() && unchanged {
        return Ok(());
    }

    let new_value = match (overridden, current) {
        (Some(value), _) => value,
        (None, Some(current))
            if config.deep && current.is_mergeable() && incoming.is_mergeable() =>
        {
            merge(current, incoming, config)?
        }
        (None, _) => incoming.clone(),
    };

    if !has_own || !fork.current(key).is_some_and(|current| current.same(&new_value)) {
        fork.write(key, new_value);
    }
    Ok(())
}
