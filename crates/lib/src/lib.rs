//!
//! Immutree: structural-sharing immutable updates for nested data.
//!
//! Applications that keep a large nested state value often need to produce
//! many slightly different versions of it: undo stacks, state containers,
//! change detection by reference comparison. This library produces each new
//! version by copying only the containers on the path to what changed and
//! sharing everything else with the previous version.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: atomic values plus two container kinds,
//!   records (`value::Record`, string-keyed and shape-aware) and sequences
//!   (`value::Sequence`). Containers are reference counted and immutable.
//! * **Paths (`path::Path`)**: ordered key/index segments, parsed from
//!   `"a.b[0].c"` or built with [`path!`].
//! * **The update engine (`ops`)**: the path setter, merge engine, updater,
//!   key remover and sequence primitives. Each is a pure function returning a
//!   new root, or the input root itself when nothing changed.
//! * **Chains (`chain::Chain`)**: a builder that threads one value through a
//!   series of engine operations.
//!
//! ```
//! use immutree::{record, set_in, Value};
//!
//! let before = record! {
//!     "a" => record! { "x" => 1 },
//!     "b" => record! { "y" => 2 },
//! };
//! let after = set_in(&before, "a.x", 9)?;
//!
//! assert_eq!(immutree::get(&after, "a.x"), Some(&Value::Int(9)));
//! assert_eq!(immutree::get(&before, "a.x"), Some(&Value::Int(1)));
//! assert!(immutree::get(&after, "b").unwrap().same(immutree::get(&before, "b").unwrap()));
//! # Ok::<(), immutree::Error>(())
//! ```

pub mod chain;
pub mod errors;
pub mod ops;
pub mod path;
pub mod value;

pub use chain::{Chain, chain};
pub use errors::UpdateError;
pub use ops::{
    KeySelector, MAX_SEQUENCE_GAP, MergeConfig, MergeMode, Merger, concat, flat_map, get, get_or,
    merge, merge_all, merge_deep, merge_deep_in, merge_in, replace, replace_deep, set, set_in,
    slice, slice_in, splice, splice_in, try_update_in, unshift, update, update_in, without,
};
pub use path::{Path, Segment};
pub use value::{Record, Sequence, Shape, Value};

/// Result type used throughout the Immutree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Immutree library.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Structured usage errors from the update engine
    #[error(transparent)]
    Update(UpdateError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Update(_) => "ops",
        }
    }

    /// Check if this error is an invalid or unusable path.
    pub fn is_path_error(&self) -> bool {
        match self {
            Error::Update(err) => err.is_path_error(),
        }
    }

    /// Check if this error is a sequence type mismatch.
    pub fn is_array_error(&self) -> bool {
        match self {
            Error::Update(err) => err.is_array_error(),
        }
    }

    /// Check if this error was raised by the merge engine.
    pub fn is_merge_error(&self) -> bool {
        match self {
            Error::Update(err) => err.is_merge_error(),
        }
    }

    /// Check if this error is a record type mismatch.
    pub fn is_record_error(&self) -> bool {
        match self {
            Error::Update(err) => err.is_record_error(),
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::Update(err) => err.path(),
        }
    }

    /// The structured update error behind this error.
    pub fn as_update_error(&self) -> Option<&UpdateError> {
        match self {
            Error::Update(err) => Some(err),
        }
    }
}
