//! Error types for update operations.
//!
//! This module defines the structured usage errors raised by the update engine.
//! Every error is raised synchronously at the point of misuse, before any new
//! container becomes visible to the caller, so a failed call never leaves a
//! partially-applied result behind.

use thiserror::Error;

/// Structured error types for update operations.
///
/// Each variant names the kind of misuse and carries enough context
/// (the offending path or the type actually found) to point at the call
/// that produced it.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    /// The path was empty or could not address the container it was applied to
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// An operation requiring a sequence found something else
    #[error("Value at '{path}' should be a sequence, found {found}")]
    NotAnArray { path: String, found: &'static str },

    /// Merge or replace was invoked with a source that is neither a record nor null
    #[error("Merge can only be invoked with records or sequences of records, not {found}")]
    InvalidMergeSource { found: &'static str },

    /// Merge was invoked on a target that cannot receive keys
    #[error("Merge target must be a record or null, found {found}")]
    InvalidMergeTarget { found: &'static str },

    /// A record-only operation received something else
    #[error("{operation} can only be applied to records, found {found}")]
    NotARecord {
        operation: &'static str,
        found: &'static str,
    },
}

impl UpdateError {
    /// Check if this error is related to path handling
    pub fn is_path_error(&self) -> bool {
        matches!(self, UpdateError::InvalidPath { .. })
    }

    /// Check if this error is a sequence type mismatch
    pub fn is_array_error(&self) -> bool {
        matches!(self, UpdateError::NotAnArray { .. })
    }

    /// Check if this error came from the merge engine
    pub fn is_merge_error(&self) -> bool {
        matches!(
            self,
            UpdateError::InvalidMergeSource { .. } | UpdateError::InvalidMergeTarget { .. }
        )
    }

    /// Check if this error is a record type mismatch
    pub fn is_record_error(&self) -> bool {
        matches!(self, UpdateError::NotARecord { .. })
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            UpdateError::InvalidPath { path, .. } | UpdateError::NotAnArray { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }

    /// Get the name of the value type that triggered the error, if recorded
    pub fn found(&self) -> Option<&'static str> {
        match self {
            UpdateError::NotAnArray { found, .. }
            | UpdateError::InvalidMergeSource { found }
            | UpdateError::InvalidMergeTarget { found }
            | UpdateError::NotARecord { found, .. } => Some(found),
            UpdateError::InvalidPath { .. } => None,
        }
    }
}

// Conversion from UpdateError to the main Error type
impl From<UpdateError> for crate::Error {
    fn from(err: UpdateError) -> Self {
        crate::Error::Update(err)
    }
}
