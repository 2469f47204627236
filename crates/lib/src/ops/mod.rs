//! The update engine.
//!
//! Every operation here is a pure function from an input tree to an output
//! tree. Inputs are never modified; outputs share every unchanged branch with
//! the input by reference.
//!
//! - [`set`] / [`set_in`] - the path setter everything else writes through
//! - [`merge`] and friends - key-wise merging, shallow or deep, merge or replace
//! - [`update`] / [`update_in`] - read, transform, write back
//! - [`without`] - drop keys from a record
//! - [`concat`], [`splice`], [`slice`], ... - copy-on-write sequence operations
//! - [`get`] / [`get_or`] - safe nested reads

pub mod array;
pub mod get;
pub mod merge;
pub mod set;
pub mod update;
pub mod without;

pub use array::{concat, flat_map, slice, slice_in, splice, splice_in, unshift};
pub use get::{get, get_or};
pub use merge::{
    MergeConfig, MergeMode, Merger, merge, merge_all, merge_deep, replace, replace_deep,
};
pub use set::{MAX_SEQUENCE_GAP, set, set_in};
pub use update::{merge_deep_in, merge_in, try_update_in, update, update_in};
pub use without::{KeySelector, without};
