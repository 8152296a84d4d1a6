//! Construction errors.
//!
//! Every constructor that validates its arguments returns
//! `Result<_, ConstructionError>`. A failed construction produces no tree;
//! there is no partially built diagram.

use thiserror::Error;

/// Reasons a node cannot be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// The `normal` index of a branching container does not name one of its items.
    #[error("{container}: index {index} does not refer to one of its {len} items")]
    InvalidIndex {
        container: &'static str,
        index: i64,
        len: usize,
    },

    /// A container that needs at least one item was given none.
    #[error("{container} must have at least one item")]
    EmptyChildren { container: &'static str },

    /// An enumerated argument received a value outside its allowed set.
    #[error("{container}: invalid {argument} `{value}`, valid values: {expected}")]
    InvalidEnum {
        container: &'static str,
        argument: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A container received a number of items it does not support.
    #[error("{container} takes {expected} items, got {found}")]
    ArityMismatch {
        container: &'static str,
        expected: &'static str,
        found: usize,
    },
}

impl ConstructionError {
    /// Returns the name of the node type whose construction failed.
    pub fn container(&self) -> &'static str {
        match self {
            Self::InvalidIndex { container, .. }
            | Self::EmptyChildren { container }
            | Self::InvalidEnum { container, .. }
            | Self::ArityMismatch { container, .. } => container,
        }
    }
}
