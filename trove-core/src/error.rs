//! Error types for the `trove-core` crate.

use crate::validate::ValidationError;

/// Errors produced by the in-memory stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// A field failed validation; nothing was mutated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record with the given id exists in the collection.
    #[error("no record with id {0}")]
    NotFound(u64),

    /// Another user already owns this (normalized) email.
    #[error("a user with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Another product already uses this name, ignoring case.
    #[error("a product named '{0}' already exists")]
    DuplicateName(String),
}
