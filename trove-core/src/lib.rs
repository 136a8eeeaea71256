//! Core types for the trove in-memory catalogue service.
//!
//! Defines the two record collections (users, products), their validation
//! and normalization rules, the thread-safe stores that own them, and the
//! product listing query model. HTTP concerns live in `trove-gateway`.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod model;
pub mod query;
pub mod seed;
pub mod store;
pub mod validate;

pub use error::StoreError;
pub use model::{Product, ProductDraft, User, UserDraft, UserPatch};
pub use query::{FilterEcho, ProductQuery, RawProductQuery, SortKey, SortOrder};
pub use store::{Listing, ProductStore, Removal, UserStore};
pub use validate::ValidationError;
