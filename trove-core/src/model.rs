//! Record types for the two trove collections.

use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct User {
    /// Unique id, assigned monotonically by the store.
    pub id: u64,

    /// Display name, stored trimmed and never empty.
    pub name: String,

    /// Contact email, stored trimmed and lowercased; unique per store.
    pub email: String,

    /// Age in years, within `[0, 120]`.
    pub age: u8,
}

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Product {
    /// Unique id, assigned monotonically by the store.
    pub id: u64,

    /// Product name, stored trimmed; unique per store ignoring case.
    pub name: String,

    /// Unit price, strictly positive.
    pub price: f64,
}

/// Raw input for creating a user. Fields are validated and normalized by
/// [`crate::store::UserStore::create`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    /// Accepted as a wide integer so out-of-range values reach the
    /// validator instead of failing at the type boundary.
    pub age: i64,
}

/// Partial update for a user. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

impl UserPatch {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

/// Raw input for creating a product, validated by
/// [`crate::store::ProductStore::create`].
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
}
