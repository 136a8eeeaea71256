//! Shared application state.

use std::sync::Arc;

use trove_core::seed::{seed_products, seed_users};
use trove_core::{ProductStore, UserStore};

/// The two collection stores. A single instance is shared by every route,
/// including the by-id product routes, so all handlers observe the same
/// records.
#[derive(Debug, Default)]
pub struct AppState {
    pub users: UserStore,
    pub products: ProductStore,
}

impl AppState {
    /// Empty stores; ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores pre-populated with the canonical seed records.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            users: UserStore::with_records(seed_users()),
            products: ProductStore::with_records(seed_products()),
        }
    }
}

/// Handler-facing alias for the shared state.
pub type SharedState = Arc<AppState>;
