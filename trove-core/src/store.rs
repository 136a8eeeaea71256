//! In-memory record stores.
//!
//! Each store owns an insertion-ordered id→record map behind an `RwLock`
//! and a monotonic id counter. Every operation holds the lock across its
//! whole check-then-mutate sequence, so uniqueness checks and id
//! assignment cannot interleave between concurrent requests. Both the
//! collection route and the by-id route must share one store instance.

use std::sync::RwLock;

use indexmap::IndexMap;

use crate::error::StoreError;
use crate::model::{Product, ProductDraft, User, UserDraft, UserPatch};
use crate::query::ProductQuery;
use crate::validate;

/// Outcome of a successful delete: the removed record plus how many remain.
#[derive(Debug, Clone, PartialEq)]
pub struct Removal<T> {
    pub record: T,
    pub remaining: usize,
}

#[derive(Debug)]
struct Registry<T> {
    records: IndexMap<u64, T>,
    next_id: u64,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        // An empty collection hands out id 1 first.
        Self { records: IndexMap::new(), next_id: 1 }
    }
}

impl<T> Registry<T> {
    fn seeded(records: impl IntoIterator<Item = (u64, T)>) -> Self {
        let records: IndexMap<u64, T> = records.into_iter().collect();
        let next_id = records.keys().max().copied().unwrap_or(0) + 1;
        Self { records, next_id }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Filtered product listing plus the unfiltered collection size.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Records passing the query, sorted if the query asked for it.
    pub products: Vec<Product>,
    /// Size of the collection before filtering.
    pub total: usize,
}

// ── Users ─────────────────────────────────────────────────────────────────────

/// Thread-safe registry of user records.
#[derive(Debug, Default)]
pub struct UserStore {
    inner: RwLock<Registry<User>>,
}

impl UserStore {
    /// Create an empty store; the first assigned id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given records. The id counter
    /// starts above the highest seeded id.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = User>) -> Self {
        Self {
            inner: RwLock::new(Registry::seeded(records.into_iter().map(|u| (u.id, u)))),
        }
    }

    /// Return every user in insertion order.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned (a previous thread
    /// panicked while holding the lock).
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.inner
            .read()
            .expect("user store read lock poisoned")
            .records
            .values()
            .cloned()
            .collect()
    }

    /// Validate a draft, normalize its fields, and insert a new user.
    ///
    /// # Errors
    /// Returns a validation error for a blank name, malformed email, or
    /// out-of-range age, or [`StoreError::DuplicateEmail`] if the
    /// normalized email is already registered.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn create(&self, draft: UserDraft) -> Result<User, StoreError> {
        let name = validate::normalize_name(&draft.name)?;
        let email = validate::normalize_email(&draft.email)?;
        let age = validate::check_age(draft.age)?;

        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut registry = self.inner.write().expect("user store write lock poisoned");
        if registry.records.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail(email));
        }
        let id = registry.allocate_id();
        let user = User { id, name, email, age };
        registry.records.insert(id, user.clone());
        Ok(user)
    }

    /// Merge the set fields of `patch` into the user with the given id,
    /// validating each one with the create rules first. Unset fields are
    /// left untouched. Nothing is mutated on any error.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] for an unknown id, a validation error for
    /// any invalid field, or [`StoreError::DuplicateEmail`] if the new
    /// email belongs to a *different* user.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn update(&self, id: u64, patch: UserPatch) -> Result<User, StoreError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut registry = self.inner.write().expect("user store write lock poisoned");
        if !registry.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        let name = patch.name.as_deref().map(validate::normalize_name).transpose()?;
        let email = patch.email.as_deref().map(validate::normalize_email).transpose()?;
        let age = patch.age.map(validate::check_age).transpose()?;

        if let Some(email) = &email {
            if registry.records.values().any(|u| u.email == *email && u.id != id) {
                return Err(StoreError::DuplicateEmail(email.clone()));
            }
        }

        let Some(user) = registry.records.get_mut(&id) else {
            return Err(StoreError::NotFound(id));
        };
        if let Some(name) = name {
            user.name = name;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(age) = age {
            user.age = age;
        }
        Ok(user.clone())
    }

    /// Remove a user by id.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for an unknown id; the collection
    /// is left unchanged.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn remove(&self, id: u64) -> Result<Removal<User>, StoreError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut registry = self.inner.write().expect("user store write lock poisoned");
        // shift_remove keeps the insertion order of the survivors.
        let record = registry
            .records
            .shift_remove(&id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(Removal { record, remaining: registry.records.len() })
    }
}

// ── Products ──────────────────────────────────────────────────────────────────

/// Thread-safe registry of product records.
#[derive(Debug, Default)]
pub struct ProductStore {
    inner: RwLock<Registry<Product>>,
}

impl ProductStore {
    /// Create an empty store; the first assigned id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given records. The id counter
    /// starts above the highest seeded id.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = Product>) -> Self {
        Self {
            inner: RwLock::new(Registry::seeded(records.into_iter().map(|p| (p.id, p)))),
        }
    }

    /// Apply the query's filters and sort to the collection.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn list(&self, query: &ProductQuery) -> Listing {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let registry = self.inner.read().expect("product store read lock poisoned");
        let total = registry.records.len();
        let mut products: Vec<Product> = registry
            .records
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        query.sort(&mut products);
        Listing { products, total }
    }

    /// Validate a draft and insert a new product.
    ///
    /// # Errors
    /// Returns a validation error for a blank name or non-positive price,
    /// or [`StoreError::DuplicateName`] if another product already uses the
    /// name, ignoring case.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let name = validate::normalize_name(&draft.name)?;
        let price = validate::check_price(draft.price)?;

        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut registry = self.inner.write().expect("product store write lock poisoned");
        let lowered = name.to_lowercase();
        if registry.records.values().any(|p| p.name.to_lowercase() == lowered) {
            return Err(StoreError::DuplicateName(name));
        }
        let id = registry.allocate_id();
        let product = Product { id, name, price };
        registry.records.insert(id, product.clone());
        Ok(product)
    }

    /// Fetch a product by id.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for an unknown id.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn get(&self, id: u64) -> Result<Product, StoreError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.inner
            .read()
            .expect("product store read lock poisoned")
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Remove a product by id.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] for an unknown id; the collection
    /// is left unchanged.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn remove(&self, id: u64) -> Result<Removal<Product>, StoreError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut registry = self.inner.write().expect("product store write lock poisoned");
        let record = registry
            .records
            .shift_remove(&id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(Removal { record, remaining: registry.records.len() })
    }
}
