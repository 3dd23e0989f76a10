//! Wishlist.
//!
//! A set of saved products keyed by product id. Entries remember when they
//! were added; the timestamp is written once at insertion and round-trips
//! through storage as an ISO-8601 string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopkart_core::ProductId;

use crate::catalog::Product;
use crate::storage::{Storage, slots};

/// One saved product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub product: Product,
    pub added_at: DateTime<Utc>,
}

/// Durable wishlist state.
pub struct WishlistStore {
    storage: Storage,
    entries: Vec<WishlistEntry>,
}

impl WishlistStore {
    /// Re-hydrate the wishlist from durable storage.
    #[must_use]
    pub fn open(storage: Storage) -> Self {
        let entries = storage.load(slots::WISHLIST_ENTRIES).unwrap_or_default();
        Self { storage, entries }
    }

    /// Current entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Number of saved products.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether this product is saved.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.product.id == *product_id)
    }

    /// Save a product. Already-saved products are left untouched, including
    /// their original `added_at`.
    pub fn add(&mut self, product: &Product) {
        if self.contains(&product.id) {
            return;
        }

        self.entries.push(WishlistEntry {
            product: product.clone(),
            added_at: Utc::now(),
        });
        self.persist();
    }

    /// Drop a saved product. Absence is not an error.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.entries.retain(|entry| entry.product.id != *product_id);
        self.persist();
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns `true` when the product ended up saved. Applying this twice
    /// always restores the prior membership state.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            self.remove(&product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        self.storage.save(slots::WISHLIST_ENTRIES, &self.entries);
    }
}
