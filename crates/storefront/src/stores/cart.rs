//! Shopping cart.
//!
//! At most one line per product id; adding an existing product merges into
//! its line. Totals are derived on every read, never stored. Every mutation
//! writes the full line list back to its slot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopkart_core::ProductId;

use crate::catalog::Product;
use crate::storage::{Storage, slots};

/// One (product, quantity) pair in the cart.
///
/// Holds a snapshot copy of the product, so catalog updates after the line
/// was added do not change what the customer sees at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    /// Always at least 1; a zero quantity removes the line instead.
    pub quantity: u32,
}

/// Durable cart state.
pub struct CartStore {
    storage: Storage,
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Re-hydrate the cart from durable storage.
    #[must_use]
    pub fn open(storage: Storage) -> Self {
        let lines = storage.load(slots::CART_LINES).unwrap_or_default();
        Self { storage, lines }
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of discounted price times quantity across all lines.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.product.discounted_price * Decimal::from(line.quantity))
            .sum()
    }

    /// Whether the cart has a line for this product.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.lines.iter().any(|line| line.product.id == *product_id)
    }

    /// Add `quantity` units of a product.
    ///
    /// Merges into the existing line when present, otherwise appends a new
    /// one. No upper bound is enforced here; stock limits belong to the
    /// caller. Adding zero units changes nothing.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            });
        }
        self.persist();
    }

    /// Replace the quantity of an existing line.
    ///
    /// A quantity of zero removes the line. An unknown product id is a no-op.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == *product_id)
        {
            line.quantity = quantity;
        }
        self.persist();
    }

    /// Drop the line for a product. Absence is not an error.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| line.product.id != *product_id);
        self.persist();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    fn persist(&self) {
        self.storage.save(slots::CART_LINES, &self.lines);
    }
}
