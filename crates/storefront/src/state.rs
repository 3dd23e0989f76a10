//! Storefront state shared across the application.
//!
//! [`Storefront`] is the single handle the view layer talks to: it owns the
//! catalog, the storage handle, and the four durable stores, and composes
//! the cross-store checkout flow. Stores are reached through accessor pairs
//! so reads stay cheap and writes are explicit.

use rust_decimal::Decimal;

use shopkart_core::Address;

use crate::catalog::Catalog;
use crate::error::CheckoutError;
use crate::storage::Storage;
use crate::stores::cart::CartStore;
use crate::stores::orders::{Order, OrderStore};
use crate::stores::session::SessionStore;
use crate::stores::wishlist::WishlistStore;

/// Orders under this amount pay the delivery charge.
const FREE_DELIVERY_THRESHOLD: u32 = 499;

/// Flat delivery charge below the threshold.
const DELIVERY_CHARGE: u32 = 49;

/// The assembled commerce engine.
pub struct Storefront {
    catalog: Catalog,
    session: SessionStore,
    cart: CartStore,
    wishlist: WishlistStore,
    orders: OrderStore,
}

impl Storefront {
    /// Open a storefront over a catalog and a storage handle, re-hydrating
    /// every store from its slot.
    #[must_use]
    pub fn open(catalog: Catalog, storage: Storage) -> Self {
        Self {
            catalog,
            session: SessionStore::open(storage.clone()),
            cart: CartStore::open(storage.clone()),
            wishlist: WishlistStore::open(storage.clone()),
            orders: OrderStore::open(storage),
        }
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Session state, read-only.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Session state, for mutations.
    pub const fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    /// Cart state, read-only.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Cart state, for mutations.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Wishlist state, read-only.
    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// Wishlist state, for mutations.
    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    /// Order history, read-only.
    #[must_use]
    pub const fn orders(&self) -> &OrderStore {
        &self.orders
    }

    /// Delivery charge for the current cart total.
    #[must_use]
    pub fn delivery_charge(&self) -> Decimal {
        if self.cart.total_amount() >= Decimal::from(FREE_DELIVERY_THRESHOLD) {
            Decimal::ZERO
        } else {
            Decimal::from(DELIVERY_CHARGE)
        }
    }

    /// Cart total plus delivery charge.
    #[must_use]
    pub fn payable_total(&self) -> Decimal {
        self.cart.total_amount() + self.delivery_charge()
    }

    /// Place an order for the current cart and clear the cart.
    ///
    /// The order is attributed to the session user, or to the guest owner
    /// when nobody is signed in. Creating the order and clearing the cart
    /// are two independent slot writes - if the process dies between them,
    /// the order exists and the cart is still full. Known limitation; a
    /// combined commit would close it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to order
    /// and [`CheckoutError::InvalidAddress`] when the address fails
    /// validation. Neither changes any state.
    pub fn checkout(&mut self, address: Address) -> Result<Order, CheckoutError> {
        if self.cart.lines().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        address.validate()?;

        let total = self.payable_total();
        let lines = self.cart.lines().to_vec();
        let order = self
            .orders
            .create_order(&lines, address, total, self.session.current_user());

        self.cart.clear();
        Ok(order)
    }
}
