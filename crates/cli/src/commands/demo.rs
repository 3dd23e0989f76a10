//! Scripted end-to-end demo.
//!
//! Opens the storefront over the configured data directory, signs in the
//! demo account (registering it on first run), fills the cart from the
//! catalog, checks out, and reports the order history. Running it twice
//! shows the durable slots at work: the session and past orders survive.

use thiserror::Error;

use shopkart_core::Address;
use shopkart_storefront::catalog::{Catalog, CatalogError, Product};
use shopkart_storefront::error::{AuthError, CheckoutError};
use shopkart_storefront::state::Storefront;
use shopkart_storefront::storage::{FileBackend, Storage};

use crate::config::{Config, ConfigError};

const DEMO_EMAIL: &str = "demo@shopkart.example";
const DEMO_PASSWORD: &str = "letmein";

/// Errors that can occur while running the demo flow.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The catalog dataset could not be loaded.
    #[error("{0} (run `shopkart seed` first)")]
    Catalog(#[from] CatalogError),

    /// The catalog has no products in stock to shop with.
    #[error("catalog has no in-stock products")]
    NothingInStock,

    /// Demo account sign-in failed.
    #[error("demo sign-in failed: {0}")]
    Auth(#[from] AuthError),

    /// Checkout was rejected.
    #[error("checkout failed: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Run the scripted flow.
///
/// # Errors
///
/// Returns a [`DemoError`] if any stage of the flow fails.
pub fn run() -> Result<(), DemoError> {
    let config = Config::from_env()?;
    let catalog = Catalog::load(&config.catalog_path)?;
    let storage = Storage::new(FileBackend::new(&config.data_dir));
    let mut shop = Storefront::open(catalog, storage);

    sign_in(&mut shop)?;

    let picks: Vec<Product> = shop
        .catalog()
        .products()
        .iter()
        .filter(|p| p.in_stock)
        .take(2)
        .cloned()
        .collect();
    let [first, rest @ ..] = picks.as_slice() else {
        return Err(DemoError::NothingInStock);
    };

    shop.cart_mut().add(first, 2);
    tracing::info!(product = %first.id, quantity = 2, "added to cart");
    if let Some(second) = rest.first() {
        shop.cart_mut().add(second, 1);
        let saved = shop.wishlist_mut().toggle(second);
        tracing::info!(product = %second.id, saved, "toggled wishlist");
    }

    tracing::info!(
        items = shop.cart().item_count(),
        subtotal = %shop.cart().total_amount(),
        delivery = %shop.delivery_charge(),
        payable = %shop.payable_total(),
        "cart ready"
    );

    let order = shop.checkout(demo_address())?;
    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        total = %order.total_amount,
        eta = %order.estimated_delivery.format("%Y-%m-%d"),
        "order placed"
    );

    let user = shop.session().current_user().cloned();
    let history = shop.orders().user_orders(user.as_ref());
    tracing::info!(orders = history.len(), "order history for demo account");

    Ok(())
}

/// Log the demo account in, registering it on the first run.
fn sign_in(shop: &mut Storefront) -> Result<(), DemoError> {
    match shop.session_mut().login(DEMO_EMAIL, DEMO_PASSWORD) {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "welcome back");
            Ok(())
        }
        Err(AuthError::InvalidCredentials) => {
            let user = shop
                .session_mut()
                .register("Demo Shopper", DEMO_EMAIL, DEMO_PASSWORD)?;
            tracing::info!(user_id = %user.id, "registered demo account");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn demo_address() -> Address {
    Address {
        name: "Demo Shopper".to_owned(),
        phone: "9876543210".to_owned(),
        address_line1: "42 Demo Street".to_owned(),
        address_line2: None,
        city: "Bengaluru".to_owned(),
        state: "Karnataka".to_owned(),
        pincode: "560001".to_owned(),
    }
}
