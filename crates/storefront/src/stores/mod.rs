//! Durable entity stores.
//!
//! Each store owns one persistence slot, re-hydrates from it on open, and
//! writes it back in full after every mutation. Cart, wishlist, and order
//! entries hold snapshot copies of their products, so later catalog changes
//! never rewrite history.

pub mod cart;
pub mod orders;
pub mod session;
pub mod wishlist;

pub use cart::{CartLine, CartStore};
pub use orders::{Order, OrderStore};
pub use session::{AuthError, ProfileUpdate, SessionStore, User};
pub use wishlist::{WishlistEntry, WishlistStore};
