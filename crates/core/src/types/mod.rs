//! Core types for ShopKart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod email;
pub mod id;
pub mod sort;
pub mod status;

pub use address::{Address, AddressError};
pub use email::{Email, EmailError};
pub use id::*;
pub use sort::SortKey;
pub use status::OrderStatus;
