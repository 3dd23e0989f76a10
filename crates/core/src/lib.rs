//! ShopKart Core - Shared types library.
//!
//! This crate provides common types used across all ShopKart components:
//! - `storefront` - The client-side commerce state engine
//! - `cli` - Command-line tools for seeding and demos
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, statuses, and
//!   the checkout address value object

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
