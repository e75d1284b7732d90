//! Loom & Lane Core - Shared types library.
//!
//! This crate provides common types used across all Loom & Lane components:
//! - `storefront` - Cart store, catalog source and notifications
//! - `cli` - Command-line host for the cart and catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, cart line items and notification kinds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
