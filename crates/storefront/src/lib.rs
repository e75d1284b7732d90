//! Loom & Lane Storefront library.
//!
//! Cart store, catalog sources and user notifications for the storefront.
//! Hosts (the CLI, tests) construct the pieces explicitly; nothing here is
//! global.
//!
//! # Modules
//!
//! - [`cart`] - Cart store, cart service and cart page model
//! - [`catalog`] - Product catalog document and its sources
//! - [`storage`] - Durable key/value storage backends
//! - [`notify`] - Transient user notifications
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;

pub use error::{Result, StorefrontError};
