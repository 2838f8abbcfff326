//! Shopfront Core - Shared domain types.
//!
//! This crate provides the value types used by the cart and wishlist stores
//! and by every consumer that renders them:
//! - `store` - Cart and wishlist state containers with write-through persistence
//! - `cli` - Command-line front end over the stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. Every type
//! validates its invariants at construction, so a value that exists is valid.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, quantities, prices, and product snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
