//! Shopfront Store - cart and wishlist state containers.
//!
//! Each store exclusively owns its collection and mirrors it to a
//! [`PersistenceBridge`] synchronously after every mutation (write-through),
//! so a reload never loses a mutation that already returned.
//!
//! Consumers receive a [`Storefront`] context holding both stores and only
//! ever mutate through the store operations.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod persistence;
pub mod state;
pub mod wishlist;

pub use cart::{CartState, CartStore, LineItem};
pub use config::{ConfigError, StoreConfig};
pub use error::{Result, StorageError, StoreError};
pub use persistence::{FileStorage, MemoryStorage, PersistenceBridge};
pub use state::Storefront;
pub use wishlist::{WishlistEntry, WishlistState, WishlistStore};
