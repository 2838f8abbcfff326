//! Persistence bridge between the stores and durable key-value storage.
//!
//! Adapters only move raw strings. Encoding is done here, in the provided
//! [`PersistenceBridge::load`] and [`PersistenceBridge::save`] methods, as a
//! bare JSON array per key (no envelope).
//!
//! # Adapters
//!
//! - [`MemoryStorage`] - shared in-process map, the fake used in tests
//! - [`FileStorage`] - one JSON file per key inside a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Well-known storage keys.
pub mod keys {
    /// Key for the cart line-item sequence.
    pub const CART_ITEMS: &str = "cartItems";

    /// Key for the wishlist entry sequence.
    pub const WISHLIST_ITEMS: &str = "wishlistItems";
}

/// Synchronous key-value storage the stores write through to.
pub trait PersistenceBridge {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be modified.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Load the collection stored under `key`.
    ///
    /// Never fails: a missing key, an unreadable medium, or a value that does
    /// not parse all yield an empty collection.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T>
    where
        Self: Sized,
    {
        let raw = match self.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted collection, starting empty");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Discarding malformed persisted collection");
            Vec::new()
        })
    }

    /// Overwrite the collection stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the write is rejected.
    fn save<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(items).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.write(key, &raw)
    }
}

impl<P: PersistenceBridge + ?Sized> PersistenceBridge for &mut P {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
