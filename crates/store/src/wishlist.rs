//! Wishlist store.
//!
//! A deduplicated, insertion-ordered set of favourited products. The first
//! snapshot added for an id wins; later adds of the same id change nothing.

use serde::{Deserialize, Serialize};
use shopfront_core::{ProductId, ProductSnapshot};
use tracing::instrument;

use crate::error::{Result, StoreError};
use crate::persistence::{PersistenceBridge, keys};

/// A favourited product. Carries no quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishlistEntry {
    pub product: ProductSnapshot,
}

impl WishlistEntry {
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }
}

impl From<ProductSnapshot> for WishlistEntry {
    fn from(product: ProductSnapshot) -> Self {
        Self { product }
    }
}

/// Read-only copy of the wishlist handed to consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistState {
    pub items: Vec<WishlistEntry>,
}

/// Authoritative in-memory wishlist mirrored to durable storage.
#[derive(Debug)]
pub struct WishlistStore<P> {
    items: Vec<WishlistEntry>,
    key: String,
    bridge: P,
}

impl<P: PersistenceBridge> WishlistStore<P> {
    /// Build the wishlist from the collection persisted under the default key.
    #[must_use]
    pub fn load(bridge: P) -> Self {
        Self::load_with_key(bridge, keys::WISHLIST_ITEMS)
    }

    /// Build the wishlist from the collection persisted under `key`.
    ///
    /// Duplicate ids in storage keep their first occurrence.
    #[must_use]
    pub fn load_with_key(bridge: P, key: impl Into<String>) -> Self {
        let key = key.into();
        let stored: Vec<WishlistEntry> = bridge.load(&key);
        let stored_len = stored.len();

        let mut items: Vec<WishlistEntry> = Vec::with_capacity(stored_len);
        for entry in stored {
            if !items.iter().any(|item| item.id() == entry.id()) {
                items.push(entry);
            }
        }

        if items.len() != stored_len {
            tracing::warn!(
                key = %key,
                stored = stored_len,
                kept = items.len(),
                "Dropped duplicate wishlist entries from storage"
            );
        }

        Self { items, key, bridge }
    }

    /// Add `product` unless an entry with its id already exists.
    ///
    /// Returns `true` if the product was appended. The collection is written
    /// through either way.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-through fails; the
    /// wishlist is then unchanged.
    #[instrument(skip_all, fields(product_id = %product.id))]
    pub fn add_item(&mut self, product: ProductSnapshot) -> Result<bool> {
        let previous = self.items.clone();

        let added = if self.contains(&product.id) {
            tracing::debug!("Already in wishlist");
            false
        } else {
            self.items.push(WishlistEntry::from(product));
            true
        };

        self.persist(previous)?;
        Ok(added)
    }

    /// Remove the entry for `id`. Absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-through fails.
    #[instrument(skip_all, fields(product_id = %id))]
    pub fn remove_item(&mut self, id: &ProductId) -> Result<()> {
        let previous = self.items.clone();
        self.items.retain(|item| item.id() != id);
        self.persist(previous)
    }

    /// Remove `product` if present, otherwise add it.
    ///
    /// Returns whether the product is in the wishlist afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-through fails.
    #[instrument(skip_all, fields(product_id = %product.id))]
    pub fn toggle(&mut self, product: ProductSnapshot) -> Result<bool> {
        if self.contains(&product.id) {
            self.remove_item(&product.id)?;
            Ok(false)
        } else {
            self.add_item(product)
        }
    }

    /// Whether `id` is in the wishlist.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Entry for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&WishlistEntry> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistEntry] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> WishlistState {
        WishlistState {
            items: self.items.clone(),
        }
    }

    /// Storage key this wishlist mirrors to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The persistence bridge.
    #[must_use]
    pub const fn bridge(&self) -> &P {
        &self.bridge
    }

    fn persist(&mut self, previous: Vec<WishlistEntry>) -> Result<()> {
        if let Err(e) = self.bridge.save(&self.key, &self.items) {
            tracing::warn!(key = %self.key, error = %e, "Wishlist write-through failed, rolling back");
            self.items = previous;
            return Err(StoreError::Storage(e));
        }
        Ok(())
    }
}
