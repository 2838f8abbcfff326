//! Cart store.
//!
//! The cart is an ordered sequence of line items, one per product id, with
//! merge-on-add semantics: adding a product already in the cart increases its
//! quantity instead of appending a second line. Every mutation is written
//! through to the [`PersistenceBridge`] before the call returns.
//!
//! Totals are derived from the current items on every read and never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{ProductId, ProductSnapshot, Quantity};
use tracing::instrument;

use crate::error::{Result, StoreError};
use crate::persistence::{PersistenceBridge, keys};

/// One product and its quantity in the cart.
///
/// Serializes as the product's fields with `quantity` alongside, the same
/// flat object the storage layout has always used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub quantity: Quantity,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub const fn new(product: ProductSnapshot, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    /// The product id this line is keyed by.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }
}

/// Read-only copy of the cart handed to consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    pub items: Vec<LineItem>,
    pub is_open: bool,
}

impl CartState {
    /// Sum of quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        total_items(&self.items)
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        total_price(&self.items)
    }
}

fn total_items(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity.get())).sum()
}

fn total_price(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
}

/// Authoritative in-memory cart mirrored to durable storage.
#[derive(Debug)]
pub struct CartStore<P> {
    items: Vec<LineItem>,
    is_open: bool,
    key: String,
    bridge: P,
}

impl<P: PersistenceBridge> CartStore<P> {
    /// Build the cart from the collection persisted under the default key.
    #[must_use]
    pub fn load(bridge: P) -> Self {
        Self::load_with_key(bridge, keys::CART_ITEMS)
    }

    /// Build the cart from the collection persisted under `key`.
    ///
    /// An absent or unparsable collection yields an empty cart. Duplicate
    /// ids in the stored collection are merged into the first occurrence.
    #[must_use]
    pub fn load_with_key(bridge: P, key: impl Into<String>) -> Self {
        let key = key.into();
        let stored: Vec<LineItem> = bridge.load(&key);
        let stored_len = stored.len();

        let mut items: Vec<LineItem> = Vec::with_capacity(stored_len);
        for line in stored {
            match items.iter_mut().find(|item| item.id() == line.id()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => items.push(line),
            }
        }

        if items.len() != stored_len {
            tracing::warn!(
                key = %key,
                stored = stored_len,
                kept = items.len(),
                "Merged duplicate cart lines from storage"
            );
        }
        tracing::debug!(key = %key, lines = items.len(), "Cart loaded");

        Self {
            items,
            is_open: false,
            key,
            bridge,
        }
    }

    /// Add `quantity` of `product` to the cart.
    ///
    /// If the product is already in the cart its quantity is increased and
    /// the original snapshot is kept; otherwise a new line is appended.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if the merged quantity would
    /// overflow, or [`StoreError::Storage`] if the write-through fails. In
    /// both cases the cart is unchanged.
    #[instrument(skip_all, fields(product_id = %product.id, quantity = %quantity))]
    pub fn add_item(&mut self, product: ProductSnapshot, quantity: Quantity) -> Result<()> {
        let previous = self.items.clone();

        if let Some(existing) = self.items.iter_mut().find(|item| item.id() == &product.id) {
            existing.quantity = existing.quantity.checked_add(quantity)?;
            tracing::debug!(total = %existing.quantity, "Merged into existing line");
        } else {
            self.items.push(LineItem::new(product, quantity));
            tracing::debug!("Appended new line");
        }

        self.persist(previous)
    }

    /// Add a single unit of `product`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_item`].
    #[instrument(skip_all, fields(product_id = %product.id))]
    pub fn add_one(&mut self, product: ProductSnapshot) -> Result<()> {
        self.add_item(product, Quantity::ONE)
    }

    /// Remove the line for `id`. Absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-through fails.
    #[instrument(skip_all, fields(product_id = %id))]
    pub fn remove_item(&mut self, id: &ProductId) -> Result<()> {
        let previous = self.items.clone();
        self.items.retain(|item| item.id() != id);

        if self.items.len() == previous.len() {
            tracing::debug!("No line to remove");
        }

        self.persist(previous)
    }

    /// Set the quantity of the line for `id` to exactly `quantity`.
    ///
    /// This is an absolute set, not a delta. Absent ids are a no-op. Zero and
    /// negative quantities are unrepresentable; callers remove lines with
    /// [`Self::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-through fails.
    #[instrument(skip_all, fields(product_id = %id, quantity = %quantity))]
    pub fn update_quantity(&mut self, id: &ProductId, quantity: Quantity) -> Result<()> {
        let previous = self.items.clone();

        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => item.quantity = quantity,
            None => tracing::debug!("No line to update"),
        }

        self.persist(previous)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write-through fails.
    #[instrument(skip_all)]
    pub fn clear(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.items);
        self.persist(previous)
    }

    /// Flip drawer visibility. Not persisted.
    pub const fn toggle_visibility(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Hide the drawer. Not persisted.
    pub const fn close(&mut self) {
        self.is_open = false;
    }

    /// Whether the drawer is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether `id` has a line in the cart.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities, computed from the current lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        total_items(&self.items)
    }

    /// Sum of price times quantity, computed from the current lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        total_price(&self.items)
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        CartState {
            items: self.items.clone(),
            is_open: self.is_open,
        }
    }

    /// Storage key this cart mirrors to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The persistence bridge.
    #[must_use]
    pub const fn bridge(&self) -> &P {
        &self.bridge
    }

    /// Give up the store and return its persistence bridge.
    #[must_use]
    pub fn into_bridge(self) -> P {
        self.bridge
    }

    /// Write the current items through; restore `previous` on failure.
    fn persist(&mut self, previous: Vec<LineItem>) -> Result<()> {
        if let Err(e) = self.bridge.save(&self.key, &self.items) {
            tracing::warn!(key = %self.key, error = %e, "Cart write-through failed, rolling back");
            self.items = previous;
            return Err(StoreError::Storage(e));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::persistence::MemoryStorage;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn qty(n: i64) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn product(s: &str, price: i64) -> ProductSnapshot {
        ProductSnapshot::new(id(s), format!("Product {s}"), Decimal::from(price))
    }

    fn persisted(storage: &MemoryStorage) -> Vec<LineItem> {
        storage.load(keys::CART_ITEMS)
    }

    /// Storage whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage;

    impl PersistenceBridge for ReadOnlyStorage {
        fn read(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&mut self, key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }

        fn remove(&mut self, _key: &str) -> std::result::Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_add_appends_new_line() {
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add_item(product("p1", 500), qty(2)).unwrap();
        cart.add_one(product("p2", 100)).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id(), &id("p1"));
        assert_eq!(cart.items()[1].id(), &id("p2"));
        assert_eq!(cart.items()[1].quantity, Quantity::ONE);
    }

    #[test]
    fn test_add_merges_quantity() {
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add_item(product("p1", 500), qty(2)).unwrap();
        cart.add_item(product("p1", 500), qty(3)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&id("p1")).unwrap().quantity, qty(5));
    }

    #[test]
    fn test_merge_keeps_first_snapshot_and_position() {
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add_one(product("p1", 500)).unwrap();
        cart.add_one(product("p2", 100)).unwrap();

        let repriced = ProductSnapshot::new(id("p1"), "Renamed", Decimal::from(999));
        cart.add_one(repriced).unwrap();

        let line = &cart.items()[0];
        assert_eq!(line.id(), &id("p1"));
        assert_eq!(line.product.name, "Product p1");
        assert_eq!(line.product.price, Decimal::from(500));
        assert_eq!(line.quantity, qty(2));
    }

    #[test]
    fn test_add_overflow_is_rejected_and_leaves_cart_unchanged() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(storage.clone());
        let max = qty(i64::from(u32::MAX));
        cart.add_item(product("p1", 1), max).unwrap();

        let result = cart.add_one(product("p1", 1));
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
        assert_eq!(cart.get(&id("p1")).unwrap().quantity, max);
        assert_eq!(persisted(&storage)[0].quantity, max);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add_one(product("p1", 10)).unwrap();
        cart.add_one(product("p2", 20)).unwrap();

        cart.remove_item(&id("p1")).unwrap();
        cart.remove_item(&id("p1")).unwrap();

        assert_eq!(cart.len(), 1);
        assert!(!cart.contains(&id("p1")));
        assert!(cart.contains(&id("p2")));
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add_item(product("p1", 10), qty(4)).unwrap();
        cart.update_quantity(&id("p1"), qty(2)).unwrap();

        assert_eq!(cart.get(&id("p1")).unwrap().quantity, qty(2));
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(storage.clone());
        cart.add_one(product("p1", 10)).unwrap();

        cart.update_quantity(&id("missing"), qty(9)).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(persisted(&storage), cart.items());
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(storage.clone());

        cart.add_item(product("p1", 10), qty(3)).unwrap();
        assert_eq!(persisted(&storage), cart.items());

        cart.update_quantity(&id("p1"), qty(1)).unwrap();
        assert_eq!(persisted(&storage), cart.items());

        cart.add_one(product("p2", 5)).unwrap();
        assert_eq!(persisted(&storage), cart.items());

        cart.remove_item(&id("p1")).unwrap();
        assert_eq!(persisted(&storage), cart.items());
    }

    #[test]
    fn test_clear_empties_items_and_mirror() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(storage.clone());
        cart.add_item(product("p1", 10), qty(3)).unwrap();
        cart.add_one(product("p2", 10)).unwrap();

        cart.clear().unwrap();

        assert!(cart.is_empty());
        assert_eq!(
            storage.read(keys::CART_ITEMS).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_totals_follow_every_mutation() {
        let mut cart = CartStore::load(MemoryStorage::new());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);

        cart.add_item(product("p1", 500), qty(2)).unwrap();
        cart.add_item(product("p2", 30), qty(1)).unwrap();
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::from(1030));

        cart.update_quantity(&id("p2"), qty(4)).unwrap();
        assert_eq!(cart.total_items(), 6);
        assert_eq!(cart.total_price(), Decimal::from(1120));

        cart.remove_item(&id("p1")).unwrap();
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), Decimal::from(120));

        cart.clear().unwrap();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_decimal_prices_total_exactly() {
        let mut cart = CartStore::load(MemoryStorage::new());
        let product = ProductSnapshot::new(id("p1"), "Pen", Decimal::new(1999, 2));
        cart.add_item(product, qty(3)).unwrap();

        assert_eq!(cart.total_price(), Decimal::new(5997, 2));
        assert_eq!(cart.items()[0].line_total(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_visibility_is_not_persisted() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(storage.clone());
        assert!(!cart.is_open());

        cart.toggle_visibility();
        assert!(cart.is_open());
        assert!(storage.is_empty());

        cart.toggle_visibility();
        assert!(!cart.is_open());

        cart.toggle_visibility();
        cart.close();
        assert!(!cart.is_open());
    }

    #[test]
    fn test_reload_restores_items() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(storage.clone());
        cart.add_item(product("p1", 500), qty(2)).unwrap();
        cart.add_item(product("p2", 75), qty(7)).unwrap();
        cart.toggle_visibility();

        let reloaded = CartStore::load(storage);
        assert_eq!(reloaded.items(), cart.items());
        assert!(!reloaded.is_open());
    }

    #[test]
    fn test_load_reads_legacy_numeric_ids() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                keys::CART_ITEMS,
                r#"[{"id": 3, "name": "Kettle", "price": 1200, "image": "/k.png", "countInStock": 5, "quantity": 2}]"#,
            )
            .unwrap();

        let cart = CartStore::load(storage);
        let line = cart.get(&id("3")).unwrap();
        assert_eq!(line.quantity, qty(2));
        assert_eq!(line.product.image.as_deref(), Some("/k.png"));
        assert_eq!(
            line.product.attribute("countInStock"),
            Some(&serde_json::Value::from(5))
        );
        assert!(line.product.attribute("quantity").is_none());
        assert_eq!(cart.total_price(), Decimal::from(2400));
    }

    #[test]
    fn test_quantity_attribute_does_not_corrupt_stored_cart() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load(storage.clone());
        let lamp = product("p1", 5).with_attribute("quantity", 9);
        cart.add_item(lamp, qty(2)).unwrap();
        cart.add_one(product("p2", 1)).unwrap();

        let raw = storage.read(keys::CART_ITEMS).unwrap().unwrap();
        assert_eq!(raw.matches("\"quantity\"").count(), 2);

        let reloaded = CartStore::load(storage);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(&id("p1")).unwrap().quantity, qty(2));
    }

    #[test]
    fn test_load_merges_duplicate_lines() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                keys::CART_ITEMS,
                r#"[{"id": "a", "price": 1, "quantity": 1},
                    {"id": "b", "price": 1, "quantity": 1},
                    {"id": "a", "price": 1, "quantity": 4}]"#,
            )
            .unwrap();

        let cart = CartStore::load(storage);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].quantity, qty(5));
    }

    #[test]
    fn test_load_malformed_starts_empty() {
        let mut storage = MemoryStorage::new();
        storage.write(keys::CART_ITEMS, "[{\"id\": ").unwrap();
        assert!(CartStore::load(storage).is_empty());
    }

    #[test]
    fn test_load_zero_quantity_starts_empty() {
        let mut storage = MemoryStorage::new();
        storage
            .write(keys::CART_ITEMS, r#"[{"id": "a", "price": 1, "quantity": 0}]"#)
            .unwrap();
        assert!(CartStore::load(storage).is_empty());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut cart = CartStore::load(ReadOnlyStorage);

        let result = cart.add_one(product("p1", 10));
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_custom_key() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::load_with_key(storage.clone(), "guestCart");
        cart.add_one(product("p1", 10)).unwrap();

        assert_eq!(cart.key(), "guestCart");
        assert!(storage.read("guestCart").unwrap().is_some());
        assert!(storage.read(keys::CART_ITEMS).unwrap().is_none());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add_item(product("p1", 500), qty(2)).unwrap();

        let snapshot = cart.snapshot();
        cart.clear().unwrap();

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.total_items(), 2);
        assert_eq!(snapshot.total_price(), Decimal::from(1000));
    }
}
