//! Storefront state handed to consumers.
//!
//! Consumers receive a `Storefront` explicitly instead of reaching for a
//! global store. It owns both stores; the cart and wishlist are independent
//! and share only the storage medium.

use shopfront_core::{CurrencyCode, Price};

use crate::cart::CartStore;
use crate::config::StoreConfig;
use crate::error::StorageError;
use crate::persistence::{FileStorage, PersistenceBridge};
use crate::wishlist::WishlistStore;

/// Cart, wishlist, and display settings for one client.
#[derive(Debug)]
pub struct Storefront<P> {
    cart: CartStore<P>,
    wishlist: WishlistStore<P>,
    currency: CurrencyCode,
}

impl<P: PersistenceBridge + Clone> Storefront<P> {
    /// Load both stores from `bridge` using the keys in `config`.
    #[must_use]
    pub fn new(bridge: P, config: &StoreConfig) -> Self {
        let cart = CartStore::load_with_key(bridge.clone(), config.cart_key.clone());
        let wishlist = WishlistStore::load_with_key(bridge, config.wishlist_key.clone());

        tracing::info!(
            cart_lines = cart.len(),
            wishlist_entries = wishlist.len(),
            "Storefront state loaded"
        );

        Self {
            cart,
            wishlist,
            currency: config.currency,
        }
    }
}

impl Storefront<FileStorage> {
    /// Load both stores from the directory in `config`.
    #[must_use]
    pub fn open(config: &StoreConfig) -> Self {
        Self::new(FileStorage::new(config.storage_dir.clone()), config)
    }
}

impl<P: PersistenceBridge> Storefront<P> {
    #[must_use]
    pub const fn cart(&self) -> &CartStore<P> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<P> {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore<P> {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore<P> {
        &mut self.wishlist
    }

    /// Display currency.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Cart total in the display currency.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        Price::new(self.cart.total_price(), self.currency)
    }

    /// Delete both persisted collections and drop the in-memory state.
    ///
    /// # Errors
    ///
    /// Returns an error if either key cannot be removed.
    pub fn wipe(self) -> Result<(), StorageError> {
        let Self { cart, wishlist, .. } = self;
        let cart_key = cart.key().to_string();
        let wishlist_key = wishlist.key().to_string();

        let mut bridge = cart.into_bridge();
        bridge.remove(&cart_key)?;
        bridge.remove(&wishlist_key)?;

        tracing::info!(cart_key = %cart_key, wishlist_key = %wishlist_key, "Storefront storage wiped");
        Ok(())
    }
}
