//! Integration tests for the storefront context over one storage directory.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use shopfront_core::{CurrencyCode, Quantity};
use shopfront_integration_tests::{TestStorage, id, product};
use shopfront_store::{StoreConfig, Storefront};

fn config(storage: &TestStorage) -> StoreConfig {
    StoreConfig {
        storage_dir: storage.dir.path().to_path_buf(),
        ..StoreConfig::default()
    }
}

#[test]
fn test_open_reads_both_collections() {
    let storage = TestStorage::new();
    let config = config(&storage);

    {
        let mut storefront = Storefront::open(&config);
        storefront
            .cart_mut()
            .add_item(product("p1", 500), Quantity::new(2).unwrap())
            .unwrap();
        storefront.wishlist_mut().add_item(product("p2", 75)).unwrap();
    }

    let storefront = Storefront::open(&config);
    assert_eq!(storefront.cart().total_items(), 2);
    assert_eq!(storefront.cart_total().amount, Decimal::from(1000));
    assert_eq!(storefront.cart_total().currency_code, CurrencyCode::BDT);
    assert!(storefront.wishlist().contains(&id("p2")));
    assert!(!storefront.cart().contains(&id("p2")));
}

#[test]
fn test_custom_keys_are_isolated_from_defaults() {
    let storage = TestStorage::new();
    let custom = StoreConfig {
        cart_key: "guestCart".to_string(),
        wishlist_key: "guestWishlist".to_string(),
        ..config(&storage)
    };

    Storefront::open(&custom)
        .cart_mut()
        .add_one(product("p1", 1))
        .unwrap();

    assert!(Storefront::open(&config(&storage)).cart().is_empty());
    assert_eq!(Storefront::open(&custom).cart().len(), 1);
    assert!(storage.dir.path().join("guestCart.json").exists());
}

#[test]
fn test_wipe_deletes_files() {
    let storage = TestStorage::new();
    let config = config(&storage);

    let mut storefront = Storefront::open(&config);
    storefront.cart_mut().add_one(product("p1", 1)).unwrap();
    storefront.wishlist_mut().add_item(product("p1", 1)).unwrap();
    storefront.wipe().unwrap();

    assert!(!storage.dir.path().join("cartItems.json").exists());
    assert!(!storage.dir.path().join("wishlistItems.json").exists());

    let storefront = Storefront::open(&config);
    assert!(storefront.cart().is_empty());
    assert!(storefront.wishlist().is_empty());
}
