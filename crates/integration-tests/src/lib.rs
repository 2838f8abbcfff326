//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart operations against directory-backed storage
//! - `wishlist_persistence` - Wishlist operations against directory-backed storage
//! - `storefront_reload` - Both stores sharing one storage directory
//!
//! This library only holds fixtures shared by the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;
use shopfront_core::{ProductId, ProductSnapshot};
use shopfront_store::FileStorage;
use tempfile::TempDir;

/// A temporary storage directory that is deleted on drop.
pub struct TestStorage {
    pub dir: TempDir,
}

impl TestStorage {
    /// Create a fresh, empty storage directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// A storage handle rooted at the temporary directory. Handles are
    /// independent values pointing at the same files, like two page loads.
    #[must_use]
    pub fn handle(&self) -> FileStorage {
        FileStorage::new(self.dir.path())
    }
}

impl Default for TestStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a product snapshot with a whole-unit price.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
pub fn product(id: &str, price: i64) -> ProductSnapshot {
    ProductSnapshot::new(
        ProductId::parse(id).expect("valid product id"),
        format!("Product {id}"),
        Decimal::from(price),
    )
}

/// Parse a product id.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
pub fn id(id: &str) -> ProductId {
    ProductId::parse(id).expect("valid product id")
}
