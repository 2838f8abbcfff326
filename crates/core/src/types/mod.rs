//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use id::{ProductId, ProductIdError};
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use product::ProductSnapshot;
pub use quantity::{Quantity, QuantityError};
