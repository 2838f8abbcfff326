//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_STORAGE_DIR` - Directory for persisted collections (default: .shopfront)
//! - `SHOPFRONT_CART_KEY` - Storage key for the cart (default: cartItems)
//! - `SHOPFRONT_WISHLIST_KEY` - Storage key for the wishlist (default: wishlistItems)
//! - `SHOPFRONT_CURRENCY` - ISO 4217 display currency (default: BDT)

use std::path::PathBuf;

use shopfront_core::CurrencyCode;
use thiserror::Error;

use crate::persistence::keys;

const DEFAULT_STORAGE_DIR: &str = ".shopfront";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one JSON file per storage key
    pub storage_dir: PathBuf,
    /// Storage key for cart line items
    pub cart_key: String,
    /// Storage key for wishlist entries
    pub wishlist_key: String,
    /// Currency used when displaying totals
    pub currency: CurrencyCode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_key: keys::CART_ITEMS.to_string(),
            wishlist_key: keys::WISHLIST_ITEMS.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("SHOPFRONT_STORAGE_DIR")
            .map_or(defaults.storage_dir, PathBuf::from);
        let cart_key = get_key(&lookup, "SHOPFRONT_CART_KEY", defaults.cart_key)?;
        let wishlist_key = get_key(&lookup, "SHOPFRONT_WISHLIST_KEY", defaults.wishlist_key)?;
        let currency = match lookup("SHOPFRONT_CURRENCY") {
            Some(value) => value.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_CURRENCY".to_string(), e.to_string())
            })?,
            None => defaults.currency,
        };

        if cart_key == wishlist_key {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_WISHLIST_KEY".to_string(),
                format!("must differ from the cart key '{cart_key}'"),
            ));
        }

        Ok(Self {
            storage_dir,
            cart_key,
            wishlist_key,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a storage key variable, rejecting blank values.
fn get_key(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: String,
) -> Result<String, ConfigError> {
    match lookup(var) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            var.to_string(),
            "storage key cannot be empty".to_string(),
        )),
        Some(value) => Ok(value.trim().to_string()),
        None => Ok(default),
    }
}
