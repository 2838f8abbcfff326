//! Product snapshots copied into carts and wishlists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;

/// Denormalized copy of a product taken when it is added to a cart or
/// wishlist.
///
/// The stores never re-fetch or revalidate these fields. Attributes beyond
/// the ones the stores read (brand, stock count, rating, ...) are kept in
/// [`ProductSnapshot::attributes`] and survive persistence unchanged.
///
/// Attributes never use a key in [`ProductSnapshot::RESERVED_KEYS`]. Cart
/// lines flatten the snapshot next to `quantity`, and a repeated key makes
/// the whole stored collection unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSnapshot")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

/// Wire shape read from storage or a backend payload, before reserved keys
/// are dropped from the extra attributes.
#[derive(Deserialize)]
struct StoredSnapshot {
    id: ProductId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: Decimal,
    #[serde(default)]
    image: Option<String>,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl From<StoredSnapshot> for ProductSnapshot {
    fn from(stored: StoredSnapshot) -> Self {
        let mut attributes = stored.attributes;
        attributes.retain(|key, _| !Self::is_reserved(key));

        Self {
            id: stored.id,
            name: stored.name,
            price: stored.price,
            image: stored.image,
            attributes,
        }
    }
}

impl ProductSnapshot {
    /// Keys owned by the snapshot itself or by the cart line wrapping it.
    pub const RESERVED_KEYS: [&'static str; 5] = ["id", "name", "price", "image", "quantity"];

    /// Create a snapshot with no image and no extra attributes.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: None,
            attributes: Map::new(),
        }
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Attach an extra attribute. Reserved keys are ignored.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !Self::is_reserved(&key) {
            self.attributes.insert(key, value.into());
        }
        self
    }

    /// Extra attributes carried alongside the known fields.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Look up one extra attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn is_reserved(key: &str) -> bool {
        Self::RESERVED_KEYS.contains(&key)
    }
}
