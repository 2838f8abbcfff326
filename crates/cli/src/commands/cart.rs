//! Cart commands.

use shopfront_core::{Price, ProductId, ProductSnapshot, Quantity};
use shopfront_store::{PersistenceBridge, Storefront, StoreError};

use super::{ProductArgs, emit};

/// Print every line and the derived totals.
pub fn show<P: PersistenceBridge>(storefront: &Storefront<P>) {
    let cart = storefront.cart();
    let currency = storefront.currency();

    if cart.is_empty() {
        emit("Your cart is empty");
        return;
    }

    for item in cart.items() {
        emit(&format!(
            "{id}\t{name}\t{quantity} x {unit} = {line}",
            id = item.id(),
            name = item.product.name,
            quantity = item.quantity,
            unit = Price::new(item.product.price, currency),
            line = Price::new(item.line_total(), currency),
        ));
    }
    emit(&format!(
        "Items: {}\tTotal: {}",
        cart.total_items(),
        storefront.cart_total()
    ));
}

/// Add `quantity` units of a product.
///
/// # Errors
///
/// Returns [`StoreError::InvalidArgument`] for a non-positive quantity, or
/// any error from the store.
pub fn add<P: PersistenceBridge>(
    storefront: &mut Storefront<P>,
    product: ProductArgs,
    quantity: i64,
) -> Result<(), StoreError> {
    let quantity = Quantity::new(quantity)?;
    let snapshot = ProductSnapshot::from(product);
    let id = snapshot.id.clone();

    storefront.cart_mut().add_item(snapshot, quantity)?;

    let total = storefront.cart().get(&id).map_or(quantity, |line| line.quantity);
    tracing::info!(product_id = %id, added = %quantity, total = %total, "Added to cart");
    Ok(())
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns any error from the store.
pub fn remove<P: PersistenceBridge>(
    storefront: &mut Storefront<P>,
    id: &ProductId,
) -> Result<(), StoreError> {
    let present = storefront.cart().contains(id);
    storefront.cart_mut().remove_item(id)?;

    if present {
        tracing::info!(product_id = %id, "Removed from cart");
    } else {
        tracing::info!(product_id = %id, "Product was not in the cart");
    }
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns [`StoreError::InvalidArgument`] for a non-positive quantity; use
/// `cart remove` to delete a line.
pub fn update<P: PersistenceBridge>(
    storefront: &mut Storefront<P>,
    id: &ProductId,
    quantity: i64,
) -> Result<(), StoreError> {
    let quantity = Quantity::new(quantity)?;
    storefront.cart_mut().update_quantity(id, quantity)?;

    if storefront.cart().contains(id) {
        tracing::info!(product_id = %id, quantity = %quantity, "Updated cart quantity");
    } else {
        tracing::info!(product_id = %id, "Product was not in the cart");
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns any error from the store.
pub fn clear<P: PersistenceBridge>(storefront: &mut Storefront<P>) -> Result<(), StoreError> {
    let lines = storefront.cart().len();
    storefront.cart_mut().clear()?;
    tracing::info!(lines, "Cart cleared");
    Ok(())
}
