//! Wishlist commands.

use shopfront_core::{Price, ProductId, ProductSnapshot};
use shopfront_store::{PersistenceBridge, Storefront, StoreError};

use super::{ProductArgs, emit};

/// Print every entry.
pub fn show<P: PersistenceBridge>(storefront: &Storefront<P>) {
    let wishlist = storefront.wishlist();

    if wishlist.is_empty() {
        emit("Your wishlist is empty");
        return;
    }

    for entry in wishlist.items() {
        emit(&format!(
            "{}\t{}\t{}",
            entry.id(),
            entry.product.name,
            Price::new(entry.product.price, storefront.currency())
        ));
    }
    emit(&format!("Saved: {}", wishlist.len()));
}

/// Favourite a product.
///
/// # Errors
///
/// Returns any error from the store.
pub fn add<P: PersistenceBridge>(
    storefront: &mut Storefront<P>,
    product: ProductArgs,
) -> Result<(), StoreError> {
    let snapshot = ProductSnapshot::from(product);
    let id = snapshot.id.clone();

    if storefront.wishlist_mut().add_item(snapshot)? {
        tracing::info!(product_id = %id, "Added to wishlist");
    } else {
        tracing::info!(product_id = %id, "Already in wishlist");
    }
    Ok(())
}

/// Unfavourite a product.
///
/// # Errors
///
/// Returns any error from the store.
pub fn remove<P: PersistenceBridge>(
    storefront: &mut Storefront<P>,
    id: &ProductId,
) -> Result<(), StoreError> {
    storefront.wishlist_mut().remove_item(id)?;
    tracing::info!(product_id = %id, "Removed from wishlist");
    Ok(())
}

/// Favourite or unfavourite a product depending on its current state.
///
/// # Errors
///
/// Returns any error from the store.
pub fn toggle<P: PersistenceBridge>(
    storefront: &mut Storefront<P>,
    product: ProductArgs,
) -> Result<(), StoreError> {
    let snapshot = ProductSnapshot::from(product);
    let id = snapshot.id.clone();

    let saved = storefront.wishlist_mut().toggle(snapshot)?;
    tracing::info!(product_id = %id, saved, "Wishlist toggled");
    Ok(())
}
