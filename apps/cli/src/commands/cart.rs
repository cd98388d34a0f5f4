//! Cart mutations: add, remove, clear.
//!
//! Each handler validates first, then calls into `CartStore`, which persists.
//! The returned text is a one-line confirmation followed by the cart panel.

use anyhow::{bail, Context};
use tienda_core::validation::validate_position;
use tienda_core::{AddOutcome, ProductCard};
use tienda_store::Storage;
use tracing::info;

use super::{view, Storefront};

/// Reads a product card and adds the selection.
///
/// The catalog supplies the price unless `price` is given; a product missing
/// from the catalog needs an explicit price.
pub fn add<S: Storage>(
    shop: &mut Storefront<S>,
    name: &str,
    quantity: &str,
    price: Option<&str>,
) -> anyhow::Result<String> {
    let product = shop.catalog.find(name).or_else(|| {
        shop.catalog
            .products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    });

    let card = match (product, price) {
        (Some(product), None) => product.card(quantity),
        (Some(product), Some(price)) => ProductCard {
            price_text: price.to_string(),
            ..product.card(quantity)
        },
        (None, Some(price)) => ProductCard {
            name: name.to_string(),
            price_text: price.to_string(),
            quantity_text: quantity.to_string(),
        },
        (None, None) => bail!(
            "Unknown product '{}'. Pass --price to add it anyway.",
            name.trim()
        ),
    };

    let selection = card.read(&shop.policy).context("Could not read product card")?;
    let outcome = shop
        .store
        .add(selection.name.clone(), selection.price, selection.quantity)
        .context("Could not add to cart")?;

    info!(name = %selection.name, quantity = selection.quantity, "Added to cart");

    let headline = match outcome {
        AddOutcome::Appended { .. } => {
            format!("Added {} (x{})", selection.name, selection.quantity)
        }
        AddOutcome::Merged { quantity, .. } => {
            format!("{} is now x{} in your cart", selection.name, quantity)
        }
    };
    Ok(format!("{}\n\n{}", headline, view::cart(shop)))
}

/// Removes the line at a zero-based position.
pub fn remove<S: Storage>(shop: &mut Storefront<S>, position: usize) -> anyhow::Result<String> {
    validate_position(position, shop.store.cart().len())?;

    let removed = shop
        .store
        .remove_at(position)
        .context("Could not remove from cart")?;

    info!(position, name = %removed.name, "Removed from cart");
    Ok(format!("Removed {}\n\n{}", removed.name, view::cart(shop)))
}

pub fn clear<S: Storage>(shop: &mut Storefront<S>) -> anyhow::Result<String> {
    shop.store.clear().context("Could not clear cart")?;
    info!("Cart cleared");
    Ok(format!("Cart cleared\n\n{}", view::cart(shop)))
}
