//! Read-only views over the storefront.

use anyhow::Context;
use tienda_store::Storage;

use super::Storefront;

/// Product listing, filtered by `search`, followed by the cart panel.
pub fn products<S: Storage>(shop: &Storefront<S>, search: Option<&str>) -> anyhow::Result<String> {
    let hits = shop
        .catalog
        .search(search.unwrap_or(""))
        .context("Invalid search")?;
    Ok(format!("{}\n{}", shop.renderer.products(&hits), cart(shop)))
}

pub fn cart<S: Storage>(shop: &Storefront<S>) -> String {
    shop.renderer.cart_panel(
        &shop.store.line_views(),
        shop.store.total(),
        shop.store.badge(),
    )
}

pub fn checkout<S: Storage>(shop: &Storefront<S>) -> String {
    shop.renderer.checkout(
        &shop.store.line_views(),
        &shop.store.checkout_summary(shop.shipping),
        &shop.catalog,
    )
}

pub fn badge<S: Storage>(shop: &Storefront<S>) -> String {
    shop.renderer.badge(shop.store.badge())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::storefront;
    use tienda_core::Money;

    #[test]
    fn test_products_search_is_case_insensitive() {
        let shop = storefront();
        let text = products(&shop, Some("RED")).unwrap();
        assert!(text.starts_with("Malva Red Seamless Sport Set  $195.000\n"));
        assert!(text.ends_with("Your cart is empty.\nTotal: 0\n"));

        let all = products(&shop, None).unwrap();
        assert_eq!(all.matches("Seamless Sport Set").count(), 6);
    }

    #[test]
    fn test_checkout_uses_configured_shipping() {
        let mut shop = storefront();
        shop.shipping = Money::from_units(9_000);
        shop.store
            .add("Sun Orange Seamless Sport Set", Money::from_units(185_000), 1)
            .unwrap();

        let text = checkout(&shop);
        assert!(text.contains("[./recursos/imagenes/outfit5.jpg] Sun Orange Seamless Sport Set\n"));
        assert!(text.ends_with("Shipping: $9.000\nTotal: $194.000\n"));
    }
}
