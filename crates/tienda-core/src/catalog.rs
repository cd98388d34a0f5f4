//! # Catalog
//!
//! Products shown on the listing page, the search filter over them, and the
//! product-card reader that turns what a card displays into an add request.
//!
//! ## Product Card Flow
//! ```text
//! ┌───────────────────────────────┐
//! │  Kimia Seamless Sport Set     │  name        ─┐
//! │  $200.000                     │  price_text   ├─► ProductCard
//! │  [ 2 ]  [Add to cart]         │  quantity     ┘
//! └───────────────────────────────┘
//!                 │
//!                 ▼  ProductCard::read(&policy)
//!      CardSelection { name, price: 200000, quantity: 2 }
//!                 │
//!                 ▼
//!        CartStore::add(name, price, quantity)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::format::{parse_amount, GroupingPolicy};
use crate::money::Money;
use crate::validation::{validate_product_name, validate_quantity, validate_search_query};
use crate::PLACEHOLDER_IMAGE;

// =============================================================================
// Product
// =============================================================================

/// A product as it appears on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, also the cart line key.
    pub name: String,

    /// Price exactly as printed on the card, e.g. `"$200.000"`.
    pub price_text: String,

    /// Image shown in the checkout summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// Builds the card for this product with the quantity the shopper typed.
    pub fn card(&self, quantity_text: impl Into<String>) -> ProductCard {
        ProductCard {
            name: self.name.clone(),
            price_text: self.price_text.clone(),
            quantity_text: quantity_text.into(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The storefront's product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Parses a catalog from its JSON form (`{"products": [...]}`).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Products whose name contains `term`, case-insensitively.
    ///
    /// An empty term matches every product.
    pub fn search(&self, term: &str) -> Result<Vec<&Product>, ValidationError> {
        let needle = validate_search_query(term)?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Product with this exact name.
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Image for a product name, falling back to the placeholder.
    pub fn image_for(&self, name: &str) -> &str {
        self.find(name)
            .and_then(|p| p.image.as_deref())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

impl Default for Catalog {
    /// The storefront's seamless sport sets.
    fn default() -> Self {
        let product = |name: &str, price: &str, image: &str| Product {
            name: name.to_string(),
            price_text: price.to_string(),
            image: Some(format!("./recursos/imagenes/{}", image)),
        };

        Catalog::new(vec![
            product("Catalina Pink Seamless Sport Set", "$200.000", "outfit1.jpg"),
            product("Amanda Blue Seamless Sport Set", "$200.000", "outfit2.jpg"),
            product("Kimia Seamless Sport Set", "$185.000", "outfit3.jpg"),
            product("Malva Red Seamless Sport Set", "$195.000", "outfit4.jpg"),
            product("Sun Orange Seamless Sport Set", "$185.000", "outfit5.jpg"),
            product("Brazilian Green Seamless Sport Set", "$210.000", "outfit6.jpg"),
        ])
    }
}

// =============================================================================
// Product Card Reader
// =============================================================================

/// Raw text a product card exposes when its "Add to cart" button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub name: String,
    pub price_text: String,
    pub quantity_text: String,
}

/// A validated add request read off a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSelection {
    pub name: String,
    pub price: Money,
    pub quantity: i64,
}

impl ProductCard {
    /// Reads the card into a validated selection.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::{GroupingPolicy, ProductCard};
    ///
    /// let card = ProductCard {
    ///     name: "Kimia Seamless Sport Set".into(),
    ///     price_text: "$185.000".into(),
    ///     quantity_text: "2".into(),
    /// };
    /// let selection = card.read(&GroupingPolicy::ES_CO).unwrap();
    /// assert_eq!(selection.price.units(), 185_000);
    /// assert_eq!(selection.quantity, 2);
    /// ```
    pub fn read(&self, policy: &GroupingPolicy) -> CoreResult<CardSelection> {
        let name = self.name.trim().to_string();
        validate_product_name(&name)?;

        let price = Money::from_units(parse_amount(&self.price_text, policy)?);

        let quantity = self.quantity_text.trim().parse::<i64>().map_err(|_| {
            ValidationError::InvalidFormat {
                field: "quantity".to_string(),
                reason: format!("'{}' is not a whole number", self.quantity_text.trim()),
            }
        })?;
        validate_quantity(quantity)?;

        Ok(CardSelection {
            name,
            price,
            quantity,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::default();
        let hits = catalog.search("  SEAMLESS sport").unwrap();
        assert_eq!(hits.len(), 6);

        let hits = catalog.search("pink").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Catalina Pink Seamless Sport Set");

        assert!(catalog.search("leggings").unwrap().is_empty());
        assert_eq!(catalog.search("").unwrap().len(), 6);
    }

    #[test]
    fn test_image_fallback() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.image_for("Kimia Seamless Sport Set"),
            "./recursos/imagenes/outfit3.jpg"
        );
        assert_eq!(catalog.image_for("Mystery Item"), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_read_card() {
        let catalog = Catalog::default();
        let card = catalog
            .find("Catalina Pink Seamless Sport Set")
            .unwrap()
            .card("3");

        let selection = card.read(&GroupingPolicy::ES_CO).unwrap();
        assert_eq!(
            selection,
            CardSelection {
                name: "Catalina Pink Seamless Sport Set".to_string(),
                price: Money::from_units(200_000),
                quantity: 3,
            }
        );
    }

    #[test]
    fn test_read_card_rejects_bad_quantity() {
        let product = Product {
            name: "A".to_string(),
            price_text: "$10".to_string(),
            image: None,
        };

        assert!(matches!(
            product.card("abc").read(&GroupingPolicy::ES_CO),
            Err(CoreError::Validation(ValidationError::InvalidFormat { .. }))
        ));
        assert!(matches!(
            product.card("0").read(&GroupingPolicy::ES_CO),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_catalog_json() {
        let json = r#"{"products":[{"name":"A","price_text":"$1.000"}]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.products[0].image, None);
        assert_eq!(catalog.image_for("A"), PLACEHOLDER_IMAGE);
    }
}
