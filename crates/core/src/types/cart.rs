//! Cart data model.
//!
//! A [`CartSnapshot`] is always a complete, authoritative replacement
//! returned by the remote gateway, never a delta. The client never computes
//! `total_cart_price` or post-mutation counts itself; it only holds what the
//! server last returned.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::catalog::{Brand, Category};
use crate::types::id::{CartId, ProductId, UserId};

/// The full cart contents for the authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Cart record id; absent on a never-fetched or cleared cart.
    #[serde(rename = "_id", default)]
    pub id: Option<CartId>,
    /// Owning user, as reported by the server.
    #[serde(default)]
    pub cart_owner: Option<UserId>,
    /// Cart lines, in server order.
    pub products: Vec<CartLine>,
    /// Server-computed total, in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cart_price: Decimal,
}

impl CartSnapshot {
    /// An empty cart with a zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: None,
            cart_owner: None,
            products: Vec::new(),
            total_cart_price: Decimal::ZERO,
        }
    }

    /// Look up the line for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.products
            .iter()
            .find(|line| line.product.id == *product_id)
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Line quantity; the server never returns a line with count 0.
    pub count: u32,
    /// Server-computed unit price at the time the line was added.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Denormalized product summary for display.
    pub product: ProductSummary,
}

impl CartLine {
    /// The product this line refers to.
    #[must_use]
    pub const fn product_ref(&self) -> &ProductId {
        &self.product.id
    }
}

/// Denormalized product data embedded in a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Product id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Cover image URL.
    #[serde(default)]
    pub image_cover: Option<String>,
    /// Owning category, when the server denormalizes it into the line.
    #[serde(default)]
    pub category: Option<Category>,
    /// Brand, when present.
    #[serde(default)]
    pub brand: Option<Brand>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot_json() -> &'static str {
        r#"{
            "_id": "65f1c0ffee",
            "cartOwner": "64089faf24b2",
            "products": [
                {
                    "count": 2,
                    "_id": "65f1aaaa",
                    "price": 149.0,
                    "product": {
                        "_id": "6428ebc6dc1175abc65ca0b9",
                        "title": "Woman Shawl",
                        "imageCover": "https://cdn.example.com/shawl.jpg"
                    }
                }
            ],
            "totalCartPrice": 298
        }"#
    }

    #[test]
    fn test_deserialize_snapshot() {
        let snapshot: CartSnapshot = serde_json::from_str(snapshot_json()).unwrap();
        assert_eq!(snapshot.id.as_ref().unwrap().as_str(), "65f1c0ffee");
        assert_eq!(
            snapshot.cart_owner.as_ref().unwrap().as_str(),
            "64089faf24b2"
        );
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.total_cart_price, Decimal::from(298));

        let line = &snapshot.products[0];
        assert_eq!(line.count, 2);
        assert_eq!(line.price, Decimal::from(149));
        assert_eq!(line.product_ref().as_str(), "6428ebc6dc1175abc65ca0b9");
        assert_eq!(line.product.title, "Woman Shawl");
    }

    #[test]
    fn test_line_lookup() {
        let snapshot: CartSnapshot = serde_json::from_str(snapshot_json()).unwrap();
        let id = ProductId::from("6428ebc6dc1175abc65ca0b9");
        assert!(snapshot.line(&id).is_some());
        assert!(snapshot.line(&ProductId::from("missing")).is_none());
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = CartSnapshot::empty();
        assert!(snapshot.products.is_empty());
        assert_eq!(snapshot.total_cart_price, Decimal::ZERO);
    }
}
