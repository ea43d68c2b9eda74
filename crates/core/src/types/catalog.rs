//! Catalog data model: products, categories, brands, subcategories.
//!
//! Catalog records are read-only on the client; list endpoints wrap them in
//! a [`Paginated`] envelope whose paging parameters are passed through to
//! the server untouched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{BrandId, CategoryId, ProductId, SubcategoryId};

/// A full product record from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Long-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Current price, in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Cover image URL.
    #[serde(default)]
    pub image_cover: Option<String>,
    /// Additional image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Owning category.
    #[serde(default)]
    pub category: Option<Category>,
    /// Brand, when the product has one.
    #[serde(default)]
    pub brand: Option<Brand>,
    /// Average rating, 1-5.
    #[serde(default)]
    pub ratings_average: Option<f64>,
    /// Number of ratings.
    #[serde(default)]
    pub ratings_quantity: Option<u64>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    /// Category display name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Category image URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// A subcategory, nested under a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Subcategory id.
    #[serde(rename = "_id")]
    pub id: SubcategoryId,
    /// Subcategory display name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Owning category id.
    pub category: CategoryId,
}

/// A product brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Brand id.
    #[serde(rename = "_id")]
    pub id: BrandId,
    /// Brand display name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Brand logo URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Server paging metadata for catalog list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// 1-based page number of this response.
    pub current_page: u64,
    /// Total number of pages.
    pub number_of_pages: u64,
    /// Page size used.
    pub limit: u64,
    /// Next page number, absent on the last page.
    #[serde(default)]
    pub next_page: Option<u64>,
}

/// Envelope for catalog list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Total number of matching records.
    #[serde(default)]
    pub results: Option<u64>,
    /// Paging metadata, when the endpoint reports it.
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
    /// The records for this page.
    pub data: Vec<T>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_product_list() {
        let json = r#"{
            "results": 52,
            "metadata": {"currentPage": 1, "numberOfPages": 2, "limit": 40, "nextPage": 2},
            "data": [{
                "_id": "6428ebc6dc1175abc65ca0b9",
                "title": "Woman Shawl",
                "price": 149.0,
                "imageCover": "https://cdn.example.com/shawl.jpg",
                "images": [],
                "category": {"_id": "c1", "name": "Women's Fashion", "slug": "woman's-fashion"},
                "ratingsAverage": 4.8,
                "ratingsQuantity": 300
            }]
        }"#;

        let page: Paginated<Product> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results, Some(52));
        assert_eq!(page.metadata.unwrap().next_page, Some(2));
        assert_eq!(page.data.len(), 1);

        let product = &page.data[0];
        assert_eq!(product.title, "Woman Shawl");
        assert_eq!(product.category.as_ref().unwrap().name, "Women's Fashion");
        assert!(product.brand.is_none());
    }

    #[test]
    fn test_deserialize_last_page_metadata() {
        let json = r#"{"currentPage": 2, "numberOfPages": 2, "limit": 40}"#;
        let metadata: PageMetadata = serde_json::from_str(json).unwrap();
        assert!(metadata.next_page.is_none());
    }

    #[test]
    fn test_deserialize_brand() {
        let json = r#"{"_id": "b1", "name": "Canon", "slug": "canon", "image": "https://cdn.example.com/canon.png"}"#;
        let brand: Brand = serde_json::from_str(json).unwrap();
        assert_eq!(brand.id.as_str(), "b1");
        assert_eq!(brand.name, "Canon");
    }
}
