//! Catalog browsing commands. No session required; responses come through
//! the gateway's short-TTL catalog cache.

use thiserror::Error;

use freshcart_client::config::{ClientConfig, ConfigError};
use freshcart_client::gateway::{GatewayError, HttpGateway, ListQuery};
use freshcart_core::{PageMetadata, ProductId};

/// Errors that can occur during catalog commands.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Configuration failed to load.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The remote API call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

fn gateway() -> Result<HttpGateway, CatalogError> {
    let config = ClientConfig::from_env()?;
    Ok(HttpGateway::new(&config)?)
}

fn log_page(metadata: Option<&PageMetadata>) {
    if let Some(meta) = metadata {
        tracing::info!("Page {} of {}", meta.current_page, meta.number_of_pages);
    }
}

/// List products.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn products(page: Option<u64>, limit: Option<u64>) -> Result<(), CatalogError> {
    let listing = gateway()?.products(ListQuery { page, limit }).await?;

    for product in &listing.data {
        tracing::info!("{}  {}  {}", product.id, product.price, product.title);
    }
    log_page(listing.metadata.as_ref());
    Ok(())
}

/// Show a single product.
///
/// # Errors
///
/// Returns an error if the request fails or the id is unknown.
pub async fn product(id: &str) -> Result<(), CatalogError> {
    let product = gateway()?.product(&ProductId::from(id)).await?;

    tracing::info!("{} ({})", product.title, product.id);
    tracing::info!("Price: {}", product.price);
    if let Some(category) = &product.category {
        tracing::info!("Category: {}", category.name);
    }
    if let Some(brand) = &product.brand {
        tracing::info!("Brand: {}", brand.name);
    }
    if let (Some(avg), Some(count)) = (product.ratings_average, product.ratings_quantity) {
        tracing::info!("Rating: {avg} ({count} ratings)");
    }
    if let Some(description) = &product.description {
        tracing::info!("{description}");
    }
    Ok(())
}

/// List categories.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn categories(page: Option<u64>, limit: Option<u64>) -> Result<(), CatalogError> {
    let listing = gateway()?.categories(ListQuery { page, limit }).await?;

    for category in &listing.data {
        tracing::info!("{}  {}", category.id, category.name);
    }
    log_page(listing.metadata.as_ref());
    Ok(())
}

/// List brands.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn brands(page: Option<u64>, limit: Option<u64>) -> Result<(), CatalogError> {
    let listing = gateway()?.brands(ListQuery { page, limit }).await?;

    for brand in &listing.data {
        tracing::info!("{}  {}", brand.id, brand.name);
    }
    log_page(listing.metadata.as_ref());
    Ok(())
}

/// List subcategories.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn subcategories(page: Option<u64>, limit: Option<u64>) -> Result<(), CatalogError> {
    let listing = gateway()?.subcategories(ListQuery { page, limit }).await?;

    for subcategory in &listing.data {
        tracing::info!(
            "{}  {} (category {})",
            subcategory.id,
            subcategory.name,
            subcategory.category
        );
    }
    log_page(listing.metadata.as_ref());
    Ok(())
}
