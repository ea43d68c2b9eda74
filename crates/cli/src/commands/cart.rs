//! Cart commands.
//!
//! Every command hydrates the persisted session and routes through the
//! guard; cart calls require a signed-in session and carry its token.
//!
//! # Usage
//!
//! ```bash
//! freshcart cart show
//! freshcart cart add 6428ebc6dc1175abc65ca0b9
//! freshcart cart set-count 6428ebc6dc1175abc65ca0b9 3
//! freshcart cart clear
//! ```

use thiserror::Error;

use freshcart_client::cart::{CartError, CartSynchronizer};
use freshcart_client::config::{ClientConfig, ConfigError};
use freshcart_client::gateway::{CartClient, GatewayError, HttpGateway};
use freshcart_client::guard::GuardDecision;
use freshcart_client::session::{FileStore, SessionManager, StoreError};
use freshcart_core::ProductId;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCmdError {
    /// Configuration failed to load.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The persisted session could not be read.
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    /// No signed-in session.
    #[error("Not signed in; run `freshcart auth login` first")]
    NotSignedIn,

    /// Building the token-bearing client failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Hydrate the session and build a synchronizer over the token-bearing
/// cart client. Rejected by the guard when no token is present.
fn cart_sync(config: &ClientConfig) -> Result<CartSynchronizer<CartClient>, CartCmdError> {
    let mut session = SessionManager::new(FileStore::open(&config.state_dir)?);
    session.hydrate();

    match GuardDecision::for_session(&session) {
        GuardDecision::Allow => {}
        GuardDecision::Wait | GuardDecision::RedirectToLogin => {
            return Err(CartCmdError::NotSignedIn);
        }
    }
    let token = session.token().cloned().ok_or(CartCmdError::NotSignedIn)?;

    let gateway = HttpGateway::new(config)?;
    Ok(CartSynchronizer::new(gateway.cart_client(token)?))
}

/// Fetch and display the cart.
///
/// # Errors
///
/// Returns an error when not signed in or the fetch fails.
pub async fn show() -> Result<(), CartCmdError> {
    let config = ClientConfig::from_env()?;
    let sync = cart_sync(&config)?;

    let snapshot = sync.fetch_cart().await?;
    if snapshot.products.is_empty() {
        tracing::info!("Cart is empty");
        return Ok(());
    }

    for line in &snapshot.products {
        tracing::info!(
            "{} x {} @ {} ({})",
            line.count,
            line.product.title,
            line.price,
            line.product_ref()
        );
    }
    tracing::info!("Total: {}", snapshot.total_cart_price);
    if let Some(count) = sync.item_count().await {
        tracing::info!("Items: {count}");
    }
    Ok(())
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error when not signed in or the addition fails.
pub async fn add(product_id: &str) -> Result<(), CartCmdError> {
    let config = ClientConfig::from_env()?;
    let sync = cart_sync(&config)?;

    let count = sync.add_item(&ProductId::from(product_id)).await?;
    tracing::info!("Added {product_id}; cart now has {count} item(s)");
    Ok(())
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns an error when not signed in or the removal fails.
pub async fn remove(product_id: &str) -> Result<(), CartCmdError> {
    let config = ClientConfig::from_env()?;
    let sync = cart_sync(&config)?;

    sync.remove_item(&ProductId::from(product_id)).await?;
    tracing::info!("Removed {product_id}");
    Ok(())
}

/// Set a line's quantity; 0 removes the line.
///
/// # Errors
///
/// Returns an error when not signed in or the update fails.
pub async fn set_count(product_id: &str, count: i64) -> Result<(), CartCmdError> {
    let config = ClientConfig::from_env()?;
    let sync = cart_sync(&config)?;

    sync.update_item_count(&ProductId::from(product_id), count)
        .await?;
    tracing::info!("Set {product_id} to {} item(s)", count.max(0));
    Ok(())
}

/// Delete the whole cart.
///
/// # Errors
///
/// Returns an error when not signed in or the server does not confirm the
/// clear.
pub async fn clear() -> Result<(), CartCmdError> {
    let config = ClientConfig::from_env()?;
    let sync = cart_sync(&config)?;

    sync.clear_cart().await?;
    tracing::info!("Cart cleared");
    Ok(())
}
