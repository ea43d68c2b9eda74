//! Cart synchronizer.
//!
//! Owns the in-memory cart state: the full [`CartSnapshot`] and the
//! lightweight item-count badge. Every mutation is a network round trip and
//! the server's response is the sole source of truth for the new state; no
//! local quantity math is trusted without server confirmation.
//!
//! # Ordering
//!
//! All gateway calls are suspension points, so responses can arrive out of
//! issue order. For a single cart line that would let a slow "set count to
//! 3" clobber a faster "set count to 5" issued after it. Each line therefore
//! carries a monotonic sequence token: a response is applied only when its
//! token still matches the line's latest issued one, and stale responses are
//! discarded wholesale. Operations on different lines proceed independently.
//!
//! While a line has requests in flight it reports `busy`, an explicit flag
//! for the presentation layer to render a pending indicator.
//!
//! # Badge asymmetry
//!
//! `item_count` is updated only from explicit server count fields. Adding an
//! item returns a count but no usable snapshot, so the badge can move while
//! the snapshot stays put until the next fetch. That divergence mirrors the
//! API and is deliberate; the count is not derived from `products.len()`.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::RwLock;

use freshcart_core::{CartSnapshot, ProductId};

use crate::gateway::GatewayError;
use crate::gateway::types::{
    CartAddResponse, CartClearResponse, CartFetchResponse, CartRemoveResponse, CartUpdateResponse,
};

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The gateway call failed; prior local state is untouched.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The server answered the clear request without the success sentinel;
    /// prior local state is untouched.
    #[error("cart clear rejected: {message}")]
    ClearRejected {
        /// The message the server returned instead of `"success"`.
        message: String,
    },
}

/// The authenticated cart surface of the remote API.
///
/// [`CartSynchronizer`] is generic over this seam so its ordering and
/// failure semantics can be exercised without HTTP.
#[allow(async_fn_in_trait)]
pub trait CartApi {
    /// `GET /cart`.
    async fn fetch_cart(&self) -> Result<CartFetchResponse, GatewayError>;
    /// `POST /cart`.
    async fn add_item(&self, product_id: &ProductId) -> Result<CartAddResponse, GatewayError>;
    /// `PUT /cart/:id`.
    async fn update_item(
        &self,
        product_id: &ProductId,
        count: u32,
    ) -> Result<CartUpdateResponse, GatewayError>;
    /// `DELETE /cart/:id`.
    async fn remove_item(&self, product_id: &ProductId)
    -> Result<CartRemoveResponse, GatewayError>;
    /// `DELETE /cart`.
    async fn clear_cart(&self) -> Result<CartClearResponse, GatewayError>;
}

/// Per-line synchronization state.
#[derive(Debug, Default)]
struct LineSync {
    /// Latest issued sequence token for this line.
    issued: u64,
    /// Number of requests currently in flight for this line.
    in_flight: u32,
}

#[derive(Debug, Default)]
struct CartState {
    snapshot: Option<CartSnapshot>,
    item_count: Option<u32>,
    lines: HashMap<ProductId, LineSync>,
}

/// In-memory cart state kept consistent with the remote source of truth.
///
/// Constructed once per authenticated session and shared by handle; methods
/// take `&self` so multiple operations can be in flight concurrently.
pub struct CartSynchronizer<G> {
    gateway: G,
    state: RwLock<CartState>,
}

impl<G: CartApi> CartSynchronizer<G> {
    /// Create a synchronizer with empty local state.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: RwLock::new(CartState::default()),
        }
    }

    /// The last server-confirmed snapshot, if any.
    pub async fn snapshot(&self) -> Option<CartSnapshot> {
        self.state.read().await.snapshot.clone()
    }

    /// The last server-confirmed item count, if any. This is the badge
    /// value; see the module docs for why it is not `products.len()`.
    pub async fn item_count(&self) -> Option<u32> {
        self.state.read().await.item_count
    }

    /// Whether a line currently has requests in flight.
    pub async fn is_line_busy(&self, product_id: &ProductId) -> bool {
        self.state
            .read()
            .await
            .lines
            .get(product_id)
            .is_some_and(|line| line.in_flight > 0)
    }

    /// Retrieve the current cart from the server and replace local state.
    ///
    /// # Errors
    ///
    /// On failure prior state is left untouched; the caller retries by user
    /// action, never automatically.
    pub async fn fetch_cart(&self) -> Result<CartSnapshot, CartError> {
        let response = self.gateway.fetch_cart().await?;

        let mut state = self.state.write().await;
        state.snapshot = Some(response.data.clone());
        state.item_count = Some(response.num_of_cart_items);
        Ok(response.data)
    }

    /// Add one unit of a product; returns the server's new item count.
    ///
    /// Updates only the badge count. The add response carries no usable
    /// snapshot, so the local snapshot is deliberately left alone.
    ///
    /// # Errors
    ///
    /// On failure prior state is left untouched.
    pub async fn add_item(&self, product_id: &ProductId) -> Result<u32, CartError> {
        let response = self.gateway.add_item(product_id).await?;

        let mut state = self.state.write().await;
        state.item_count = Some(response.num_of_cart_items);
        tracing::debug!(%product_id, count = response.num_of_cart_items, "item added");
        Ok(response.num_of_cart_items)
    }

    /// Remove the line for a product and replace the snapshot wholesale.
    ///
    /// Participates in per-line ordering: a stale response is discarded.
    ///
    /// # Errors
    ///
    /// On failure prior state is left untouched.
    pub async fn remove_item(&self, product_id: &ProductId) -> Result<(), CartError> {
        let seq = self.begin_line_op(product_id).await;
        let result = self.gateway.remove_item(product_id).await;

        let mut state = self.state.write().await;
        let latest = state.end_line_op(product_id);
        let response = result?;

        if seq == latest {
            state.snapshot = Some(response.data);
            state.item_count = Some(response.num_of_cart_items);
        } else {
            tracing::debug!(%product_id, seq, latest, "discarding stale remove response");
        }
        Ok(())
    }

    /// Set a line's quantity and replace the snapshot wholesale.
    ///
    /// `new_count` may be zero or negative when the caller computes
    /// `current ± 1` without clamping; it is clamped to ≥ 0 here and a
    /// resulting 0 is treated as a removal. Responses for the same line are
    /// applied in request-issue order, not arrival order.
    ///
    /// # Errors
    ///
    /// On failure prior state is left untouched.
    pub async fn update_item_count(
        &self,
        product_id: &ProductId,
        new_count: i64,
    ) -> Result<(), CartError> {
        let clamped = u32::try_from(new_count.max(0)).unwrap_or(u32::MAX);
        if clamped == 0 {
            return self.remove_item(product_id).await;
        }

        let seq = self.begin_line_op(product_id).await;
        let result = self.gateway.update_item(product_id, clamped).await;

        let mut state = self.state.write().await;
        let latest = state.end_line_op(product_id);
        let response = result?;

        if seq == latest {
            state.snapshot = Some(response.data);
            if let Some(count) = response.num_of_cart_items {
                state.item_count = Some(count);
            }
        } else {
            tracing::debug!(%product_id, seq, latest, "discarding stale update response");
        }
        Ok(())
    }

    /// Delete the whole cart.
    ///
    /// Only the server's literal `"success"` sentinel clears local state;
    /// any other response leaves it untouched and surfaces
    /// [`CartError::ClearRejected`].
    ///
    /// # Errors
    ///
    /// On failure prior snapshot and count are byte-for-byte unchanged.
    pub async fn clear_cart(&self) -> Result<(), CartError> {
        let response = self.gateway.clear_cart().await?;
        if !response.is_success() {
            return Err(CartError::ClearRejected {
                message: response.message,
            });
        }

        let mut state = self.state.write().await;
        state.snapshot = Some(CartSnapshot::empty());
        state.item_count = Some(0);
        // Bump every line's latest issued token so responses still in
        // flight are stale and cannot resurrect cleared state. The counters
        // stay monotonic, so tokens issued after the clear never collide
        // with pre-clear ones.
        for line in state.lines.values_mut() {
            line.issued += 1;
        }
        Ok(())
    }

    /// Issue a new sequence token for a line and mark it busy.
    async fn begin_line_op(&self, product_id: &ProductId) -> u64 {
        let mut state = self.state.write().await;
        let line = state.lines.entry(product_id.clone()).or_default();
        line.issued += 1;
        line.in_flight += 1;
        line.issued
    }
}

impl CartState {
    /// Mark a line's request finished and return its latest issued token.
    fn end_line_op(&mut self, product_id: &ProductId) -> u64 {
        let line = self.lines.entry(product_id.clone()).or_default();
        line.in_flight = line.in_flight.saturating_sub(1);
        line.issued
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use freshcart_core::{CartLine, ProductSummary};
    use rust_decimal::Decimal;
    use std::cell::Cell;

    fn snapshot_with(product_id: &ProductId, count: u32) -> CartSnapshot {
        CartSnapshot {
            id: None,
            cart_owner: None,
            products: vec![CartLine {
                count,
                price: Decimal::from(100),
                product: ProductSummary {
                    id: product_id.clone(),
                    title: "Test Product".to_string(),
                    image_cover: None,
                    category: None,
                    brand: None,
                },
            }],
            total_cart_price: Decimal::from(100 * count),
        }
    }

    /// Scripted gateway for unit tests; the async paths resolve immediately.
    struct ScriptedCart {
        clear_message: &'static str,
        fail_fetch: bool,
        fetch_calls: Cell<u32>,
    }

    impl Default for ScriptedCart {
        fn default() -> Self {
            Self {
                clear_message: "success",
                fail_fetch: false,
                fetch_calls: Cell::new(0),
            }
        }
    }

    impl CartApi for ScriptedCart {
        async fn fetch_cart(&self) -> Result<CartFetchResponse, GatewayError> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            if self.fail_fetch {
                return Err(GatewayError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(CartFetchResponse {
                num_of_cart_items: 2,
                data: snapshot_with(&ProductId::from("p1"), 2),
            })
        }

        async fn add_item(&self, _: &ProductId) -> Result<CartAddResponse, GatewayError> {
            Ok(CartAddResponse {
                message: Some("Product added successfully to your cart".to_string()),
                num_of_cart_items: 3,
            })
        }

        async fn update_item(
            &self,
            product_id: &ProductId,
            count: u32,
        ) -> Result<CartUpdateResponse, GatewayError> {
            Ok(CartUpdateResponse {
                num_of_cart_items: Some(count),
                data: snapshot_with(product_id, count),
            })
        }

        async fn remove_item(
            &self,
            product_id: &ProductId,
        ) -> Result<CartRemoveResponse, GatewayError> {
            let _ = product_id;
            Ok(CartRemoveResponse {
                num_of_cart_items: 0,
                data: CartSnapshot::empty(),
            })
        }

        async fn clear_cart(&self) -> Result<CartClearResponse, GatewayError> {
            Ok(CartClearResponse {
                message: self.clear_message.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_fetch_replaces_state() {
        let sync = CartSynchronizer::new(ScriptedCart::default());
        assert!(sync.snapshot().await.is_none());

        let snapshot = sync.fetch_cart().await.unwrap();
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(sync.item_count().await, Some(2));
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_prior_state() {
        let sync = CartSynchronizer::new(ScriptedCart::default());
        sync.fetch_cart().await.unwrap();

        let failing = CartSynchronizer {
            gateway: ScriptedCart {
                fail_fetch: true,
                ..ScriptedCart::default()
            },
            state: sync.state,
        };
        assert!(failing.fetch_cart().await.is_err());
        assert_eq!(failing.item_count().await, Some(2));
        assert_eq!(failing.snapshot().await.unwrap().products.len(), 1);
    }

    #[tokio::test]
    async fn test_add_updates_badge_without_snapshot() {
        let sync = CartSynchronizer::new(ScriptedCart::default());
        let count = sync.add_item(&ProductId::from("p1")).await.unwrap();
        assert_eq!(count, 3);
        assert_eq!(sync.item_count().await, Some(3));
        // The snapshot was never fetched and stays absent.
        assert!(sync.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_update_zero_is_removal() {
        let sync = CartSynchronizer::new(ScriptedCart::default());
        let id = ProductId::from("p1");

        sync.update_item_count(&id, 0).await.unwrap();
        assert_eq!(sync.item_count().await, Some(0));
        assert!(sync.snapshot().await.unwrap().products.is_empty());
    }

    #[tokio::test]
    async fn test_update_negative_is_clamped_to_removal() {
        let sync = CartSynchronizer::new(ScriptedCart::default());
        let id = ProductId::from("p1");

        sync.update_item_count(&id, -1).await.unwrap();
        assert!(sync.snapshot().await.unwrap().products.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_snapshot() {
        let sync = CartSynchronizer::new(ScriptedCart::default());
        let id = ProductId::from("p1");

        sync.update_item_count(&id, 4).await.unwrap();
        let snapshot = sync.snapshot().await.unwrap();
        assert_eq!(snapshot.line(&id).unwrap().count, 4);
        assert_eq!(sync.item_count().await, Some(4));
        assert!(!sync.is_line_busy(&id).await);
    }

    #[tokio::test]
    async fn test_clear_success_zeroes_state() {
        let sync = CartSynchronizer::new(ScriptedCart::default());
        sync.fetch_cart().await.unwrap();

        sync.clear_cart().await.unwrap();
        assert_eq!(sync.item_count().await, Some(0));
        assert!(sync.snapshot().await.unwrap().products.is_empty());
    }

    #[tokio::test]
    async fn test_clear_rejected_leaves_state() {
        let sync = CartSynchronizer::new(ScriptedCart {
            clear_message: "cart not cleared",
            ..ScriptedCart::default()
        });
        sync.fetch_cart().await.unwrap();

        let err = sync.clear_cart().await.unwrap_err();
        assert!(matches!(err, CartError::ClearRejected { .. }));
        assert_eq!(sync.item_count().await, Some(2));
        assert_eq!(sync.snapshot().await.unwrap().products.len(), 1);
    }
}
