//! Checkout: the read-cart → create-order → clear-cart sequence.

use std::time::Duration;

use clients::{CartClient, OrderClient};
use common::Order;
use uuid::Uuid;

use crate::cart::CartCoordinator;
use crate::error::{OrchestrationError, Result};

/// Attempts made to clear the cart after the order exists.
const CART_CLEAR_ATTEMPTS: u32 = 2;
/// Pause between cart-clear attempts.
const CART_CLEAR_BACKOFF: Duration = Duration::from_millis(100);

/// Drives the checkout sequence across the cart and order services.
///
/// The sequence short-circuits on failure at each step:
/// 1. Read the cart; a failed read aborts with the downstream status.
/// 2. An empty cart aborts before any order call.
/// 3. Create the order; on failure the cart is left untouched so checkout
///    stays retryable.
/// 4. Clear the cart, best-effort: a failure here is logged and counted but
///    the created order is returned regardless.
pub struct CheckoutCoordinator<C: CartClient, O: OrderClient> {
    cart: CartCoordinator<C>,
    orders: O,
}

impl<C, O> CheckoutCoordinator<C, O>
where
    C: CartClient,
    O: OrderClient,
{
    pub fn new(cart: CartCoordinator<C>, orders: O) -> Self {
        Self { cart, orders }
    }

    /// Runs the checkout sequence and returns the created order.
    ///
    /// Holds the cart write lock throughout, so no cart mutation can slip
    /// in between the read and the clear.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self) -> Result<Order> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let started = std::time::Instant::now();

        let _guard = self.cart.lock().await;

        let items = self.cart.client().fetch().await?;
        if items.is_empty() {
            return Err(OrchestrationError::EmptyCart);
        }

        let idempotency_key = Uuid::new_v4().to_string();
        let order = self.orders.create(&items, &idempotency_key).await?;

        self.clear_cart_best_effort(&order.id).await;

        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        metrics::counter!("checkout_completed_total").increment(1);
        tracing::info!(order_id = %order.id, total = order.total_amount, "checkout completed");
        Ok(order)
    }

    /// Clears the cart once the order exists. The order is already durable
    /// downstream, so a clear failure is logged and counted, never surfaced;
    /// the known cost is a stale cart alongside a placed order.
    async fn clear_cart_best_effort(&self, order_id: &str) {
        for attempt in 1..=CART_CLEAR_ATTEMPTS {
            match self.cart.client().clear().await {
                Ok(()) => return,
                Err(error) => {
                    tracing::warn!(%order_id, attempt, %error, "cart clear failed after checkout");
                    if attempt < CART_CLEAR_ATTEMPTS {
                        tokio::time::sleep(CART_CLEAR_BACKOFF).await;
                    }
                }
            }
        }
        metrics::counter!("checkout_cart_clear_failures_total").increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clients::{InMemoryCartClient, InMemoryOrderClient};
    use common::{CartItem, OrderStatus};

    fn item(id: i64, quantity: u32) -> CartItem {
        CartItem {
            id,
            name: format!("Item {id}"),
            price: 10.0,
            quantity,
        }
    }

    fn setup(
        items: Vec<CartItem>,
    ) -> (
        CheckoutCoordinator<InMemoryCartClient, InMemoryOrderClient>,
        InMemoryCartClient,
        InMemoryOrderClient,
    ) {
        let cart_client = InMemoryCartClient::with_items(items);
        let order_client = InMemoryOrderClient::new();
        let coordinator = CheckoutCoordinator::new(
            CartCoordinator::new(cart_client.clone()),
            order_client.clone(),
        );
        (coordinator, cart_client, order_client)
    }

    #[tokio::test]
    async fn test_happy_path_creates_order_and_clears_cart() {
        let (coordinator, cart, orders) = setup(vec![item(1, 2), item(2, 1)]);

        let order = coordinator.execute().await.unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 2);
        assert!((order.total_amount - 30.0).abs() < 1e-9);
        assert!(cart.items().is_empty());
        assert_eq!(cart.clear_calls(), 1);
        assert_eq!(orders.order_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_never_reaches_order_service() {
        let (coordinator, _cart, orders) = setup(vec![]);

        let result = coordinator.execute().await;

        assert!(matches!(result, Err(OrchestrationError::EmptyCart)));
        assert_eq!(orders.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_cart_read_failure_aborts() {
        let (coordinator, cart, orders) = setup(vec![item(1, 1)]);
        cart.set_fail_on_fetch(true);

        let result = coordinator.execute().await;

        assert!(matches!(result, Err(OrchestrationError::Client(_))));
        assert_eq!(orders.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_order_failure_leaves_cart_untouched() {
        let (coordinator, cart, orders) = setup(vec![item(1, 2)]);
        orders.set_fail_on_create(true);

        let result = coordinator.execute().await;

        assert!(matches!(result, Err(OrchestrationError::Client(_))));
        assert_eq!(cart.items(), vec![item(1, 2)]);
        assert_eq!(cart.clear_calls(), 0);
    }

    #[tokio::test]
    async fn test_clear_failure_is_retried_then_swallowed() {
        let (coordinator, cart, orders) = setup(vec![item(1, 1)]);
        cart.set_fail_on_clear(true);

        let order = coordinator.execute().await.unwrap();

        // The order exists and is returned even though the cart is stale.
        assert_eq!(orders.order_count(), 1);
        assert_eq!(order.items, vec![item(1, 1)]);
        assert_eq!(cart.clear_calls(), CART_CLEAR_ATTEMPTS);
        assert_eq!(cart.items(), vec![item(1, 1)]);
    }
}
