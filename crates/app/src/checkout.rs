//! Checkout Settlement
//!
//! Records a confirmed payment as an order. The cart is cleared only after
//! the order exists, so a failed write never loses the buyer's cart.

use std::{sync::Arc, time::Instant};

use lapak::{
    cart::CartStore,
    checkout::{CheckoutError, CheckoutFlow, SettledCheckout},
    notifications::NotificationKind,
    pricing::{PricingError, whole_rupiah},
    storage::KeyValueStore,
};
use thiserror::Error;
use tracing::{error, info};

use crate::{
    auth::{Session, UserUuid},
    domain::orders::{
        OrdersService, OrdersServiceError,
        data::{NewOrder, NewOrderItem},
        records::{OrderRecord, OrderStatus, PaymentMethod, PaymentState},
    },
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("failed to record order")]
    Orders(#[from] OrdersServiceError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Account the order is recorded against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buyer {
    pub user_id: UserUuid,
    pub email: String,
}

impl From<&Session> for Buyer {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user.id,
            email: session.user.email.clone().unwrap_or_default(),
        }
    }
}

/// Order for a confirmed QRIS checkout.
///
/// # Errors
///
/// Returns a [`PricingError`] if an amount does not fit the order columns.
pub fn new_order(settled: &SettledCheckout, buyer: &Buyer) -> Result<NewOrder, PricingError> {
    let total_amount =
        u64::try_from(whole_rupiah(&settled.amount)?).map_err(|_err| PricingError::Overflow)?;

    Ok(NewOrder {
        user_id: buyer.user_id,
        order_number: settled.order_id.to_string(),
        total_amount,
        status: OrderStatus::Processing,
        payment_method: PaymentMethod::Qris,
        payment_status: PaymentState::Paid,
        customer_name: settled.details.nick.clone(),
        customer_email: buyer.email.clone(),
        customer_phone: settled.details.whatsapp.clone(),
        shipping_address: None,
        items: settled
            .lines
            .iter()
            .map(|line| NewOrderItem {
                product_id: line.product.id.clone(),
                quantity: line.quantity,
                price: line.product.price,
            })
            .collect(),
    })
}

#[derive(Clone)]
pub struct CheckoutService {
    orders: Arc<dyn OrdersService>,
}

impl std::fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService").finish_non_exhaustive()
    }
}

impl CheckoutService {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>) -> Self {
        Self { orders }
    }

    /// Confirm the flow's running payment, record the order and clear the
    /// cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment cannot be confirmed or the order
    /// cannot be recorded. In the latter case the payment stays confirmed
    /// and the cart is kept; see [`CheckoutService::record`].
    pub async fn settle<S: KeyValueStore + Send>(
        &self,
        flow: &mut CheckoutFlow,
        store: &mut CartStore<S>,
        buyer: &Buyer,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        let settled = flow.confirm(store.cart())?;

        self.record(&settled, store, buyer).await
    }

    /// Record a confirmed checkout as an order, then clear the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be created; the cart is kept.
    pub async fn record<S: KeyValueStore + Send>(
        &self,
        settled: &SettledCheckout,
        store: &mut CartStore<S>,
        buyer: &Buyer,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        let order = new_order(settled, buyer)?;

        match self.orders.create_order(order).await {
            Ok(created) => {
                info!(order = %created.id, number = %created.order_number, "checkout settled");

                store.clear_cart();
                store.notifications_mut().push(
                    NotificationKind::Success,
                    format!("Order {} placed", created.order_number),
                    Instant::now(),
                );

                Ok(created)
            }
            Err(error) => {
                error!(number = %settled.order_id, %error, "failed to record paid order");

                store.notifications_mut().push(
                    NotificationKind::Error,
                    "Payment received but the order could not be saved",
                    Instant::now(),
                );

                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lapak::{
        cart::CartStore,
        checkout::{CheckoutFlow, Field},
        payment::OrderId,
        products::ProductCategory,
        storage::MemoryStore,
    };
    use testresult::TestResult;

    use crate::{
        domain::orders::MockOrdersService,
        remote::RemoteError,
        test::helpers::{order_from, product, session},
    };

    use super::*;

    fn paying(store: &CartStore<MemoryStore>) -> Result<CheckoutFlow, CheckoutError> {
        let mut flow = CheckoutFlow::new();

        flow.open_form(store.cart())?;
        flow.edit(Field::Nick, "builder")?;
        flow.edit(Field::Whatsapp, "0812 3456 7890")?;
        flow.submit(store.cart(), OrderId::new("ORD-42"))?;

        Ok(flow)
    }

    fn stocked_store() -> CartStore<MemoryStore> {
        let mut store = CartStore::open(MemoryStore::new());

        for _ in 0..3 {
            store.add_to_cart(product("a", 15_000, ProductCategory::Items));
        }
        store.add_to_cart(product("b", 75_000, ProductCategory::Passes));

        store
    }

    #[tokio::test]
    async fn settle_records_the_order_then_clears_the_cart() -> TestResult {
        let mut store = stocked_store();
        let mut flow = paying(&store)?;
        let buyer = Buyer::from(&session());

        let mut orders = MockOrdersService::new();
        orders
            .expect_create_order()
            .once()
            .withf(|order| {
                order.order_number == "ORD-42"
                    && order.total_amount == 120_000
                    && order.payment_method == PaymentMethod::Qris
                    && order.payment_status == PaymentState::Paid
                    && order.customer_phone == "081234567890"
                    && order.items.len() == 2
            })
            .returning(|order| Ok(order_from(&order)));

        let service = CheckoutService::new(Arc::new(orders));

        let created = service.settle(&mut flow, &mut store, &buyer).await?;

        assert_eq!(created.order_number, "ORD-42");
        assert_eq!(created.order_items.len(), 2);
        assert_eq!(store.cart_count(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn failed_order_keeps_the_cart() -> TestResult {
        let mut store = stocked_store();
        let mut flow = paying(&store)?;
        let buyer = Buyer::from(&session());

        let mut orders = MockOrdersService::new();
        orders
            .expect_create_order()
            .once()
            .return_once(|_| {
                Err(OrdersServiceError::Remote(RemoteError::from_response(
                    503, "down",
                )))
            });

        let service = CheckoutService::new(Arc::new(orders));

        let result = service.settle(&mut flow, &mut store, &buyer).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::Orders(_))),
            "expected Orders error, got {result:?}"
        );
        assert_eq!(store.cart_count(), 4);
        assert_eq!(
            store.notifications().latest().map(|n| n.kind),
            Some(NotificationKind::Error)
        );

        Ok(())
    }

    #[tokio::test]
    async fn unconfirmable_payments_never_reach_the_store() -> TestResult {
        let mut store = stocked_store();
        let mut flow = paying(&store)?;
        flow.cancel()?;

        let mut orders = MockOrdersService::new();
        orders.expect_create_order().never();

        let service = CheckoutService::new(Arc::new(orders));

        let result = service
            .settle(&mut flow, &mut store, &Buyer::from(&session()))
            .await;

        assert!(
            matches!(result, Err(CheckoutServiceError::Checkout(_))),
            "expected Checkout error, got {result:?}"
        );
        assert_eq!(store.cart_count(), 4);

        Ok(())
    }

    #[tokio::test]
    async fn record_can_be_retried_after_a_failure() -> TestResult {
        let mut store = stocked_store();
        let mut flow = paying(&store)?;
        let settled = flow.confirm(store.cart())?;
        let buyer = Buyer::from(&session());

        let mut orders = MockOrdersService::new();
        let mut calls = 0;
        orders.expect_create_order().times(2).returning(move |order| {
            calls += 1;
            if calls == 1 {
                Err(OrdersServiceError::Remote(RemoteError::from_response(503, "down")))
            } else {
                Ok(order_from(&order))
            }
        });

        let service = CheckoutService::new(Arc::new(orders));

        assert!(service.record(&settled, &mut store, &buyer).await.is_err());
        assert_eq!(store.cart_count(), 4);

        service.record(&settled, &mut store, &buyer).await?;
        assert_eq!(store.cart_count(), 0);
        assert!(flow.payment().is_none());
        assert_eq!(settled.lines.len(), 2);

        Ok(())
    }
}
