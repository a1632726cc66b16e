//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::UserUuid,
    domain::orders::{
        data::NewOrder,
        errors::OrdersServiceError,
        records::{OrderRecord, OrderStatus, OrderUuid},
        repository::RemoteOrdersRepository,
    },
    remote::RemoteClient,
};

#[derive(Debug, Clone)]
pub struct RemoteOrdersService {
    repository: RemoteOrdersRepository,
}

impl RemoteOrdersService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self {
            repository: RemoteOrdersRepository::new(client),
        }
    }
}

#[async_trait]
impl OrdersService for RemoteOrdersService {
    async fn list_user_orders(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        Ok(self.repository.list_user_orders(user).await?)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        self.repository
            .get_order(order)
            .await?
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::NoItems);
        }

        let created = self
            .repository
            .create_order(&order)
            .await?
            .ok_or(OrdersServiceError::InvalidData)?;

        info!(order = %created.id, number = %created.order_number, "order created");

        Ok(created)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.repository
            .update_status(order, status)
            .await?
            .ok_or(OrdersServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieves a user's orders with their items, newest first.
    async fn list_user_orders(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Creates an order and its items.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Changes the fulfilment status of an order.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use lapak::products::ProductId;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use crate::{
        domain::orders::{
            data::NewOrderItem,
            records::{PaymentMethod, PaymentState},
        },
        test::helpers::{client, client_at, order_from},
    };

    use super::*;

    fn order_with(items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder {
            user_id: UserUuid::new(),
            order_number: "ORD-1".to_string(),
            total_amount: items.iter().map(|item| item.price * u64::from(item.quantity)).sum(),
            status: OrderStatus::Processing,
            payment_method: PaymentMethod::Qris,
            payment_status: PaymentState::Paid,
            customer_name: "builder".to_string(),
            customer_email: String::new(),
            customer_phone: "081234567890".to_string(),
            shipping_address: None,
            items,
        }
    }

    fn raid(quantity: u32) -> NewOrderItem {
        NewOrderItem {
            product_id: ProductId::new("joki-raid"),
            quantity,
            price: 75_000,
        }
    }

    /// Order row as the store returns it from the insert, without items.
    fn stored_row(order: &NewOrder) -> OrderRecord {
        let mut stored = order_from(order);
        stored.order_items.clear();
        stored
    }

    #[test]
    fn user_orders_embed_items_and_products() -> TestResult {
        let user = UserUuid::new();
        let url = client()?.rest_url("orders", &RemoteOrdersRepository::user_orders_query(user))?;

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(
            pairs,
            [
                ("select".to_string(), "*,order_items(*,product:products(*))".to_string()),
                ("user_id".to_string(), format!("eq.{user}")),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn orders_without_items_are_rejected_before_any_request() -> TestResult {
        let service = RemoteOrdersService::new(client()?);

        let result = service.create_order(order_with(Vec::new())).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NoItems)),
            "expected NoItems, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn created_orders_carry_their_items() -> TestResult {
        let server = MockServer::start().await;
        let order = order_with(vec![raid(2)]);
        let stored = stored_row(&order);
        let items = order_from(&order).order_items;

        Mock::given(method("POST"))
            .and(path("/rest/v1/orders"))
            .respond_with(ResponseTemplate::new(201).set_body_json([&stored]))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/order_items"))
            .respond_with(ResponseTemplate::new(201).set_body_json(&items))
            .expect(1)
            .mount(&server)
            .await;

        let service = RemoteOrdersService::new(client_at(&server.uri())?);
        let created = service.create_order(order).await?;

        assert_eq!(created.id, stored.id);
        assert_eq!(created.total_amount, 150_000);
        assert_eq!(created.order_items, items);

        server.verify().await;

        Ok(())
    }

    #[tokio::test]
    async fn failed_item_insert_removes_the_order_row() -> TestResult {
        let server = MockServer::start().await;
        let order = order_with(vec![raid(1)]);
        let stored = stored_row(&order);

        Mock::given(method("POST"))
            .and(path("/rest/v1/orders"))
            .respond_with(ResponseTemplate::new(201).set_body_json([&stored]))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/order_items"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "23503",
                "message": "insert or update on table \"order_items\" violates foreign key constraint",
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/orders"))
            .and(query_param("id", format!("eq.{}", stored.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json([&stored]))
            .expect(1)
            .mount(&server)
            .await;

        let service = RemoteOrdersService::new(client_at(&server.uri())?);
        let result = service.create_order(order).await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidReference)),
            "expected the item insert error, got {result:?}"
        );

        server.verify().await;

        Ok(())
    }

    #[tokio::test]
    async fn status_updates_patch_the_order_row() -> TestResult {
        let server = MockServer::start().await;
        let mut stored = stored_row(&order_with(vec![raid(1)]));
        stored.status = OrderStatus::Shipped;

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/orders"))
            .and(query_param("id", format!("eq.{}", stored.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json([&stored]))
            .expect(1)
            .mount(&server)
            .await;

        let service = RemoteOrdersService::new(client_at(&server.uri())?);
        let updated = service
            .update_order_status(stored.id, OrderStatus::Shipped)
            .await?;

        assert_eq!(updated.status, OrderStatus::Shipped);

        server.verify().await;

        Ok(())
    }
}
