//! Orders Repository

use tracing::error;

use crate::{
    auth::UserUuid,
    domain::orders::{
        data::{NewOrder, OrderItemRow, StatusUpdate},
        records::{OrderItemRecord, OrderRecord, OrderStatus, OrderUuid},
    },
    remote::{Query, RemoteClient, RemoteError},
};

const ORDERS_TABLE: &str = "orders";
const ORDER_ITEMS_TABLE: &str = "order_items";

/// Orders with their items and each item's product.
const ORDER_SELECT: &str = "*, order_items(*, product:products(*))";

#[derive(Debug, Clone)]
pub(crate) struct RemoteOrdersRepository {
    client: RemoteClient,
}

impl RemoteOrdersRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub(crate) fn user_orders_query(user: UserUuid) -> Query {
        Query::new()
            .select(ORDER_SELECT)
            .eq("user_id", user)
            .order_desc("created_at")
    }

    pub(crate) async fn list_user_orders(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, RemoteError> {
        self.client
            .select(ORDERS_TABLE, &Self::user_orders_query(user))
            .await
    }

    pub(crate) async fn get_order(
        &self,
        order: OrderUuid,
    ) -> Result<Option<OrderRecord>, RemoteError> {
        let query = Query::new().select(ORDER_SELECT).eq("id", order).limit(1);
        let rows: Vec<OrderRecord> = self.client.select(ORDERS_TABLE, &query).await?;

        Ok(rows.into_iter().next())
    }

    /// Insert the order row, then its items.
    ///
    /// If the items cannot be inserted the order row is deleted again.
    pub(crate) async fn create_order(
        &self,
        order: &NewOrder,
    ) -> Result<Option<OrderRecord>, RemoteError> {
        let rows: Vec<OrderRecord> = self.client.insert(ORDERS_TABLE, order).await?;

        let Some(mut created) = rows.into_iter().next() else {
            return Ok(None);
        };

        let items: Vec<OrderItemRow<'_>> = order
            .items
            .iter()
            .map(|item| OrderItemRow::for_order(created.id, item))
            .collect();

        match self
            .client
            .insert::<_, OrderItemRecord>(ORDER_ITEMS_TABLE, &items)
            .await
        {
            Ok(items) => {
                created.order_items = items;

                Ok(Some(created))
            }
            Err(insert_error) => {
                let query = Query::new().eq("id", created.id);

                if let Err(delete_error) = self
                    .client
                    .delete::<serde_json::Value>(ORDERS_TABLE, &query)
                    .await
                {
                    error!(
                        order = %created.id,
                        %delete_error,
                        "failed to remove order without items"
                    );
                }

                Err(insert_error)
            }
        }
    }

    pub(crate) async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Option<OrderRecord>, RemoteError> {
        let rows: Vec<OrderRecord> = self
            .client
            .update(ORDERS_TABLE, &Query::new().eq("id", order), &StatusUpdate { status })
            .await?;

        Ok(rows.into_iter().next())
    }
}
