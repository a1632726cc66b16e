//! Orders Data

use lapak::products::ProductId;
use serde::Serialize;

use crate::{
    auth::UserUuid,
    domain::orders::records::{OrderStatus, OrderUuid, PaymentMethod, PaymentState},
};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    pub user_id: UserUuid,
    pub order_number: String,
    pub total_amount: u64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentState,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,

    /// Lines, inserted into `order_items` once the order row exists
    #[serde(skip)]
    pub items: Vec<NewOrderItem>,
}

/// New Order Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,

    /// Unit price in whole rupiah
    pub price: u64,
}

/// `order_items` row as inserted.
#[derive(Debug, Serialize)]
pub(crate) struct OrderItemRow<'a> {
    pub order_id: OrderUuid,
    pub product_id: &'a ProductId,
    pub quantity: u32,
    pub price: u64,
}

impl<'a> OrderItemRow<'a> {
    pub(crate) fn for_order(order_id: OrderUuid, item: &'a NewOrderItem) -> Self {
        Self {
            order_id,
            product_id: &item.product_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// Order status change.
#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdate {
    pub status: OrderStatus,
}
