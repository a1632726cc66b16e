//! Order Records

use std::fmt::{self, Display, Formatter};

use jiff::Timestamp;
use lapak::{
    pricing::{Price, PricingError, rupiah},
    products::{Product, ProductId},
};
use serde::{Deserialize, Serialize};

use crate::{auth::UserUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        })
    }
}

/// How an order was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Qris,
    BankTransfer,
    EWallet,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentMethod::Qris => "qris",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::EWallet => "e_wallet",
        })
    }
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Pending,
    Paid,
    Failed,
}

impl Display for PaymentState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentState::Pending => "pending",
            PaymentState::Paid => "paid",
            PaymentState::Failed => "failed",
        })
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderUuid,
    pub user_id: UserUuid,
    pub order_number: String,
    pub total_amount: u64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentState,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub shipping_address: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub order_items: Vec<OrderItemRecord>,
}

impl OrderRecord {
    /// Order total in the store currency.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the amount overflows.
    pub fn total(&self) -> Result<Price, PricingError> {
        rupiah(self.total_amount)
    }
}

/// Order Item Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub id: OrderItemUuid,
    pub order_id: OrderUuid,
    pub product_id: ProductId,
    pub quantity: u32,

    /// Unit price at purchase time, in whole rupiah
    pub price: u64,

    /// Embedded product, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}
