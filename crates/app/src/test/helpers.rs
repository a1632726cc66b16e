//! Test builders for sessions, clients and store records.

use jiff::Timestamp;
use lapak::products::{Product, ProductCategory, ProductId};
use serde_json::Map;
use url::Url;

use crate::{
    auth::{AuthUser, Session, UserUuid},
    domain::orders::{
        data::NewOrder,
        records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
    },
    remote::{RemoteClient, RemoteConfig, RetryPolicy},
};

pub(crate) fn client() -> Result<RemoteClient, url::ParseError> {
    client_at("https://store.example.com")
}

/// Client for a store at `url`, e.g. a local mock server.
pub(crate) fn client_at(url: &str) -> Result<RemoteClient, url::ParseError> {
    let config = RemoteConfig::new(Url::parse(url)?, "anon-key").with_retry(RetryPolicy::none());

    Ok(RemoteClient::new(config))
}

pub(crate) fn user() -> AuthUser {
    AuthUser {
        id: UserUuid::new(),
        email: Some("buyer@example.com".to_string()),
        user_metadata: Map::new(),
    }
}

pub(crate) fn session() -> Session {
    Session {
        access_token: "access-token".to_string(),
        refresh_token: "refresh-token".to_string(),
        expires_in: Some(3600),
        expires_at: None,
        user: user(),
    }
}

pub(crate) fn product(id: &str, price: u64, category: ProductCategory) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: String::new(),
        price,
        image: String::new(),
        category,
        stock: 10,
        popular: None,
        delivery_time: None,
    }
}

pub(crate) fn order_from(new: &NewOrder) -> OrderRecord {
    let id = OrderUuid::new();

    OrderRecord {
        id,
        user_id: new.user_id,
        order_number: new.order_number.clone(),
        total_amount: new.total_amount,
        status: new.status,
        payment_method: new.payment_method,
        payment_status: new.payment_status,
        customer_name: new.customer_name.clone(),
        customer_email: new.customer_email.clone(),
        customer_phone: new.customer_phone.clone(),
        shipping_address: new.shipping_address.clone(),
        created_at: Timestamp::UNIX_EPOCH,
        order_items: new
            .items
            .iter()
            .map(|item| OrderItemRecord {
                id: OrderItemUuid::new(),
                order_id: id,
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                price: item.price,
                product: None,
            })
            .collect(),
    }
}
