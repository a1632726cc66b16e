//! Wishlist Records

use jiff::Timestamp;
use lapak::products::{Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::{auth::UserUuid, uuids::TypedUuid};

/// Wishlist UUID
pub type WishlistUuid = TypedUuid<WishlistRecord>;

/// Wishlist Record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistRecord {
    pub id: WishlistUuid,
    pub user_id: UserUuid,
    pub product_id: ProductId,
    pub created_at: Timestamp,

    /// Embedded product, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

/// `wishlist` row as inserted.
#[derive(Debug, Serialize)]
pub(crate) struct WishlistRow<'a> {
    pub user_id: UserUuid,
    pub product_id: &'a ProductId,
}
