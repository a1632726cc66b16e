//! Wishlist Repository

use lapak::products::ProductId;

use crate::{
    auth::UserUuid,
    domain::wishlist::records::{WishlistRecord, WishlistRow},
    remote::{Query, RemoteClient, RemoteError},
};

const TABLE: &str = "wishlist";

/// Wishlist entries with their product.
const WISHLIST_SELECT: &str = "*, product:products(*)";

#[derive(Debug, Clone)]
pub(crate) struct RemoteWishlistRepository {
    client: RemoteClient,
}

impl RemoteWishlistRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub(crate) fn entry_query(user: UserUuid, product: &ProductId) -> Query {
        Query::new().eq("user_id", user).eq("product_id", product)
    }

    pub(crate) async fn list(&self, user: UserUuid) -> Result<Vec<WishlistRecord>, RemoteError> {
        let query = Query::new()
            .select(WISHLIST_SELECT)
            .eq("user_id", user)
            .order_desc("created_at");

        self.client.select(TABLE, &query).await
    }

    pub(crate) async fn add(
        &self,
        user: UserUuid,
        product: &ProductId,
    ) -> Result<Option<WishlistRecord>, RemoteError> {
        let rows: Vec<WishlistRecord> = self
            .client
            .insert(
                TABLE,
                &WishlistRow {
                    user_id: user,
                    product_id: product,
                },
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    pub(crate) async fn remove(
        &self,
        user: UserUuid,
        product: &ProductId,
    ) -> Result<usize, RemoteError> {
        let rows: Vec<serde_json::Value> = self
            .client
            .delete(TABLE, &Self::entry_query(user, product))
            .await?;

        Ok(rows.len())
    }

    pub(crate) async fn contains(
        &self,
        user: UserUuid,
        product: &ProductId,
    ) -> Result<bool, RemoteError> {
        let query = Self::entry_query(user, product).select("id").limit(1);
        let rows: Vec<serde_json::Value> = self.client.select(TABLE, &query).await?;

        Ok(!rows.is_empty())
    }
}
