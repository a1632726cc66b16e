//! Products Repository

use lapak::products::{Product, ProductCategory, ProductId};

use crate::{
    domain::products::data::{NewProduct, ProductUpdate},
    remote::{Query, RemoteClient, RemoteError},
};

const TABLE: &str = "products";

/// Products shown on the home page.
pub(crate) const POPULAR_LIMIT: usize = 6;

#[derive(Debug, Clone)]
pub(crate) struct RemoteProductsRepository {
    client: RemoteClient,
}

impl RemoteProductsRepository {
    #[must_use]
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub(crate) fn list_query() -> Query {
        Query::new().select("*").order_desc("created_at")
    }

    pub(crate) fn popular_query() -> Query {
        Self::list_query().eq("popular", true).limit(POPULAR_LIMIT)
    }

    pub(crate) fn category_query(category: ProductCategory) -> Query {
        Self::list_query().eq("category", category)
    }

    pub(crate) fn id_query(id: &ProductId) -> Query {
        Query::new().eq("id", id)
    }

    pub(crate) async fn list_products(&self, query: &Query) -> Result<Vec<Product>, RemoteError> {
        self.client.select(TABLE, query).await
    }

    pub(crate) async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, RemoteError> {
        let rows: Vec<Product> = self
            .client
            .select(TABLE, &Self::id_query(id).select("*").limit(1))
            .await?;

        Ok(rows.into_iter().next())
    }

    pub(crate) async fn create_product(
        &self,
        product: &NewProduct,
    ) -> Result<Option<Product>, RemoteError> {
        let rows: Vec<Product> = self.client.insert(TABLE, product).await?;

        Ok(rows.into_iter().next())
    }

    pub(crate) async fn update_product(
        &self,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, RemoteError> {
        let rows: Vec<Product> = self.client.update(TABLE, &Self::id_query(id), update).await?;

        Ok(rows.into_iter().next())
    }

    pub(crate) async fn delete_product(&self, id: &ProductId) -> Result<usize, RemoteError> {
        let rows: Vec<serde_json::Value> = self.client.delete(TABLE, &Self::id_query(id)).await?;

        Ok(rows.len())
    }
}
