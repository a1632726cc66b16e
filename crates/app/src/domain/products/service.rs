//! Products service.

use async_trait::async_trait;
use lapak::products::{Product, ProductCategory, ProductId};
use mockall::automock;

use crate::{
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        repository::RemoteProductsRepository,
    },
    remote::RemoteClient,
};

#[derive(Debug, Clone)]
pub struct RemoteProductsService {
    repository: RemoteProductsRepository,
}

impl RemoteProductsService {
    #[must_use]
    pub fn new(client: RemoteClient) -> Self {
        Self {
            repository: RemoteProductsRepository::new(client),
        }
    }
}

#[async_trait]
impl ProductsService for RemoteProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self
            .repository
            .list_products(&RemoteProductsRepository::list_query())
            .await?)
    }

    async fn popular_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self
            .repository
            .list_products(&RemoteProductsRepository::popular_query())
            .await?)
    }

    async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self
            .repository
            .list_products(&RemoteProductsRepository::category_query(category))
            .await?)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductsServiceError> {
        self.repository
            .get_product(id)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        self.repository
            .create_product(&product)
            .await?
            .ok_or(ProductsServiceError::MissingRequiredData)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        if update.is_empty() {
            return self.get_product(id).await;
        }

        self.repository
            .update_product(id, &update)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductsServiceError> {
        let rows_affected = self.repository.delete_product(id).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, newest first.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieves up to six products flagged popular, newest first.
    async fn popular_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieves the products in a category, newest first.
    async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates the set fields of a product.
    async fn update_product(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::client;

    use super::*;

    fn url_of(query: &crate::remote::Query) -> Result<String, crate::remote::RemoteError> {
        Ok(client()?.rest_url("products", query)?.to_string())
    }

    #[test]
    fn popular_products_are_limited_to_six() -> TestResult {
        assert_eq!(
            url_of(&RemoteProductsRepository::popular_query())?,
            "https://store.example.com/rest/v1/products?select=*&popular=eq.true&order=created_at.desc&limit=6"
        );

        Ok(())
    }

    #[test]
    fn category_listing_filters_on_the_wire_name() -> TestResult {
        assert_eq!(
            url_of(&RemoteProductsRepository::category_query(ProductCategory::RobuxLogin))?,
            "https://store.example.com/rest/v1/products?select=*&category=eq.robux-login&order=created_at.desc"
        );

        Ok(())
    }
}
