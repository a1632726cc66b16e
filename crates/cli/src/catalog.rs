//! Product Catalog
//!
//! Products come from the hosted store when one is configured, otherwise from
//! a local YAML fixture.

use std::sync::Arc;

use lapak::{
    fixtures::Fixture,
    products::{Product, ProductCategory, ProductId},
};
use lapak_app::domain::products::{ProductsService, ProductsServiceError};
use tracing::debug;

use crate::{config::catalog::CatalogConfig, errors::CliError};

pub(crate) enum Catalog {
    Remote(Arc<dyn ProductsService>),
    Fixture(Fixture),
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Catalog::Remote(_) => f.write_str("Catalog::Remote"),
            Catalog::Fixture(fixture) => f.debug_tuple("Catalog::Fixture").field(fixture).finish(),
        }
    }
}

impl Catalog {
    /// Offline catalog loaded from the configured fixture.
    pub(crate) fn offline(config: &CatalogConfig) -> Result<Self, CliError> {
        let mut fixture = Fixture::with_base_path(config.fixtures_dir.clone());
        fixture.load_products(&config.fixture)?;

        debug!(
            fixture = config.fixture,
            products = fixture.products().len(),
            "offline catalog loaded"
        );

        Ok(Catalog::Fixture(fixture))
    }

    pub(crate) async fn list(&self) -> Result<Vec<Product>, CliError> {
        match self {
            Catalog::Remote(products) => Ok(products.list_products().await?),
            Catalog::Fixture(fixture) => Ok(fixture.products().to_vec()),
        }
    }

    pub(crate) async fn popular(&self) -> Result<Vec<Product>, CliError> {
        match self {
            Catalog::Remote(products) => Ok(products.popular_products().await?),
            Catalog::Fixture(fixture) => Ok(fixture.popular().cloned().collect()),
        }
    }

    pub(crate) async fn by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, CliError> {
        match self {
            Catalog::Remote(products) => Ok(products.products_by_category(category).await?),
            Catalog::Fixture(fixture) => Ok(fixture.by_category(category).cloned().collect()),
        }
    }

    pub(crate) async fn get(&self, id: &ProductId) -> Result<Product, CliError> {
        match self {
            Catalog::Remote(products) => match products.get_product(id).await {
                Err(ProductsServiceError::NotFound) => Err(CliError::UnknownProduct(id.clone())),
                result => Ok(result?),
            },
            Catalog::Fixture(fixture) => fixture
                .product(id)
                .cloned()
                .ok_or_else(|| CliError::UnknownProduct(id.clone())),
        }
    }
}
