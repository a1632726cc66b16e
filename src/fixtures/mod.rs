//! Fixtures
//!
//! Offline product catalog loaded from YAML, used when no hosted store is
//! configured and by tests.

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::products::{Product, ProductCategory, ProductId};

pub mod products;

/// Number of products shown in the popular list.
pub const POPULAR_LIMIT: usize = 6;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Product catalog fixture
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    base_path: PathBuf,

    /// Products sorted by name
    products: Vec<Product>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
        }
    }

    /// Load products from `<base>/products/<name>.yml`.
    ///
    /// Products already loaded with the same id are replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a price is
    /// malformed.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.load_products_yaml(&contents)
    }

    /// Load products from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or a price is malformed.
    pub fn load_products_yaml(&mut self, yaml: &str) -> Result<&mut Self, FixtureError> {
        let fixture: products::ProductsFixture = serde_norway::from_str(yaml)?;

        for (id, product_fixture) in fixture.products {
            let product = product_fixture.into_product(ProductId::new(id))?;

            self.products.retain(|existing| existing.id != product.id);
            self.products.push(product);
        }

        self.products
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        Ok(self)
    }

    /// Every product, sorted by name.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Product by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products in `category`, sorted by name.
    pub fn by_category(&self, category: ProductCategory) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| product.category == category)
    }

    /// Up to [`POPULAR_LIMIT`] products flagged popular.
    pub fn popular(&self) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(|product| product.is_popular())
            .take(POPULAR_LIMIT)
    }
}
