use std::path::Path;

use lapak::{
    products::{Product, ProductCategory, ProductId},
    storage::FileStore,
};
use tempfile::TempDir;

use crate::{catalog::Catalog, config::catalog::CatalogConfig, shop::Shop};

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

pub(crate) fn demo_shop() -> Result<(TempDir, Shop), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    let catalog = Catalog::offline(&CatalogConfig {
        fixture: "demo".to_string(),
        fixtures_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures"),
    })?;

    let shop = Shop::offline(catalog, FileStore::open(dir.path())?);

    Ok((dir, shop))
}
