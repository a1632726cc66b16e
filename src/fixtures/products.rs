//! Product Fixtures

use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Product, ProductCategory, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product id -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "15000 IDR")
    pub price: String,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Category
    pub category: ProductCategory,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Featured on the home page
    #[serde(default)]
    pub popular: Option<bool>,

    /// Delivery estimate
    #[serde(default)]
    pub delivery_time: Option<String>,
}

impl ProductFixture {
    /// Build the product snapshot for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is malformed.
    pub fn into_product(self, id: ProductId) -> Result<Product, FixtureError> {
        let (price, _currency) = parse_price(&self.price)?;

        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            price,
            image: self.image,
            category: self.category,
            stock: self.stock,
            popular: self.popular,
            delivery_time: self.delivery_time,
        })
    }
}

/// Parse price string (e.g., "15000 IDR") into whole units and currency
///
/// Only rupiah prices are accepted; the storefront never sells in fractions
/// of a rupiah.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a whole number, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<(u64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<u64>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "IDR" => iso::IDR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}
