//! Products

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::pricing::{Price, PricingError, rupiah};

/// Product identifier as issued by the hosted store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wraps a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Product category, as stored in the `products.category` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    /// Robux delivered by logging into the buyer's account.
    RobuxLogin,

    /// Robux delivered through a gamepass purchase.
    RobuxGamepass,

    /// In-game items.
    Items,

    /// Game passes.
    Passes,

    /// Boosting ("joki") service, played on the buyer's account.
    Joki,

    /// Any category this build does not know about.
    #[serde(other)]
    Unknown,
}

impl ProductCategory {
    /// Every known category, in display order.
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::RobuxLogin,
        ProductCategory::RobuxGamepass,
        ProductCategory::Items,
        ProductCategory::Passes,
        ProductCategory::Joki,
    ];

    /// The wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::RobuxLogin => "robux-login",
            ProductCategory::RobuxGamepass => "robux-gamepass",
            ProductCategory::Items => "items",
            ProductCategory::Passes => "passes",
            ProductCategory::Joki => "joki",
            ProductCategory::Unknown => "unknown",
        }
    }

    /// Parses a wire name, returning `None` for unrecognised names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
    }
}

impl Display for ProductCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product snapshot, as fetched from the store and embedded in cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Unit price in whole rupiah
    pub price: u64,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Category
    pub category: ProductCategory,

    /// Units available
    #[serde(default)]
    pub stock: u32,

    /// Featured on the home page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,

    /// Human readable delivery estimate, e.g. "5-10 menit"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
}

impl Product {
    /// Unit price as money.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the price does not fit in minor units.
    pub fn unit_price(&self) -> Result<Price, PricingError> {
        rupiah(self.price)
    }

    /// Whether the product is flagged as popular.
    pub fn is_popular(&self) -> bool {
        self.popular.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn category_round_trips_wire_names() -> TestResult {
        for category in ProductCategory::ALL {
            let json = serde_json::to_string(&category)?;

            assert_eq!(json, format!("\"{}\"", category.as_str()));
            assert_eq!(ProductCategory::parse(category.as_str()), Some(category));
        }

        Ok(())
    }

    #[test]
    fn unknown_category_deserializes_to_unknown() -> TestResult {
        let category: ProductCategory = serde_json::from_str("\"limited-bundle\"")?;

        assert_eq!(category, ProductCategory::Unknown);
        assert_eq!(ProductCategory::parse("limited-bundle"), None);

        Ok(())
    }

    #[test]
    fn product_ignores_store_timestamps() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "p-1",
                "name": "80 Robux",
                "price": 15000,
                "category": "robux-gamepass",
                "stock": 12,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            }"#,
        )?;

        assert_eq!(product.id, ProductId::new("p-1"));
        assert_eq!(product.description, "");
        assert_eq!(product.delivery_time, None);
        assert!(!product.is_popular());

        Ok(())
    }
}
