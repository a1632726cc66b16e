//! Products Data

use lapak::products::ProductCategory;
use serde::Serialize;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image: String,
    pub category: ProductCategory,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
}

/// Product Update Data
///
/// Only the fields that are set are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
}

impl ProductUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn updates_serialize_only_set_fields() -> TestResult {
        let update = ProductUpdate {
            price: Some(20_000),
            stock: Some(4),
            ..ProductUpdate::default()
        };

        assert_eq!(serde_json::to_string(&update)?, r#"{"price":20000,"stock":4}"#);
        assert!(!update.is_empty());
        assert!(ProductUpdate::default().is_empty());

        Ok(())
    }
}
