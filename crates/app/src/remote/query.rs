//! Table query parameters in PostgREST syntax.

use std::fmt::Display;

/// Row selection for a table request.
///
/// ```text
/// Query::new().select("*, product:products(*)").eq("user_id", id).order_desc("created_at").limit(6)
///   => select=*,product:products(*)&user_id=eq.<id>&order=created_at.desc&limit=6
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl Query {
    /// Every column of every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns and embedded relations to return.
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        let columns: String = columns.chars().filter(|c| !c.is_whitespace()).collect();
        self.select = Some(columns);
        self
    }

    /// Keep rows where `column` equals `value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Newest-first ordering on `column`.
    #[must_use]
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(format!("{column}.desc"));
        self
    }

    /// At most `limit` rows.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs, in a stable order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 3);

        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.clone()));
        }

        pairs.extend(self.filters.iter().cloned());

        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.clone()));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
    }
}
