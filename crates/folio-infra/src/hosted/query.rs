use std::fmt;

/// Select / filter / order builder for the hosted REST interface.
///
/// ```ignore
/// let query = HostedQuery::new()
///     .select("*")
///     .eq("status", "doing")
///     .newest_first("created_at");
/// // select=*&status=eq.doing&order=created_at.desc
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostedQuery {
    select: Option<String>,
    filters: Vec<(String, String)>,
    /// Column sorted descending.
    order: Option<String>,
}

impl HostedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn newest_first(mut self, column: &str) -> Self {
        self.order = Some(column.to_string());
        self
    }

    /// Query-string pairs in a stable order: select, filters, order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        if let Some(select) = &self.select {
            pairs.push(("select".to_string(), select.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        if let Some(column) = &self.order {
            pairs.push(("order".to_string(), format!("{column}.desc")));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_listing_query() {
        let query = HostedQuery::new().select("*").newest_first("created_at");
        assert_eq!(query.pairs(), vec![pair("select", "*"), pair("order", "created_at.desc")]);
    }

    #[test]
    fn test_filters_keep_insertion_order() {
        let query = HostedQuery::new()
            .eq("status", "doing")
            .eq("priority", "high")
            .select("id,title");
        assert_eq!(
            query.pairs(),
            vec![
                pair("select", "id,title"),
                pair("status", "eq.doing"),
                pair("priority", "eq.high"),
            ]
        );
    }

    #[test]
    fn test_empty_query() {
        assert!(HostedQuery::new().pairs().is_empty());
    }
}
