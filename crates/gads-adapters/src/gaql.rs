//! GAQL query assembly for the canned listing tools.
//!
//! The builder only concatenates clauses. It never parses, quotes, or
//! validates query text; the API is the authority on GAQL syntax and
//! rejects anything malformed.

use std::fmt::Write;

/// Incrementally assembled `SELECT ... FROM ...` query.
#[derive(Debug, Clone)]
pub struct GaqlQuery {
    fields: Vec<String>,
    resource: String,
    conditions: Vec<String>,
    order_by: Option<String>,
    limit: Option<i64>,
}

impl GaqlQuery {
    pub fn select(fields: &[&str], resource: &str) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            resource: resource.to_string(),
            conditions: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// Add a `WHERE` condition; multiple conditions are joined with `AND`.
    pub fn and_where(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Add a condition only when `apply` is true.
    pub fn and_where_if(self, apply: bool, condition: impl Into<String>) -> Self {
        if apply { self.and_where(condition) } else { self }
    }

    pub fn order_by(mut self, field: &str) -> Self {
        self.order_by = Some(field.to_string());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(self) -> String {
        let mut query = format!("SELECT {} FROM {}", self.fields.join(", "), self.resource);
        if !self.conditions.is_empty() {
            let _ = write!(query, " WHERE {}", self.conditions.join(" AND "));
        }
        if let Some(order) = &self.order_by {
            let _ = write!(query, " ORDER BY {order}");
        }
        if let Some(limit) = self.limit {
            let _ = write!(query, " LIMIT {limit}");
        }
        query
    }
}

/// Append ` LIMIT {n}` to a caller-supplied query.
///
/// This is the only rewriting the pass-through search tools ever do; the
/// query text itself goes to the API verbatim.
pub fn append_limit(query: &str, limit: Option<i64>) -> String {
    match limit {
        Some(n) => format!("{} LIMIT {n}", query.trim_end()),
        None => query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_select() {
        let q = GaqlQuery::select(&["campaign.id", "campaign.name"], "campaign").build();
        assert_eq!(q, "SELECT campaign.id, campaign.name FROM campaign");
    }

    #[test]
    fn full_clause_order() {
        let q = GaqlQuery::select(&["ad_group.id"], "ad_group")
            .and_where("campaign.id = 17")
            .and_where("ad_group.status != 'REMOVED'")
            .order_by("ad_group.id")
            .limit(50)
            .build();
        assert_eq!(
            q,
            "SELECT ad_group.id FROM ad_group \
             WHERE campaign.id = 17 AND ad_group.status != 'REMOVED' \
             ORDER BY ad_group.id LIMIT 50"
        );
    }

    #[test]
    fn conditional_where_is_skipped_when_false() {
        let q = GaqlQuery::select(&["campaign.id"], "campaign")
            .and_where_if(false, "campaign.status != 'REMOVED'")
            .limit(10)
            .build();
        assert_eq!(q, "SELECT campaign.id FROM campaign LIMIT 10");
    }

    #[test]
    fn append_limit_leaves_query_untouched_without_limit() {
        assert_eq!(append_limit("SELECT x FROM y", None), "SELECT x FROM y");
        assert_eq!(append_limit("SELECT x FROM y ", Some(5)), "SELECT x FROM y LIMIT 5");
    }
}
