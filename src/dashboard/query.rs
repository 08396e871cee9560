//! The dashboard's query string: the filter bar selections and the table page.

use serde::Deserialize;

use crate::transaction::{CategoryFilter, TransactionFilter, TypeFilter};

/// The query parameters of the dashboard, e.g. `?type=expense&category=Groceries&page=2`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardQuery {
    /// The selected transaction type, all types by default.
    #[serde(default, rename = "type")]
    pub transaction_type: TypeFilter,
    /// The selected category, all categories by default.
    #[serde(default)]
    pub category: CategoryFilter,
    /// The 1-based page of the transaction table.
    pub page: Option<u64>,
}

impl DashboardQuery {
    /// The filter described by the query.
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            transaction_type: self.transaction_type,
            category: self.category.clone(),
        }
    }

    /// The query string for the same filters on `page`.
    pub fn to_query_string(&self, page: u64) -> String {
        let page = page.to_string();
        let pairs = [
            ("type", self.transaction_type.as_str()),
            ("category", self.category.as_str()),
            ("page", page.as_str()),
        ];

        serde_urlencoded::to_string(pairs).unwrap_or_else(|error| {
            tracing::error!("could not encode the dashboard query: {error}");
            format!("page={page}")
        })
    }

    /// `route` with the query string for the same filters on `page`.
    pub fn to_url(&self, route: &str, page: u64) -> String {
        format!("{route}?{}", self.to_query_string(page))
    }
}
