//! The dashboard page: summary totals, a filterable and paged transaction
//! table, and a breakdown of expenses by category.

mod aggregation;
mod cards;
mod charts;
mod filters;
mod handlers;
mod query;
mod tables;

pub use handlers::{DashboardState, get_dashboard_content, get_dashboard_page};
pub use query::DashboardQuery;
