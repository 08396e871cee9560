//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the summary, filters, table and chart.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The dashboard content without the surrounding page, for htmx swaps.
pub const DASHBOARD_CONTENT: &str = "/dashboard/content";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to list and create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
