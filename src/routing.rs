//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::get,
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::{get_dashboard_content, get_dashboard_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{create_transaction_endpoint, get_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::DASHBOARD_CONTENT, get(get_dashboard_content))
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
