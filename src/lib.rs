//! Ledgerlite is a personal finance dashboard.
//!
//! It tracks income and expenses seeded from a JSON fixture and served through
//! a simulated transaction API with network latency. The dashboard shows
//! summary totals, a filterable and paged transaction table, and a breakdown
//! of expenses by category.
//!
//! This library provides a web server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod pagination;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use transaction::{
    DEFAULT_LATENCY, ErrorPolicy, FixtureSource, NewTransaction, OptimisticPolicy, SuccessPolicy,
    Transaction, TransactionType,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
