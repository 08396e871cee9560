//! Defines the JSON endpoint that lists every transaction.
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    transaction::{core::Transaction, query::QueryClient},
};

/// The query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Skip the cache and reload the list from the transaction service.
    #[serde(default)]
    pub refresh: bool,
}

/// A route handler that returns the cached transaction list as JSON.
///
/// The list is in store order: sorted by date when loaded, with created
/// transactions prepended. It includes placeholders for transactions that are
/// still being created.
pub async fn get_transactions_endpoint(
    State(query_client): State<Arc<QueryClient>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    if query.refresh {
        query_client.invalidate()?;
    }

    let transactions = query_client
        .fetch_transactions()
        .await
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(Json(transactions))
}
