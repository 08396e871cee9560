//! Implements a struct that holds the state of the REST server.

use std::{sync::Arc, time::Duration};

use axum::extract::FromRef;

use crate::{
    Error,
    pagination::PaginationConfig,
    timezone::get_local_offset,
    transaction::{
        FixtureSource, MockTransport, OptimisticPolicy, QueryClient, TransactionService,
        TransactionStore,
    },
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The cached transaction list and the service behind it.
    pub query_client: Arc<QueryClient>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] whose transactions are seeded from `fixture`.
    ///
    /// Every call to the simulated transaction resource waits for `latency`.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a canonical timezone name.
    pub fn new(
        fixture: FixtureSource,
        latency: Duration,
        optimistic_policy: OptimisticPolicy,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        let store = Arc::new(TransactionStore::new(fixture));
        let service = TransactionService::new(MockTransport::new(store, latency));

        Ok(Self {
            query_client: Arc::new(QueryClient::new(service, optimistic_policy)),
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        })
    }
}

impl FromRef<AppState> for Arc<QueryClient> {
    fn from_ref(state: &AppState) -> Self {
        state.query_client.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        AppState, Error,
        pagination::PaginationConfig,
        transaction::{FixtureSource, OptimisticPolicy},
    };

    #[test]
    fn rejects_invalid_timezone() {
        let result = AppState::new(
            FixtureSource::Json("[]".to_owned()),
            Duration::ZERO,
            OptimisticPolicy::default(),
            "Not/A_Timezone",
            PaginationConfig::default(),
        );

        assert_eq!(
            result.map(|_| ()),
            Err(Error::InvalidTimezoneError("Not/A_Timezone".to_owned()))
        );
    }
}
