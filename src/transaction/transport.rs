//! A stand-in for an HTTP client that serves the `/transactions` resource from memory.
//!
//! Every call waits for the configured latency before touching the store to
//! emulate a network round trip. Request and response bodies are converted to
//! and from JSON values so that callers only ever see owned, decoded data.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    Error,
    transaction::{core::NewTransaction, store::TransactionStore},
};

/// The path of the only resource the transport serves.
pub const TRANSACTIONS_RESOURCE: &str = "/transactions";

/// The latency added to every call unless configured otherwise.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(200);

/// The body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// The decoded response body.
    pub data: T,
}

/// Serves `GET` and `POST` for [TRANSACTIONS_RESOURCE] from a [TransactionStore].
///
/// Clones share the store and the offline switch.
#[derive(Debug, Clone)]
pub struct MockTransport {
    store: Arc<TransactionStore>,
    latency: Duration,
    offline: Arc<AtomicBool>,
}

impl MockTransport {
    /// Create a transport over `store` that waits `latency` on every call.
    pub fn new(store: Arc<TransactionStore>, latency: Duration) -> Self {
        Self {
            store,
            latency,
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every call fail with [Error::NetworkError] until switched back online.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    /// Fetch the resource at `path`.
    ///
    /// # Errors
    /// Returns [Error::NetworkError] while offline, [Error::UnimplementedRoute]
    /// for any path other than [TRANSACTIONS_RESOURCE], or
    /// [Error::JSONSerializationError] if the response cannot be decoded as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, Error> {
        self.store.ensure_loaded().await;
        self.delay().await?;

        let body = match path {
            TRANSACTIONS_RESOURCE => serde_json::to_value(self.store.all()?)?,
            _ => {
                return Err(Error::UnimplementedRoute {
                    method: "GET",
                    path: path.to_owned(),
                });
            }
        };

        tracing::debug!("GET {path}");
        decode(body)
    }

    /// Send `payload` to the resource at `path`.
    ///
    /// # Errors
    /// Returns [Error::NetworkError] while offline, [Error::UnimplementedRoute]
    /// for any path other than [TRANSACTIONS_RESOURCE], or
    /// [Error::JSONSerializationError] if the payload is not a new transaction
    /// or the response cannot be decoded as `T`.
    pub async fn post<B, T>(&self, path: &str, payload: &B) -> Result<ApiResponse<T>, Error>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.store.ensure_loaded().await;
        self.delay().await?;

        let body = match path {
            TRANSACTIONS_RESOURCE => {
                let new_transaction: NewTransaction =
                    serde_json::from_value(serde_json::to_value(payload)?)?;
                let transaction = self.store.insert(new_transaction)?;
                tracing::debug!("POST {path} created transaction {}", transaction.id);
                serde_json::to_value(transaction)?
            }
            _ => {
                return Err(Error::UnimplementedRoute {
                    method: "POST",
                    path: path.to_owned(),
                });
            }
        };

        decode(body)
    }

    async fn delay(&self) -> Result<(), Error> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.offline.load(Ordering::Relaxed) {
            return Err(Error::NetworkError);
        }

        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<ApiResponse<T>, Error> {
    Ok(ApiResponse {
        data: serde_json::from_value(body)?,
    })
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use time::macros::date;

    use crate::{
        Error,
        transaction::{
            NewTransaction, Transaction, TransactionType,
            fixture::FixtureSource,
            store::TransactionStore,
            transport::{DEFAULT_LATENCY, MockTransport, TRANSACTIONS_RESOURCE},
        },
    };

    const FIXTURE: &str = r#"[
        {"id": 1, "description": "Rent", "amount": 1200, "type": "expense", "category": "Utilities", "date": "2025-03-01"},
        {"id": 2, "description": "Salary", "amount": 3000, "type": "income", "category": "Work", "date": "2025-03-15"}
    ]"#;

    fn get_test_transport(latency: Duration) -> MockTransport {
        let store = TransactionStore::new(FixtureSource::Json(FIXTURE.to_owned()));
        MockTransport::new(Arc::new(store), latency)
    }

    fn new_transaction() -> NewTransaction {
        NewTransaction {
            description: "Bus fare".to_owned(),
            amount: 3.2,
            transaction_type: TransactionType::Expense,
            category: "Transport".to_owned(),
            date: date!(2025 - 01 - 01),
        }
    }

    #[tokio::test]
    async fn get_returns_transactions_latest_first() {
        let transport = get_test_transport(Duration::ZERO);

        let response = transport
            .get::<Vec<Transaction>>(TRANSACTIONS_RESOURCE)
            .await
            .unwrap();

        let ids: Vec<_> = response.data.iter().map(|t| t.id).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[tokio::test]
    async fn post_assigns_id_and_prepends() {
        let transport = get_test_transport(Duration::ZERO);

        let created = transport
            .post::<_, Transaction>(TRANSACTIONS_RESOURCE, &new_transaction())
            .await
            .unwrap()
            .data;

        assert_eq!(created.id, 3);
        assert_eq!(created.description, "Bus fare");

        let all = transport
            .get::<Vec<Transaction>>(TRANSACTIONS_RESOURCE)
            .await
            .unwrap()
            .data;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], created);
    }

    #[tokio::test]
    async fn unknown_paths_are_rejected() {
        let transport = get_test_transport(Duration::ZERO);

        let get_result = transport.get::<Vec<Transaction>>("/accounts").await;
        let post_result = transport
            .post::<_, Transaction>("/accounts", &new_transaction())
            .await;

        assert_eq!(
            get_result,
            Err(Error::UnimplementedRoute {
                method: "GET",
                path: "/accounts".to_owned()
            })
        );
        assert_eq!(
            post_result,
            Err(Error::UnimplementedRoute {
                method: "POST",
                path: "/accounts".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn offline_transport_fails_without_writing() {
        let transport = get_test_transport(Duration::ZERO);
        transport.clone().set_offline(true);

        let post_result = transport
            .post::<_, Transaction>(TRANSACTIONS_RESOURCE, &new_transaction())
            .await;
        let get_result = transport.get::<Vec<Transaction>>(TRANSACTIONS_RESOURCE).await;

        assert_eq!(post_result, Err(Error::NetworkError));
        assert_eq!(get_result, Err(Error::NetworkError));

        transport.set_offline(false);
        let all = transport
            .get::<Vec<Transaction>>(TRANSACTIONS_RESOURCE)
            .await
            .unwrap()
            .data;
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn rejects_payload_that_is_not_a_transaction() {
        let transport = get_test_transport(Duration::ZERO);

        let result = transport
            .post::<_, Transaction>(TRANSACTIONS_RESOURCE, &serde_json::json!({"amount": 1}))
            .await;

        assert!(matches!(result, Err(Error::JSONSerializationError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn calls_wait_for_the_configured_latency() {
        let transport = get_test_transport(DEFAULT_LATENCY);
        let start = tokio::time::Instant::now();

        transport
            .get::<Vec<Transaction>>(TRANSACTIONS_RESOURCE)
            .await
            .unwrap();

        assert!(start.elapsed() >= DEFAULT_LATENCY);
    }
}
