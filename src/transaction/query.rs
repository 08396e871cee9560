//! Caches the transaction list and applies optimistic updates when creating transactions.
//!
//! The cache holds a single entry under [TRANSACTIONS_QUERY_KEY]. Fetches and
//! mutations each start a new generation of the entry; a fetch that finishes
//! after a newer generation started throws its result away instead of
//! overwriting fresher data.
//!
//! Creating a transaction goes through three steps:
//! 1. [QueryClient::on_mutate] puts a placeholder record at the head of the
//!    cached list and returns a [MutationContext] holding the previous list.
//! 2. The service call runs.
//! 3. The placeholder is reconciled according to the [OptimisticPolicy].

use std::sync::{Mutex, MutexGuard};

use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Error,
    transaction::{
        core::{NewTransaction, Transaction, TransactionId},
        service::TransactionService,
    },
};

/// The key of the cache entry holding every transaction.
pub const TRANSACTIONS_QUERY_KEY: &str = "transactions";

/// The lifecycle of the cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Nothing has been fetched yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The cache holds data.
    Success,
    /// The last fetch failed.
    Error,
}

/// What to do with the placeholder once the store confirms the new transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessPolicy {
    /// Swap the placeholder for the record returned by the store.
    #[default]
    ReplacePlaceholder,
    /// Mark the cache as stale so the next fetch reloads the whole list.
    Invalidate,
    /// Leave the placeholder, and its temporary ID, in the cache.
    KeepPlaceholder,
}

/// What to do with the placeholder when creating the transaction fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Remove the placeholder, restoring the list from before the mutation.
    #[default]
    Rollback,
    /// Leave the placeholder in the cache.
    KeepPlaceholder,
}

/// How optimistic updates are reconciled with the outcome of the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptimisticPolicy {
    /// Applied when the write succeeds.
    pub on_success: SuccessPolicy,
    /// Applied when the write fails.
    pub on_error: ErrorPolicy,
}

/// A copy of the cache entry.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot {
    /// The lifecycle state.
    pub status: QueryStatus,
    /// The cached transactions, if any have been fetched or set.
    pub data: Option<Vec<Transaction>>,
    /// The message of the last fetch error.
    pub error: Option<String>,
}

impl QuerySnapshot {
    /// Whether there is no data to show yet because it has not arrived.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && matches!(self.status, QueryStatus::Idle | QueryStatus::Loading)
    }

    /// Whether the last fetch failed.
    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    /// The cached transactions, or an empty slice.
    pub fn transactions(&self) -> &[Transaction] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// The state captured by [QueryClient::on_mutate].
#[derive(Debug, Clone, PartialEq)]
pub struct MutationContext {
    /// The cached list before the placeholder was added.
    pub previous: Option<Vec<Transaction>>,
    /// The temporary ID given to the placeholder.
    pub placeholder_id: TransactionId,
}

#[derive(Debug)]
struct QueryEntry {
    status: QueryStatus,
    data: Option<Vec<Transaction>>,
    error: Option<String>,
    is_stale: bool,
    generation: u64,
}

impl QueryEntry {
    /// Mark the cached list as stale so that the next fetch reloads it.
    fn invalidate(&mut self) {
        self.is_stale = true;
    }
}

impl Default for QueryEntry {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_stale: true,
            generation: 0,
        }
    }
}

/// The cache in front of the [TransactionService].
#[derive(Debug)]
pub struct QueryClient {
    service: TransactionService,
    policy: OptimisticPolicy,
    entry: Mutex<QueryEntry>,
}

impl QueryClient {
    /// Create an empty cache in front of `service`.
    pub fn new(service: TransactionService, policy: OptimisticPolicy) -> Self {
        Self {
            service,
            policy,
            entry: Mutex::new(QueryEntry::default()),
        }
    }

    /// A copy of the current cache entry.
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if the lock is poisoned.
    pub fn snapshot(&self) -> Result<QuerySnapshot, Error> {
        let entry = self.lock()?;

        Ok(QuerySnapshot {
            status: entry.status,
            data: entry.data.clone(),
            error: entry.error.clone(),
        })
    }

    /// Mark the cached list as stale so that the next fetch reloads it.
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if the lock is poisoned.
    pub fn invalidate(&self) -> Result<(), Error> {
        self.lock()?.invalidate();

        Ok(())
    }

    /// Get every transaction, from the cache if it is fresh, otherwise from the service.
    ///
    /// # Errors
    /// Returns the service error when the fetch fails. The error message is
    /// also kept in the cache entry and the previously cached data is kept.
    pub async fn fetch_transactions(&self) -> Result<Vec<Transaction>, Error> {
        let generation = {
            let mut entry = self.lock()?;

            if let (QueryStatus::Success, false, Some(data)) =
                (entry.status, entry.is_stale, &entry.data)
            {
                return Ok(data.clone());
            }

            entry.generation += 1;
            entry.status = QueryStatus::Loading;
            entry.generation
        };

        let result = self.service.get_transactions().await;

        let mut entry = self.lock()?;

        if entry.generation != generation {
            tracing::debug!(
                "Discarding result of fetch {generation}, the cache is at generation {}",
                entry.generation
            );

            return match (&entry.data, result) {
                (Some(data), _) => Ok(data.clone()),
                (None, result) => result,
            };
        }

        match result {
            Ok(transactions) => {
                entry.status = QueryStatus::Success;
                entry.data = Some(transactions.clone());
                entry.error = None;
                entry.is_stale = false;
                Ok(transactions)
            }
            Err(error) => {
                tracing::error!("Could not fetch {TRANSACTIONS_QUERY_KEY}: {error}");
                entry.status = QueryStatus::Error;
                entry.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Create a transaction, showing it in the cache before the write finishes.
    ///
    /// # Errors
    /// Returns the service error if the write fails, after applying the
    /// configured [ErrorPolicy].
    pub async fn create_transaction(
        &self,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let context = self.on_mutate(&new_transaction)?;

        match self.service.create_transaction(&new_transaction).await {
            Ok(created) => {
                self.on_success(&context, &created)?;
                Ok(created)
            }
            Err(error) => {
                tracing::error!("Error adding transaction: {error}");
                self.on_error(&context)?;
                Err(error)
            }
        }
    }

    /// Cancel in-flight fetches and put a placeholder for `new_transaction`
    /// at the head of the cached list.
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if the lock is poisoned.
    pub fn on_mutate(&self, new_transaction: &NewTransaction) -> Result<MutationContext, Error> {
        let mut entry = self.lock()?;
        entry.generation += 1;

        let placeholder_id = placeholder_id();
        let placeholder = new_transaction.clone().with_id(placeholder_id);
        let previous = entry.data.clone();

        let data = match &previous {
            Some(old) => {
                let mut data = Vec::with_capacity(old.len() + 1);
                data.push(placeholder);
                data.extend(old.iter().cloned());
                data
            }
            None => {
                // The list was never fetched, so the placeholder alone is not the full picture.
                entry.invalidate();
                vec![placeholder]
            }
        };

        entry.data = Some(data);
        entry.status = QueryStatus::Success;

        Ok(MutationContext {
            previous,
            placeholder_id,
        })
    }

    /// Reconcile the placeholder with the `created` record per [SuccessPolicy].
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if the lock is poisoned.
    pub fn on_success(
        &self,
        context: &MutationContext,
        created: &Transaction,
    ) -> Result<(), Error> {
        let mut entry = self.lock()?;

        match self.policy.on_success {
            SuccessPolicy::ReplacePlaceholder => {
                let data = entry.data.get_or_insert_with(Vec::new);

                match data.iter().position(|t| t.id == context.placeholder_id) {
                    Some(index) => data[index] = created.clone(),
                    // A fetch replaced the list while the write was in flight.
                    None if !data.iter().any(|t| t.id == created.id) => {
                        data.insert(0, created.clone())
                    }
                    None => {}
                }
            }
            SuccessPolicy::Invalidate => entry.invalidate(),
            SuccessPolicy::KeepPlaceholder => {}
        }

        Ok(())
    }

    /// Undo the placeholder per [ErrorPolicy].
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if the lock is poisoned.
    pub fn on_error(&self, context: &MutationContext) -> Result<(), Error> {
        if self.policy.on_error == ErrorPolicy::KeepPlaceholder {
            return Ok(());
        }

        let mut entry = self.lock()?;

        if let Some(data) = entry.data.as_mut() {
            data.retain(|t| t.id != context.placeholder_id);
        }

        if context.previous.is_none() && entry.data.as_ref().is_some_and(|data| data.is_empty()) {
            entry.data = None;
            entry.status = QueryStatus::Idle;
        }

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, QueryEntry>, Error> {
        self.entry
            .lock()
            .inspect_err(|error| {
                tracing::error!("could not acquire the query cache lock: {error}")
            })
            .map_err(|_| Error::StateLockError)
    }
}

/// A temporary ID for a placeholder record.
///
/// Combines the current time with random bits to make collisions between
/// placeholders unlikely, and is negative so that it never collides with an
/// ID assigned by the store.
fn placeholder_id() -> TransactionId {
    let millis = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let jitter = (Uuid::new_v4().as_u128() & 0xFFFF) as i64;

    -(millis.saturating_mul(0x1_0000).saturating_add(jitter).max(1))
}
