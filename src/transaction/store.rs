//! The in-memory list of transactions behind the simulated `/transactions` resource.
//!
//! The store is seeded lazily from a [FixtureSource] the first time it is
//! used. All callers that arrive before the seed has finished loading wait for
//! the same load, the fixture is never read twice.

use std::{collections::HashSet, sync::Mutex};

use tokio::sync::OnceCell;

use crate::{
    Error,
    transaction::{
        core::{NewTransaction, Transaction, TransactionId, sort_by_date_descending},
        fixture::{FixtureRecord, FixtureSource},
    },
};

#[derive(Debug, Default)]
struct TransactionTable {
    /// Latest date first after the initial load, new records are prepended.
    rows: Vec<Transaction>,
    /// The ID to give to the next record without one.
    next_id: TransactionId,
}

impl TransactionTable {
    fn seeded(records: Vec<FixtureRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut next_id = records
            .iter()
            .filter_map(|record| record.id)
            .filter(|id| *id > 0)
            .max()
            .unwrap_or(0)
            + 1;

        let mut rows: Vec<Transaction> = records
            .into_iter()
            .map(|record| {
                let id = match record.id {
                    Some(id) if id > 0 && seen.insert(id) => id,
                    Some(id) => {
                        tracing::warn!(
                            "Fixture ID {id} is not a unique positive integer, assigning ID {next_id}"
                        );
                        next_id += 1;
                        next_id - 1
                    }
                    None => {
                        next_id += 1;
                        next_id - 1
                    }
                };

                record.transaction.with_id(id)
            })
            .collect();

        sort_by_date_descending(&mut rows);

        Self { rows, next_id }
    }
}

/// An explicitly owned, in-memory transaction list.
///
/// Create one per application (or per test) and hand it to the
/// [crate::transaction::MockTransport].
#[derive(Debug)]
pub struct TransactionStore {
    fixture: FixtureSource,
    loaded: OnceCell<()>,
    table: Mutex<TransactionTable>,
}

impl TransactionStore {
    /// Create a store that will be seeded from `fixture` on first use.
    pub fn new(fixture: FixtureSource) -> Self {
        Self {
            fixture,
            loaded: OnceCell::new(),
            table: Mutex::new(TransactionTable {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Load the fixture if it has not been loaded yet.
    ///
    /// A fixture that cannot be loaded is logged and the store stays empty.
    /// Either way the load is only ever attempted once.
    pub async fn ensure_loaded(&self) {
        self.loaded
            .get_or_init(|| async {
                let records = match self.fixture.load().await {
                    Ok(records) => records,
                    Err(error) => {
                        tracing::error!("Failed to load transactions: {error}");
                        return;
                    }
                };

                let count = records.len();

                match self.table.lock() {
                    Ok(mut table) => {
                        *table = TransactionTable::seeded(records);
                        tracing::info!("Loaded {count} transactions from the fixture");
                    }
                    Err(error) => {
                        tracing::error!("could not acquire the transaction store lock: {error}")
                    }
                }
            })
            .await;
    }

    /// A copy of every transaction, in store order.
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if the lock is poisoned.
    pub fn all(&self) -> Result<Vec<Transaction>, Error> {
        let table = self.lock()?;

        Ok(table.rows.clone())
    }

    /// Assign an ID to `new_transaction` and put it at the head of the list.
    ///
    /// The record is not sorted into date order.
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if the lock is poisoned.
    pub fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let mut table = self.lock()?;

        let id = table.next_id;
        table.next_id += 1;

        let transaction = new_transaction.with_id(id);
        table.rows.insert(0, transaction.clone());

        Ok(transaction)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, TransactionTable>, Error> {
        self.table
            .lock()
            .inspect_err(|error| {
                tracing::error!("could not acquire the transaction store lock: {error}")
            })
            .map_err(|_| Error::StateLockError)
    }
}
