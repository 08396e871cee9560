//! Typed access to the `/transactions` resource.

use crate::{
    Error,
    transaction::{
        core::{NewTransaction, Transaction},
        transport::{MockTransport, TRANSACTIONS_RESOURCE},
    },
};

/// Translates domain calls into transport calls. Adds no validation.
#[derive(Debug, Clone)]
pub struct TransactionService {
    transport: MockTransport,
}

impl TransactionService {
    /// Create a service that talks to `transport`.
    pub fn new(transport: MockTransport) -> Self {
        Self { transport }
    }

    /// Get every transaction.
    pub async fn get_transactions(&self) -> Result<Vec<Transaction>, Error> {
        let response = self.transport.get(TRANSACTIONS_RESOURCE).await?;

        Ok(response.data)
    }

    /// Create a transaction, returning it with the ID assigned by the store.
    pub async fn create_transaction(
        &self,
        new_transaction: &NewTransaction,
    ) -> Result<Transaction, Error> {
        let response = self
            .transport
            .post(TRANSACTIONS_RESOURCE, new_transaction)
            .await?;

        Ok(response.data)
    }
}
