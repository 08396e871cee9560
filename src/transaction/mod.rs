//! Transactions: the records shown on the dashboard and everything between
//! them and the fixture they are seeded from.
//!
//! This module contains:
//! - The `Transaction` model and the form for creating one
//! - The in-memory store, the simulated transport and the service over it
//! - The query cache with optimistic creates
//! - Filtering and summary totals
//! - The JSON and form endpoints for listing and creating transactions

mod core;
mod create_endpoint;
mod filter;
mod fixture;
mod form;
mod list_endpoint;
mod query;
mod service;
mod store;
mod summary;
mod transport;

pub use self::core::{
    DEFAULT_CATEGORIES, NewTransaction, Transaction, TransactionId, TransactionType,
    sort_by_date_descending,
};
pub use create_endpoint::{TRANSACTION_CREATED_EVENT, create_transaction_endpoint};
pub use filter::{
    ALL_CATEGORIES, CategoryFilter, TransactionFilter, TypeFilter, available_categories,
    filter_transactions,
};
pub use fixture::FixtureSource;
pub use form::{TransactionForm, TransactionFormDefaults, add_transaction_form};
pub use list_endpoint::get_transactions_endpoint;
pub use query::{
    ErrorPolicy, OptimisticPolicy, QueryClient, QuerySnapshot, QueryStatus, SuccessPolicy,
};
pub use service::TransactionService;
pub use store::TransactionStore;
pub use summary::Summary;
pub use transport::{DEFAULT_LATENCY, MockTransport, TRANSACTIONS_RESOURCE};
