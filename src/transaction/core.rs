//! Defines the core data models for transactions.

use std::{cmp::Reverse, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

/// The identifier of a [Transaction].
///
/// IDs assigned by the transaction store are positive. Placeholder records
/// inserted by an optimistic update use negative IDs until they are
/// reconciled with the stored record.
pub type TransactionId = i64;

/// The categories offered in the UI when there are no transactions to take
/// categories from.
pub const DEFAULT_CATEGORIES: [&str; 5] =
    ["Groceries", "Transport", "Entertainment", "Utilities", "Other"];

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was earned.
    Income,
    /// Money was spent.
    Expense,
}

impl TransactionType {
    /// The lowercase name used in forms, query strings and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The capitalised name displayed to the user.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("\"{other}\" is not a transaction type")),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// Whether the amount was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free text category, e.g. "Groceries".
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

impl Transaction {
    /// Whether this record is an optimistic placeholder that has not been
    /// confirmed by the transaction store.
    pub fn is_placeholder(&self) -> bool {
        self.id < 0
    }

    /// The amount with its sign applied: positive for income, negative for
    /// expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The data needed to create a [Transaction], everything except the ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// Whether the amount was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free text category, e.g. "Groceries".
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

impl NewTransaction {
    /// Attach `id` to create a full [Transaction].
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category,
            date: self.date,
        }
    }
}

/// Sort `transactions` so that the latest date comes first.
///
/// The sort is stable, transactions on the same date keep their relative order.
pub fn sort_by_date_descending(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|transaction| Reverse(transaction.date));
}
