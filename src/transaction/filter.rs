//! Narrows the transaction list down to what the user selected in the filter bar.

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, de};

use crate::transaction::core::{DEFAULT_CATEGORIES, Transaction, TransactionType};

/// The value of the category filter that matches every category.
pub const ALL_CATEGORIES: &str = "all";

/// Which transaction types to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Show income and expenses.
    #[default]
    All,
    /// Show only transactions of this type.
    Only(TransactionType),
}

impl TypeFilter {
    /// The value used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Only(transaction_type) => transaction_type.as_str(),
        }
    }

    fn matches(self, transaction: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(transaction_type) => transaction.transaction_type == transaction_type,
        }
    }
}

impl Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(TypeFilter::All),
            other => other.parse().map(TypeFilter::Only),
        }
    }
}

impl<'de> Deserialize<'de> for TypeFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// Which category to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every category.
    #[default]
    All,
    /// Show only transactions whose category is exactly this string.
    Only(String),
}

impl CategoryFilter {
    /// The value used in query strings.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }

    fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => transaction.category == *category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        match value {
            "" | ALL_CATEGORIES => CategoryFilter::All,
            category => CategoryFilter::Only(category.to_owned()),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(CategoryFilter::from(value.as_str()))
    }
}

/// The selections in the filter bar. Both conditions must hold for a transaction to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionFilter {
    /// The selected type.
    pub transaction_type: TypeFilter,
    /// The selected category.
    pub category: CategoryFilter,
}

impl TransactionFilter {
    /// Whether `transaction` passes both conditions.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.transaction_type.matches(transaction) && self.category.matches(transaction)
    }
}

/// The transactions that pass `filter`, in their original order.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect()
}

/// The categories to offer in the filter bar and the new transaction form.
///
/// These are the distinct categories of `transactions` in alphabetical order,
/// or [DEFAULT_CATEGORIES] when there are no transactions.
pub fn available_categories(transactions: &[Transaction]) -> Vec<String> {
    if transactions.is_empty() {
        return DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
    }

    transactions
        .iter()
        .map(|transaction| transaction.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
