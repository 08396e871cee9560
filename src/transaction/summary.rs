//! Totals shown in the summary cards.

use crate::transaction::core::{Transaction, TransactionType};

/// Income and expense totals for a list of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// The sum of income amounts.
    pub total_income: f64,
    /// The sum of expense amounts.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub balance: f64,
}

impl Summary {
    /// Sum the income and expenses in `transactions`.
    pub fn of(transactions: &[Transaction]) -> Self {
        let (total_income, total_expenses) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expenses), transaction| {
                    match transaction.transaction_type {
                        TransactionType::Income => (income + transaction.amount, expenses),
                        TransactionType::Expense => (income, expenses + transaction.amount),
                    }
                });

        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }
}
