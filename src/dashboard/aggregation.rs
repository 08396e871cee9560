//! Groups expenses by category for the expense breakdown chart.

use crate::transaction::{Transaction, TransactionType};

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The sum of the expense amounts in the category.
    pub total: f64,
}

/// Sums the expenses in `transactions` per category, largest total first.
///
/// Income is ignored. Categories with equal totals stay in the order they
/// first appear in `transactions`.
pub(super) fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
    {
        match totals
            .iter_mut()
            .find(|total| total.category == transaction.category)
        {
            Some(total) => total.total += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: transaction.amount,
            }),
        }
    }

    totals.sort_by(|a, b| b.total.total_cmp(&a.total));

    totals
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        dashboard::aggregation::{CategoryTotal, expenses_by_category},
        transaction::{Transaction, TransactionType},
    };

    fn transaction(amount: f64, transaction_type: TransactionType, category: &str) -> Transaction {
        Transaction {
            id: 1,
            description: "test".to_owned(),
            amount,
            transaction_type,
            category: category.to_owned(),
            date: date!(2025 - 01 - 01),
        }
    }

    #[test]
    fn groceries_scenario_has_one_slice() {
        let transactions = [
            transaction(1000.0, TransactionType::Income, "Work"),
            transaction(200.0, TransactionType::Expense, "Groceries"),
            transaction(50.0, TransactionType::Expense, "Groceries"),
        ];

        let got = expenses_by_category(&transactions);

        assert_eq!(
            got,
            [CategoryTotal {
                category: "Groceries".to_owned(),
                total: 250.0
            }]
        );
    }

    #[test]
    fn sorts_descending_and_keeps_first_seen_order_for_ties() {
        let transactions = [
            transaction(10.0, TransactionType::Expense, "Transport"),
            transaction(30.0, TransactionType::Expense, "Utilities"),
            transaction(10.0, TransactionType::Expense, "Other"),
            transaction(5.0, TransactionType::Expense, "Transport"),
        ];

        let categories: Vec<_> = expenses_by_category(&transactions)
            .into_iter()
            .map(|total| total.category)
            .collect();

        assert_eq!(categories, ["Utilities", "Transport", "Other"]);
    }

    #[test]
    fn slice_total_equals_expense_total() {
        let transactions = [
            transaction(12.5, TransactionType::Expense, "Groceries"),
            transaction(99.0, TransactionType::Income, "Groceries"),
            transaction(7.25, TransactionType::Expense, "Transport"),
            transaction(3.0, TransactionType::Expense, "Groceries"),
        ];

        let slice_total: f64 = expenses_by_category(&transactions)
            .iter()
            .map(|total| total.total)
            .sum();

        assert_eq!(slice_total, 12.5 + 7.25 + 3.0);
    }

    #[test]
    fn no_expenses_gives_no_slices() {
        let transactions = [transaction(1000.0, TransactionType::Income, "Work")];

        assert!(expenses_by_category(&transactions).is_empty());
    }
}
