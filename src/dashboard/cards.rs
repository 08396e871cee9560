//! The summary cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{
    html::{CARD_STYLE, format_currency},
    transaction::Summary,
};

/// Shown in place of an amount while the transactions are loading.
const LOADING_TEXT: &str = "Loading...";

/// Renders the total income, total expenses and balance cards.
///
/// Pass `None` while the transactions are still loading.
pub(super) fn summary_cards_view(summary: Option<&Summary>) -> Markup {
    let amount = |select: fn(&Summary) -> f64| {
        summary
            .map(|summary| format_currency(select(summary)))
            .unwrap_or_else(|| LOADING_TEXT.to_owned())
    };

    let balance_style = match summary {
        Some(summary) if summary.balance < 0.0 => "text-red-600",
        _ => "text-blue-600",
    };

    html! {
        section id="summary-cards" class="grid grid-cols-1 md:grid-cols-3 gap-6"
        {
            (summary_card("total-income", "Total Income", &amount(|s| s.total_income), "text-green-600"))
            (summary_card("total-expenses", "Total Expenses", &amount(|s| s.total_expenses), "text-red-600"))
            (summary_card("balance", "Current Balance", &amount(|s| s.balance), balance_style))
        }
    }
}

fn summary_card(id: &str, title: &str, amount: &str, amount_style: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            p class="text-sm font-medium text-gray-500 dark:text-gray-400 mb-1" { (title) }
            p data-amount class={"text-3xl md:text-4xl font-bold " (amount_style)} { (amount) }
        }
    }
}
