//! The filter bar above the transaction table.

use maud::{Markup, html};

use crate::{
    dashboard::query::DashboardQuery,
    endpoints,
    html::{CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::{ALL_CATEGORIES, TransactionType, TypeFilter},
};

/// Renders the type and category selects.
///
/// Changing either select reloads the dashboard content from the first page.
/// Without htmx the form falls back to a plain GET of the dashboard.
pub(super) fn filter_bar_view(query: &DashboardQuery, categories: &[String]) -> Markup {
    let type_options = [
        (TypeFilter::All, "All Types"),
        (TypeFilter::Only(TransactionType::Income), "Income"),
        (TypeFilter::Only(TransactionType::Expense), "Expense"),
    ];

    html! {
        form
            id="filter-bar"
            action=(endpoints::DASHBOARD_VIEW)
            method="get"
            hx-get=(endpoints::DASHBOARD_CONTENT)
            hx-trigger="change"
            hx-target="#dashboard-content"
            hx-swap="outerHTML"
            class={(CARD_STYLE) " grid grid-cols-1 md:grid-cols-2 gap-4"}
        {
            div
            {
                label for="type-filter" class=(FORM_LABEL_STYLE) { "Filter by Type" }

                select id="type-filter" name="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (filter, label) in type_options {
                        option
                            value=(filter.as_str())
                            selected[filter == query.transaction_type]
                        {
                            (label)
                        }
                    }
                }
            }

            div
            {
                label for="category-filter" class=(FORM_LABEL_STYLE) { "Filter by Category" }

                select id="category-filter" name="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(ALL_CATEGORIES) selected[query.category.as_str() == ALL_CATEGORIES]
                    {
                        "All Categories"
                    }

                    @for category in categories {
                        option
                            value=(category)
                            selected[query.category.as_str() == category.as_str()]
                        {
                            (category)
                        }
                    }
                }
            }

            noscript
            {
                button type="submit" class="mt-2 underline" { "Apply filters" }
            }
        }
    }
}
