//! The paged transaction table and its pagination bar.

use maud::{Markup, html};

use crate::{
    dashboard::query::DashboardQuery,
    endpoints,
    html::{
        CARD_STYLE, EXPENSE_BADGE_STYLE, INCOME_BADGE_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_signed_currency,
    },
    pagination::{Page, PaginationIndicator, create_pagination_indicators},
    transaction::{Transaction, TransactionType},
};

const PAGE_LINK_STYLE: &str = "block px-3 py-2 rounded text-blue-600 hover:underline";
const CURRENT_PAGE_STYLE: &str = "block px-3 py-2 rounded font-bold text-black dark:text-white \
    bg-gray-100 dark:bg-gray-700";
const DISABLED_BUTTON_STYLE: &str = "block px-3 py-2 text-gray-400 dark:text-gray-500";

/// Renders one page of transactions with the pagination bar and the
/// "Showing A - B of N transactions" summary.
///
/// `query` carries the active filters into the pagination links.
pub(super) fn transaction_table_view(
    page: &Page<'_, Transaction>,
    query: &DashboardQuery,
    max_pages: u64,
) -> Markup {
    html! {
        section id="transaction-table" class="space-y-4"
        {
            div class={(CARD_STYLE) " overflow-x-auto p-0"}
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        }
                    }

                    tbody
                    {
                        @for transaction in page.items {
                            (transaction_row_view(transaction))
                        }

                        @if page.items.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="5" class="p-12 text-center" { "No transactions found" }
                            }
                        }
                    }
                }
            }

            @if page.page_count > 1 {
                (pagination_view(page.page, page.page_count, max_pages, query))
            }

            p id="table-info" class="text-center text-sm text-gray-500 dark:text-gray-400"
            {
                (page.info_text("transactions"))
            }
        }
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let is_income = transaction.transaction_type == TransactionType::Income;
    let amount_style = if is_income {
        "font-semibold text-green-600 dark:text-green-400"
    } else {
        "font-semibold text-red-600 dark:text-red-400"
    };
    let badge_style = if is_income {
        INCOME_BADGE_STYLE
    } else {
        EXPENSE_BADGE_STYLE
    };
    // Placeholders are shown faded until the store confirms them.
    let row_style = if transaction.is_placeholder() {
        format!("{TABLE_ROW_STYLE} opacity-60")
    } else {
        TABLE_ROW_STYLE.to_owned()
    };

    html! {
        tr class=(row_style) data-transaction-id=(transaction.id)
        {
            th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (transaction.description)
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(amount_style) { (format_signed_currency(transaction.signed_amount())) }
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(badge_style) { (transaction.transaction_type.label()) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(transaction.date) { (transaction.date) }
            }
        }
    }
}

fn pagination_view(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
    query: &DashboardQuery,
) -> Markup {
    let indicators = create_pagination_indicators(curr_page, page_count, max_pages);

    html! {
        nav class="pagination flex justify-center" aria-label="Transaction pages"
        {
            ul class="flex items-center gap-1"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::Page(page) => {
                                (page_link(query, page, &page.to_string(), PAGE_LINK_STYLE))
                            }
                            PaginationIndicator::CurrPage(page) => {
                                span aria-current="page" class=(CURRENT_PAGE_STYLE) { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="block px-3 py-2" { "..." }
                            }
                            PaginationIndicator::BackButton(Some(page)) => {
                                (page_link(query, page, "Previous", PAGE_LINK_STYLE))
                            }
                            PaginationIndicator::BackButton(None) => {
                                span aria-disabled="true" class=(DISABLED_BUTTON_STYLE) { "Previous" }
                            }
                            PaginationIndicator::NextButton(Some(page)) => {
                                (page_link(query, page, "Next", PAGE_LINK_STYLE))
                            }
                            PaginationIndicator::NextButton(None) => {
                                span aria-disabled="true" class=(DISABLED_BUTTON_STYLE) { "Next" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn page_link(query: &DashboardQuery, page: u64, text: &str, style: &str) -> Markup {
    let page_url = query.to_url(endpoints::DASHBOARD_VIEW, page);
    let content_url = query.to_url(endpoints::DASHBOARD_CONTENT, page);

    html! {
        a
            href=(page_url)
            hx-get=(content_url)
            hx-target="#dashboard-content"
            hx-swap="outerHTML"
            hx-push-url=(page_url)
            class=(style)
        {
            (text)
        }
    }
}
