//! Dashboard HTTP handlers and page layout.
//!
//! The dashboard page is served in two steps when the transaction list has not
//! been fetched yet: the page shell with loading placeholders, then the
//! `#dashboard-content` fragment requested by htmx as soon as the shell loads.
//! Filter and pagination changes request the same fragment.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        cards::summary_cards_view, charts::expense_breakdown_view, filters::filter_bar_view,
        query::DashboardQuery, tables::transaction_table_view,
    },
    endpoints,
    html::{
        CARD_STYLE, ECHARTS_SCRIPT_URL, HeadElement, PAGE_CONTAINER_STYLE, base,
        dollar_input_styles, loading_spinner,
    },
    pagination::{PaginationConfig, paginate},
    timezone::get_local_date,
    transaction::{
        QueryClient, Summary, TRANSACTION_CREATED_EVENT, Transaction, TransactionFormDefaults,
        TransactionType, add_transaction_form, available_categories, filter_transactions,
        sort_by_date_descending,
    },
};

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The cached transaction list.
    pub query_client: Arc<QueryClient>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            query_client: state.query_client.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Display the dashboard: summary cards, the filtered transaction table, the
/// expense breakdown and the form for adding transactions.
///
/// While the transaction list is loading for the first time, the page is sent
/// with placeholders and fetches its content once loaded.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;
    let snapshot = state.query_client.snapshot()?;

    if snapshot.is_loading() {
        let categories = available_categories(snapshot.transactions());
        let content = dashboard_loading_view(&query);

        return Ok(dashboard_view(&content, &categories, today).into_response());
    }

    match state.query_client.fetch_transactions().await {
        Ok(transactions) => {
            let categories = available_categories(&transactions);
            let content =
                dashboard_content_view(&transactions, &query, &state.pagination_config);

            Ok(dashboard_view(&content, &categories, today).into_response())
        }
        Err(error) => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            dashboard_view(
                &dashboard_error_view(&error),
                &available_categories(&[]),
                today,
            ),
        )
            .into_response()),
    }
}

/// Render the `#dashboard-content` fragment for htmx requests.
///
/// A failed fetch is rendered as an error message in place of the content,
/// with a success status so that htmx swaps it in.
pub async fn get_dashboard_content(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    match state.query_client.fetch_transactions().await {
        Ok(transactions) => {
            dashboard_content_view(&transactions, &query, &state.pagination_config)
                .into_response()
        }
        Err(error) => dashboard_error_view(&error).into_response(),
    }
}

/// Renders the page around `content`.
fn dashboard_view(content: &Markup, categories: &[String], today: time::Date) -> Markup {
    let form_defaults = TransactionFormDefaults {
        transaction_type: TransactionType::Expense,
        category: None,
        date: today,
    };

    let page = html! {
        main class={(PAGE_CONTAINER_STYLE) " space-y-6"}
        {
            header
            {
                h1 class="text-3xl font-bold" { "Dashboard" }
                p class="text-gray-500 dark:text-gray-400 mt-1"
                {
                    "Track your transactions in realtime."
                }
            }

            details id="add-transaction" class=(CARD_STYLE)
            {
                summary class="cursor-pointer font-semibold text-blue-600 dark:text-blue-400"
                {
                    "Add Transaction"
                }

                div class="mt-4"
                {
                    (add_transaction_form(&form_defaults, categories))
                }
            }

            (content)
        }
    };

    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        dollar_input_styles(),
    ];

    base("Dashboard", &head_elements, &page)
}

/// The dashboard content for `transactions` with the filters and page in `query`.
///
/// The summary cards and expense breakdown cover every transaction that
/// passes the filters, not just the current page.
fn dashboard_content_view(
    transactions: &[Transaction],
    query: &DashboardQuery,
    pagination_config: &PaginationConfig,
) -> Markup {
    let categories = available_categories(transactions);

    let mut filtered = filter_transactions(transactions, &query.filter());
    sort_by_date_descending(&mut filtered);

    let summary = Summary::of(&filtered);
    let page = paginate(
        &filtered,
        query.page.unwrap_or(pagination_config.default_page),
        pagination_config.page_size,
    );

    let content_url = query.to_url(endpoints::DASHBOARD_CONTENT, page.page);
    let reload_trigger = format!("{TRANSACTION_CREATED_EVENT} from:body");

    html! {
        div
            id="dashboard-content"
            class="space-y-6"
            hx-get=(content_url)
            hx-trigger=(reload_trigger)
            hx-swap="outerHTML"
        {
            (filter_bar_view(query, &categories))
            (summary_cards_view(Some(&summary)))

            div class="grid grid-cols-1 xl:grid-cols-3 gap-6"
            {
                div class="xl:col-span-2"
                {
                    (transaction_table_view(&page, query, pagination_config.max_pages))
                }

                (expense_breakdown_view(&filtered))
            }
        }
    }
}

/// Placeholder content that replaces itself with the real content once the page loads.
fn dashboard_loading_view(query: &DashboardQuery) -> Markup {
    let content_url = query.to_url(
        endpoints::DASHBOARD_CONTENT,
        query.page.unwrap_or(1),
    );
    let load_trigger = format!("load, {TRANSACTION_CREATED_EVENT} from:body");

    html! {
        div
            id="dashboard-content"
            class="space-y-6"
            hx-get=(content_url)
            hx-trigger=(load_trigger)
            hx-swap="outerHTML"
        {
            (summary_cards_view(None))

            div class={(CARD_STYLE) " text-center text-gray-500 dark:text-gray-400"}
            {
                (loading_spinner())
                "Loading transactions..."
            }
        }
    }
}

fn dashboard_error_view(error: &Error) -> Markup {
    html! {
        div id="dashboard-content" class="space-y-6"
        {
            div
                role="alert"
                class={(CARD_STYLE) " text-center border-red-300 dark:border-red-800"}
            {
                h2 class="text-xl font-bold text-red-600 dark:text-red-400"
                {
                    "Error Loading Transactions"
                }
                p class="mt-2 text-gray-700 dark:text-gray-300" { (error) }
            }
        }
    }
}
