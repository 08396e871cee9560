//! Defines the endpoint for creating a new transaction.
use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HX_TRIGGER;

use crate::{
    AppState, Error,
    alert::Alert,
    timezone::get_local_date,
    transaction::{form::TransactionForm, query::QueryClient},
};

/// The htmx event sent to the page once a transaction has been created.
pub const TRANSACTION_CREATED_EVENT: &str = "transaction-created";

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The cached transaction list that the new transaction is added to.
    pub query_client: Arc<QueryClient>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            query_client: state.query_client.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new transaction.
///
/// On success responds with a success alert and triggers
/// [TRANSACTION_CREATED_EVENT] so that the page reloads its transactions.
/// Invalid forms are rejected with an alert before anything is sent to the
/// transaction service. A date left blank defaults to today in the local timezone.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let today = match get_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let new_transaction = match form.validate(today) {
        Ok(new_transaction) => new_transaction,
        Err(error) => {
            tracing::debug!("rejected new transaction form: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.query_client.create_transaction(new_transaction).await {
        tracing::error!("could not create transaction: {error}");

        return Error::CreateTransactionError(error.to_string()).into_alert_response();
    }

    (
        StatusCode::CREATED,
        [(HX_TRIGGER, TRANSACTION_CREATED_EVENT)],
        Alert::SuccessSimple {
            message: "Transaction added successfully!".to_owned(),
        },
    )
        .into_response()
}
