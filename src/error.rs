//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transport shim was asked for a route it does not serve.
    ///
    /// Only the `/transactions` resource exists, any other path or method is
    /// rejected and the error is propagated to the caller.
    #[error("{method} {path} not implemented")]
    UnimplementedRoute {
        /// The HTTP-like method, e.g. "GET".
        method: &'static str,
        /// The requested path.
        path: String,
    },

    /// The transport is offline and the request never reached the store.
    #[error("Network Error")]
    NetworkError,

    /// The fixture file could not be read or parsed.
    ///
    /// The transaction store logs this error and carries on with an empty
    /// list, so it never reaches the user.
    #[error("could not load the transaction fixture: {0}")]
    FixtureLoadError(String),

    /// An error occurred while converting a value to or from JSON.
    #[error("could not convert to or from JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the lock on shared in-memory state.
    #[error("could not acquire the state lock")]
    StateLockError,

    /// A required field of the new transaction form was left empty.
    #[error("Please fill in all fields")]
    MissingFields,

    /// The amount in the new transaction form is not a positive number.
    #[error("\"{0}\" is not a positive number")]
    InvalidAmount(String),

    /// The transaction could not be created.
    ///
    /// Wraps the message of the underlying error so that it can be shown as
    /// an alert while the cause is logged on the server.
    #[error("could not create the transaction: {0}")]
    CreateTransactionError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StateLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::MissingFields => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Please fill in all fields".to_owned(),
                },
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Amount must be a positive number".to_owned(),
                    details: format!("\"{amount}\" is not a number greater than zero."),
                },
            ),
            Error::CreateTransactionError(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Error adding transaction!".to_owned(),
                    details,
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
