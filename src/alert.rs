//! Alert system for displaying success and error messages to users.
//!
//! Alerts are small HTML fragments that htmx swaps into the alert container
//! rendered by [crate::html::base]. They play the role of toast notifications.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Something worked.
    SuccessSimple {
        /// The headline.
        message: String,
    },
    /// Something failed, with extra details.
    Error {
        /// The headline.
        message: String,
        /// A longer explanation, ideally with a fix.
        details: String,
    },
    /// Something failed.
    ErrorSimple {
        /// The headline.
        message: String,
    },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::SuccessSimple { message } => (false, message, None),
            Alert::Error { message, details } => (true, message, Some(details)),
            Alert::ErrorSimple { message } => (true, message, None),
        };

        let style = if is_error {
            "flex items-start gap-3 p-4 mb-4 rounded-lg border text-red-800 \
            border-red-300 bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start gap-3 p-4 mb-4 rounded-lg border text-green-800 \
            border-green-300 bg-green-50 dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };

        html! {
            div
                role="alert"
                data-alert-kind=(if is_error { "error" } else { "success" })
                class=(style)
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if let Some(details) = details.filter(|details| !details.is_empty()) {
                        p class="text-sm mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Close"
                    class="text-sm font-semibold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "✕"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
