//! Defines the templates and route handlers for the page to display for an internal server error.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl InternalServerError<'_> {
    pub fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", self.description, self.fix).into_string())
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        internal_server_error::InternalServerError,
        test_utils::{assert_valid_html, parse_html_document},
    };

    #[tokio::test]
    async fn renders_description_and_fix() {
        let response = InternalServerError {
            description: "Invalid Timezone Settings",
            fix: "Check your server settings",
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("Invalid Timezone Settings"));
        assert!(text.contains("Check your server settings"));
    }
}
