//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};
use unicode_segmentation::UnicodeSegmentation;

/// The number of characters of a request or response body to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match read_body(body).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("could not read request body: {error}");
            return axum::http::StatusCode::BAD_REQUEST.into_response();
        }
    };
    log_request(&parts, &String::from_utf8_lossy(&body));

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let body = match read_body(body).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return axum::http::StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body));

    Response::from_parts(parts, Body::from(body))
}

async fn read_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, usize::MAX).await
}

/// The first [LOG_BODY_LENGTH_LIMIT] characters of `body`, or `None` if it is
/// short enough to log whole.
fn truncate_body(body: &str) -> Option<String> {
    let mut graphemes = body.graphemes(true);
    let head: String = graphemes.by_ref().take(LOG_BODY_LENGTH_LIMIT).collect();

    graphemes.next().map(|_| head)
}

fn log_request(parts: &request::Parts, body: &str) {
    match truncate_body(body) {
        Some(head) => {
            tracing::info!("Received request: {parts:#?}\nbody: {head}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {parts:#?}\nbody: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    match truncate_body(body) {
        Some(head) => {
            tracing::info!("Sending response: {parts:#?}\nbody: {head}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {parts:#?}\nbody: {body:?}"),
    }
}
