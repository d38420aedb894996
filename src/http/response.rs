//! Mapping pages and errors to HTTP responses.
//!
//! - A page keeps its own status (200, or 404 for the not-found page)
//! - `RouteNotFound` reaching this layer still becomes the 404 page
//! - Every other error is a 500 showing the error in a `<pre>` block

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::error::LapurdError;
use crate::site::Page;

pub fn page_response(page: Page) -> Response {
    let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::OK);
    (status, Html(page.body)).into_response()
}

pub fn error_response(err: &LapurdError) -> Response {
    if let Some(not_found) = err.page_not_found() {
        return (StatusCode::NOT_FOUND, Html(not_found.error_page())).into_response();
    }
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Html(format!("<pre>{}</pre>", escape(&err.to_string())))).into_response()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
