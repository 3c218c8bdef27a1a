//! Response wrappers attaching the fixed header set.
//!
//! Every response the service produces is a `200 OK`; the wrappers differ
//! only in content type, whether the sniffing guard is sent, and whether a
//! trailing newline is appended.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

// Identity is connection metadata, not content; nothing here may be cached.
const NO_STORE: &str = "no-cache, no-store, must-revalidate";
const NOSNIFF: &str = "nosniff";

const TEXT_UTF8: &str = "text/plain; charset=utf-8";
const JSON_UTF8: &str = "application/json; charset=utf-8";
const HTML_UTF8: &str = "text/html; charset=utf-8";

/// Plain-text response.
///
/// Appends a trailing newline so shell substitutions like
/// `$(curl host/ip)` print cleanly.
pub struct Text(pub String);

impl IntoResponse for Text {
    fn into_response(mut self) -> Response {
        self.0.push('\n');
        (
            [
                (header::CONTENT_TYPE, TEXT_UTF8),
                (header::CACHE_CONTROL, NO_STORE),
                (header::X_CONTENT_TYPE_OPTIONS, NOSNIFF),
            ],
            self.0,
        )
            .into_response()
    }
}

/// JSON response serialized with 2-space indentation, readable both to
/// machines and in a terminal.
pub struct PrettyJson<T>(pub T);

impl<T> IntoResponse for PrettyJson<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self.0) {
            Ok(body) => (
                [
                    (header::CONTENT_TYPE, JSON_UTF8),
                    (header::CACHE_CONTROL, NO_STORE),
                    (header::X_CONTENT_TYPE_OPTIONS, NOSNIFF),
                ],
                body,
            )
                .into_response(),
            // The report payloads are strings and options; this arm is
            // unreachable for them.
            Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
        }
    }
}

/// HTML page response.
///
/// Carries the cache headers but, unlike the machine-readable renderers,
/// no sniffing guard.
pub struct Page(pub String);

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, HTML_UTF8),
                (header::CACHE_CONTROL, NO_STORE),
            ],
            self.0,
        )
            .into_response()
    }
}
