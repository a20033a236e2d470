//! Request-scoped tracing for the HTTP layer. Every request gets its own
//! id so concurrent handler logs can be told apart.

use std::time::Duration;

use axum::{body::Body, http::Request, response::Response};
use uuid::Uuid;

// The crate has a module named `tracing`, so the external crate is
// addressed with a leading `::`.

pub fn make_span_with_request_id(request: &Request<Body>) -> ::tracing::Span {
    let request_id = Uuid::new_v4();
    ::tracing::span!(
        ::tracing::Level::INFO,
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
    )
}

pub fn on_request(_request: &Request<Body>, _span: &::tracing::Span) {
    ::tracing::event!(::tracing::Level::INFO, "started processing request");
}

pub fn on_response(response: &Response, latency: Duration, _span: &::tracing::Span) {
    ::tracing::event!(
        ::tracing::Level::INFO,
        status = response.status().as_u16(),
        latency = ?latency,
        "finished processing request"
    );
}
