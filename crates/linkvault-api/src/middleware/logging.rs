//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Span, info, info_span};

/// Logs request method, path, status, and duration.
///
/// Redemption paths carry the share id, so only the route prefix is logged
/// for them.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = loggable_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "HTTP request"
    );

    response
}

/// Span for `TraceLayer`, carrying the same masked path as the request log.
pub fn request_span(request: &Request) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        path = %loggable_path(request.uri().path()),
    )
}

fn loggable_path(path: &str) -> String {
    const DETAILS_PREFIX: &str = "/access/link/details/";
    if path.starts_with(DETAILS_PREFIX) {
        format!("{DETAILS_PREFIX}{{share_id}}")
    } else {
        path.to_string()
    }
}
