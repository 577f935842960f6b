//! Middleware for the HTTP API

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Request logging middleware; tags every request with a fresh id
pub async fn request_logging(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start_time = Instant::now();

    debug!("[{}] incoming request: {} {}", request_id, method, uri);

    let response = next.run(request).await;

    let duration = start_time.elapsed();
    let status = response.status();

    if status.is_success() {
        info!("[{}] {} {} - {} ({:?})", request_id, method, uri, status, duration);
    } else {
        warn!("[{}] {} {} - {} ({:?})", request_id, method, uri, status, duration);
    }

    response
}
