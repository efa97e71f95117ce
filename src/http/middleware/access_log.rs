//! Access log middleware.
//! Writes one line per request through a managed logger.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::logger::Logger;

pub async fn access_log_middleware(
    State(logger): State<Arc<Logger>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let line = format!(
        "{} {} -> {} ({} ms)",
        method,
        path,
        status.as_u16(),
        start.elapsed().as_millis()
    );
    if status.is_server_error() {
        logger.error(line);
    } else if status.is_client_error() {
        logger.warning(line);
    } else {
        logger.info(line);
    }

    response
}
