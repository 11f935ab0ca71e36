//! Access log: one event per request once the response is ready.

use super::request_id::RequestId;
use axum::{
    body::Body,
    http::{Request, Response},
    middleware::Next,
};
use std::time::Instant;
use tracing::{info, warn};

pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = req.extensions().get::<RequestId>().cloned();

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    let request_id = request_id.as_ref().map_or("-", |id| id.0.as_str());

    if response.status().is_server_error() {
        warn!(request_id, %method, path = %path, status, latency_ms, "request failed");
    } else {
        info!(request_id, %method, path = %path, status, latency_ms, "request served");
    }

    response
}
