//! HTTP middleware components.
//!
//! - `request_id` tags every request and response with an `x-request-id`
//! - `logging` emits one structured line per request

pub mod logging;
pub mod request_id;

pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
