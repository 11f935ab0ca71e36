//! Custom Axum extractors.
//!
//! Both extractors turn an undecodable body into a 422 with the standard
//! error shape instead of axum's plain-text rejection.

pub mod json_body;
pub mod validated_json;

pub use json_body::JsonBody;
pub use validated_json::ValidatedJson;
