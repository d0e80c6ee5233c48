//! Extractors whose rejections render as [`AppError`](crate::errors::AppError).
//!
//! Axum's stock `Json` and `Query` reject with plain-text bodies; these wrap
//! them so malformed input gets the same JSON error shape as every other
//! failure.

pub mod json;
pub mod query;

pub use json::AppJson;
pub use query::AppQuery;
