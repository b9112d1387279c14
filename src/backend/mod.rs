//! HTTP transport for the iCheck API.
//!
//! [`HttpBackend`] turns a method, path, form and [`Params`](crate::types::Params)
//! into one HTTP round trip and returns either the decoded result or a
//! classified [`IcheckError`](crate::IcheckError). It never retries.
//!
//! Failures are detected two ways, because different generations of the API
//! report them differently:
//!
//! - an HTTP status of 400 or more, with an `{"error": {"type", "message"}}`
//!   body classified into [`ApiError`](crate::error::ApiError);
//! - a `"status"` field of 400 or more in the body, decoded into
//!   [`BadRequestError`](crate::error::BadRequestError) or
//!   [`StatusError`](crate::error::StatusError).
//!
//! The `error` object is always tried first.

mod client;
mod config;
pub mod endpoints;
mod traits;
mod user_agent;

pub use client::{HttpBackend, HttpBackendBuilder, response_to_error};
pub use config::{BASE_URL_VAR, ENVIRONMENT_VAR, Environment, LOG_LEVEL_VAR, LogLevel};
pub use endpoints::*;
pub use traits::Backend;
pub use user_agent::{AppInfo, BINDINGS_VERSION, RUSTC_VERSION, UNKNOWN_PLATFORM};
