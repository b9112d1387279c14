//! # iCheck Client
//!
//! An async Rust client library for the iCheck REST API.
//!
//! ## Features
//!
//! - Form-encoded and multipart requests with Basic auth and per-user access tokens
//! - Typed errors classified from both failure schemes the API uses
//! - Lazy pagination over list endpoints
//! - Pluggable transport through the [`Backend`](backend::Backend) trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use icheck_api_client::IcheckClient;
//! use icheck_api_client::resources::LocationListParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IcheckClient::new();
//!     let cities = client.locations().list(&LocationListParams::new()).await?;
//!     println!("{} cities", cities.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod backend;
pub mod client;
pub mod error;
pub mod iter;
pub mod resources;
pub mod types;

// Re-export commonly used types at crate root
pub use backend::{AppInfo, Environment, HttpBackend, LogLevel};
pub use client::IcheckClient;
pub use error::{ApiError, IcheckError};
pub use iter::Iter;
pub use types::{ListParams, Params, RequestValues};

/// Result type alias using IcheckError
pub type Result<T> = std::result::Result<T, IcheckError>;
