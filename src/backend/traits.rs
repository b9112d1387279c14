//! Trait definition for the iCheck transport.
//!
//! Resource clients only depend on [`Backend`], so tests and applications can
//! swap in their own transport (a recording mock, a proxy, a decorator that
//! adds headers) without touching the resource code.
//!
//! # Example
//!
//! ```rust,ignore
//! use icheck_api_client::backend::Backend;
//! use icheck_api_client::resources::user::User;
//! use reqwest::Method;
//!
//! async fn fetch_user<B: Backend>(backend: &B, id: &str) -> icheck_api_client::Result<User> {
//!     backend.call(Method::GET, &format!("/users/{id}"), None, None).await
//! }
//! ```

use std::future::Future;

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::IcheckError;
use crate::types::{Params, RequestValues};

/// Transport for calls against the iCheck API.
///
/// All methods are async and return `Result<T, IcheckError>`.
pub trait Backend: Send + Sync {
    /// Send a form-encoded request and decode the response into `T`.
    ///
    /// A non-empty `form` goes into the query string for GET requests and
    /// into the request body otherwise.
    fn call<T>(
        &self,
        method: Method,
        path: &str,
        form: Option<&RequestValues>,
        params: Option<&Params>,
    ) -> impl Future<Output = Result<T, IcheckError>> + Send
    where
        T: DeserializeOwned + Send;

    /// Send an already-encoded multipart body and decode the response into `T`.
    fn call_multipart<T>(
        &self,
        method: Method,
        path: &str,
        boundary: &str,
        body: Vec<u8>,
        params: Option<&Params>,
    ) -> impl Future<Output = Result<T, IcheckError>> + Send
    where
        T: DeserializeOwned + Send;
}
