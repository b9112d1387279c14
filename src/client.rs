//! Entry point bundling a backend with the resource clients.

use crate::backend::{Backend, HttpBackend, HttpBackendBuilder};
use crate::error::IcheckError;
use crate::resources::{Account, AccountKit, Addresses, Locations, Search, Users};

/// iCheck API client.
///
/// Holds one [`Backend`] and hands out resource clients borrowing it. Cloning
/// an `IcheckClient<HttpBackend>` shares the underlying connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use icheck_api_client::IcheckClient;
/// use icheck_api_client::resources::LoginParams;
///
/// #[tokio::main]
/// async fn main() -> icheck_api_client::Result<()> {
///     let client = IcheckClient::new();
///     let token = client
///         .account()
///         .login(&LoginParams::new("user", "password"))
///         .await?;
///     let me = client.account().me(&token.to_params()).await?;
///     println!("{}", me.icheck_id);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IcheckClient<B = HttpBackend> {
    backend: B,
}

impl IcheckClient<HttpBackend> {
    /// Client for the production API with the built-in credentials.
    pub fn new() -> Self {
        Self::with_backend(HttpBackend::new())
    }

    /// Client configured from `ICHECK_*` environment variables.
    pub fn from_env() -> Result<Self, IcheckError> {
        Ok(Self::with_backend(HttpBackendBuilder::from_env()?.build()))
    }
}

impl<B: Backend> IcheckClient<B> {
    /// Client over any backend.
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn account(&self) -> Account<'_, B> {
        Account::new(&self.backend)
    }

    pub fn account_kit(&self) -> AccountKit<'_, B> {
        AccountKit::new(&self.backend)
    }

    pub fn addresses(&self) -> Addresses<'_, B> {
        Addresses::new(&self.backend)
    }

    pub fn users(&self) -> Users<'_, B> {
        Users::new(&self.backend)
    }

    pub fn locations(&self) -> Locations<'_, B> {
        Locations::new(&self.backend)
    }

    pub fn search(&self) -> Search<'_, B> {
        Search::new(&self.backend)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use reqwest::Method;
    use serde::de::DeserializeOwned;

    use super::*;
    use crate::resources::SearchParams;
    use crate::types::{Params, RequestValues};

    /// Records calls and answers every one with the same JSON.
    struct RecordingBackend {
        calls: Mutex<Vec<(Method, String, String)>>,
        response: serde_json::Value,
    }

    impl RecordingBackend {
        fn new(response: serde_json::Value) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                response,
            }
        }
    }

    impl Backend for RecordingBackend {
        async fn call<T>(
            &self,
            method: Method,
            path: &str,
            form: Option<&RequestValues>,
            _params: Option<&Params>,
        ) -> Result<T, IcheckError>
        where
            T: DeserializeOwned + Send,
        {
            let encoded = form.map(RequestValues::encode).unwrap_or_default();
            self.calls
                .lock()
                .unwrap()
                .push((method, path.to_string(), encoded));
            Ok(serde_json::from_value(self.response.clone())?)
        }

        async fn call_multipart<T>(
            &self,
            _method: Method,
            _path: &str,
            _boundary: &str,
            _body: Vec<u8>,
            _params: Option<&Params>,
        ) -> Result<T, IcheckError>
        where
            T: DeserializeOwned + Send,
        {
            Err(IcheckError::Unparsable("multipart not recorded".to_string()))
        }
    }

    #[tokio::test]
    async fn test_resources_use_custom_backend() {
        let backend = RecordingBackend::new(serde_json::json!({"status": 200, "data": {}}));
        let client = IcheckClient::with_backend(backend);

        let response = client
            .search()
            .search(&SearchParams::new("tea"), None)
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let calls = client.backend().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Method::GET);
        assert_eq!(calls[0].1, "/search");
        assert_eq!(calls[0].2, "query=tea");
    }

    #[test]
    fn test_default_client_targets_production() {
        let client = IcheckClient::new();
        assert_eq!(client.backend().base_url(), crate::backend::PRODUCTION_URL);
    }
}
