//! Reqwest-based implementation of [`Backend`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Method;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::{CredentialsProvider, EnvCredentials, StaticCredentials};
use crate::backend::config::{
    BASE_URL_VAR, ENVIRONMENT_VAR, Environment, LOG_LEVEL_VAR, LogLevel,
};
use crate::backend::endpoints::{API_VERSION, DEFAULT_TIMEOUT, headers};
use crate::backend::traits::Backend;
use crate::backend::user_agent::{AppInfo, client_user_agent, user_agent};
use crate::error::{ApiError, ErrorEnvelope, ErrorType, IcheckError, StatusError};
use crate::types::serde_helpers::optional_scalar_string;
use crate::types::{Params, RequestValues};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The HTTP transport for the iCheck API.
///
/// Holds the base URL, the HTTP client and the headers computed at build
/// time. It has no per-call state, so one instance can be cloned or shared
/// between tasks; concurrent calls become concurrent HTTP requests.
///
/// # Example
///
/// ```rust,no_run
/// use icheck_api_client::backend::{Environment, HttpBackend, LogLevel};
///
/// let backend = HttpBackend::builder()
///     .environment(Environment::Sandbox)
///     .log_level(LogLevel::Debug)
///     .build();
/// ```
#[derive(Clone)]
pub struct HttpBackend {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Arc<dyn CredentialsProvider>,
    default_headers: HeaderMap,
    log_level: LogLevel,
}

impl HttpBackend {
    /// Create a production backend with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new backend builder.
    pub fn builder() -> HttpBackendBuilder {
        HttpBackendBuilder::new()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured log level.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Send a form-encoded request and decode the response.
    pub async fn call<T>(
        &self,
        method: Method,
        path: &str,
        form: Option<&RequestValues>,
        params: Option<&Params>,
    ) -> Result<T, IcheckError>
    where
        T: DeserializeOwned,
    {
        let mut path = path.to_string();
        let mut body = None;

        if let Some(form) = form.filter(|f| !f.is_empty()) {
            let data = form.encode();
            if method == Method::GET {
                let sep = if path.contains('?') { '&' } else { '?' };
                path.push(sep);
                path.push_str(&data);
            } else {
                body = Some(data.into_bytes());
            }
        }

        let request = self.new_request(method, &path, FORM_CONTENT_TYPE, body, params)?;
        self.do_request(request).await
    }

    /// Send an already-encoded `multipart/form-data` body.
    pub async fn call_multipart<T>(
        &self,
        method: Method,
        path: &str,
        boundary: &str,
        body: Vec<u8>,
        params: Option<&Params>,
    ) -> Result<T, IcheckError>
    where
        T: DeserializeOwned,
    {
        let content_type = format!("multipart/form-data; boundary={boundary}");
        let request = self.new_request(method, path, &content_type, Some(body), params)?;
        self.do_request(request).await
    }

    /// Build a request: resolve the URL and attach auth and headers.
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        content_type: &str,
        body: Option<Vec<u8>>,
        params: Option<&Params>,
    ) -> Result<reqwest::Request, IcheckError> {
        let url = self.url_for(path).inspect_err(|e| {
            if self.log_level.errors() {
                tracing::error!("Cannot create iCheck request: {e}");
            }
        })?;

        let mut request_headers = self.default_headers.clone();
        request_headers.insert(CONTENT_TYPE, header_value(content_type)?);

        if let Some(params) = params {
            if let Some(token) = &params.access_token {
                let mut value = header_value(token.expose_secret())?;
                value.set_sensitive(true);
                request_headers.insert(headers::ACCESS_TOKEN, value);
            }
            for (name, value) in &params.headers {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| IcheckError::InvalidHeader(format!("{name}: {e}")))?;
                request_headers.append(name, header_value(value)?);
            }
        }

        let creds = self.credentials.get_credentials();
        let mut builder = self
            .http_client
            .request(method, url)
            .basic_auth(&creds.username, Some(creds.expose_password()))
            .headers(request_headers);

        if let Some(body) = body {
            builder = builder.body(body);
        }

        Ok(builder.build()?)
    }

    /// Execute a request and decode the response.
    ///
    /// Transport failures are returned as-is. Failure statuses, whether from
    /// HTTP or from a `status` field in the body, go through
    /// [`response_to_error`] and never populate a result.
    pub async fn do_request<T>(&self, request: reqwest::Request) -> Result<T, IcheckError>
    where
        T: DeserializeOwned,
    {
        let level = self.log_level;
        if level.info() {
            tracing::info!(
                "Requesting {} {}{}",
                request.method(),
                request.url().host_str().unwrap_or_default(),
                request.url().path()
            );
        }

        let start = Instant::now();
        let result = self.http_client.execute(request).await;

        if level.debug() {
            tracing::debug!("Completed in {:?}", start.elapsed());
        }

        let response = result.inspect_err(|e| {
            if level.errors() {
                tracing::error!("Request to iCheck failed: {e}");
            }
        })?;

        let status = response.status().as_u16();
        let response_headers = response.headers().clone();
        let body = response.bytes().await.inspect_err(|e| {
            if level.errors() {
                tracing::error!("Cannot read iCheck response: {e}");
            }
        })?;

        if status >= 400 {
            return Err(self.log_error(response_to_error(status, &response_headers, &body)));
        }

        if level.debug() {
            tracing::debug!("iCheck response: {}", String::from_utf8_lossy(&body));
        }

        let value: serde_json::Value = serde_json::from_slice(&body).inspect_err(|e| {
            if level.errors() {
                tracing::error!("Cannot parse iCheck response: {e}");
            }
        })?;

        if let Some(body_status) = status_in_body(&value) {
            return Err(self.log_error(response_to_error(body_status, &response_headers, &body)));
        }

        serde_json::from_value(value).map_err(|e| {
            if level.errors() {
                tracing::error!("Cannot decode iCheck response: {e}");
            }
            IcheckError::Json(e)
        })
    }

    fn url_for(&self, path: &str) -> Result<Url, IcheckError> {
        let base = self.base_url.trim_end_matches('/');
        let url = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Ok(Url::parse(&url)?)
    }

    fn log_error(&self, error: IcheckError) -> IcheckError {
        if self.log_level.errors() {
            match &error {
                IcheckError::Unparsable(_) => {
                    tracing::warn!("Unparsable error returned from iCheck: {error}")
                }
                _ => tracing::error!("Error encountered from iCheck: {error}"),
            }
        }
        error
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url)
            .field("username", &self.credentials.get_credentials().username)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Backend for HttpBackend {
    async fn call<T>(
        &self,
        method: Method,
        path: &str,
        form: Option<&RequestValues>,
        params: Option<&Params>,
    ) -> Result<T, IcheckError>
    where
        T: DeserializeOwned + Send,
    {
        HttpBackend::call(self, method, path, form, params).await
    }

    async fn call_multipart<T>(
        &self,
        method: Method,
        path: &str,
        boundary: &str,
        body: Vec<u8>,
        params: Option<&Params>,
    ) -> Result<T, IcheckError>
    where
        T: DeserializeOwned + Send,
    {
        HttpBackend::call_multipart(self, method, path, boundary, body, params).await
    }
}

/// Builder for [`HttpBackend`].
pub struct HttpBackendBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    http_client: Option<reqwest::Client>,
    timeout: Duration,
    app_info: Option<AppInfo>,
    log_level: LogLevel,
}

impl HttpBackendBuilder {
    /// Create a new builder targeting production.
    pub fn new() -> Self {
        Self {
            base_url: Environment::Production.base_url().to_string(),
            credentials: None,
            http_client: None,
            timeout: DEFAULT_TIMEOUT,
            app_info: None,
            log_level: LogLevel::default(),
        }
    }

    /// Create a builder seeded from the environment.
    ///
    /// Reads `ICHECK_ENV`, `ICHECK_BASE_URL`, `ICHECK_LOG_LEVEL`,
    /// `ICHECK_BASIC_USER` and `ICHECK_BASIC_PASSWORD`; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, IcheckError> {
        let mut builder = Self::new();

        if let Ok(env) = std::env::var(ENVIRONMENT_VAR) {
            builder = builder.environment(env.parse().map_err(IcheckError::Config)?);
        }
        if let Ok(url) = std::env::var(BASE_URL_VAR) {
            builder = builder.base_url(url);
        }
        if let Ok(level) = std::env::var(LOG_LEVEL_VAR) {
            builder = builder.log_level(level.parse().map_err(IcheckError::Config)?);
        }
        if let Some(credentials) = EnvCredentials::try_from_env() {
            builder = builder.credentials(Arc::new(credentials));
        }

        Ok(builder)
    }

    /// Select production or sandbox.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.base_url = environment.base_url().to_string();
        self
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for Basic auth.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Use a preconfigured HTTP client. Its own timeout applies and
    /// [`timeout`](Self::timeout) is ignored.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the timeout of the HTTP client built by the builder.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Identify the application using these bindings.
    pub fn app_info(mut self, app_info: AppInfo) -> Self {
        self.app_info = Some(app_info);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Build the backend.
    pub fn build(self) -> HttpBackend {
        let app_info = self.app_info.as_ref();

        let mut default_headers = HeaderMap::new();
        let ua = HeaderValue::from_str(&user_agent(app_info))
            .unwrap_or_else(|_| HeaderValue::from_static("icheck-api-client"));
        default_headers.insert(USER_AGENT, ua);
        default_headers.insert(headers::VERSION, HeaderValue::from_static(API_VERSION));
        if let Some(value) = client_user_agent(app_info)
            .ok()
            .and_then(|s| HeaderValue::from_str(&s).ok())
        {
            default_headers.insert(headers::CLIENT_USER_AGENT, value);
        }

        let reqwest_client = self.http_client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .timeout(self.timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new())
        });

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let credentials = self
            .credentials
            .unwrap_or_else(|| Arc::new(StaticCredentials::default()));

        HttpBackend {
            http_client: client,
            base_url: self.base_url,
            credentials,
            default_headers,
            log_level: self.log_level,
        }
    }
}

impl Default for HttpBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The `{"error": {...}}` failure shape.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorObject,
}

/// Only `type` and `message` are required; the optional fields are read when
/// they hold a scalar and dropped otherwise.
#[derive(Debug, Deserialize)]
struct ErrorObject {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
    #[serde(default, deserialize_with = "optional_scalar_string::deserialize")]
    code: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string::deserialize")]
    param: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string::deserialize")]
    charge: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string::deserialize")]
    decline_code: Option<String>,
}

/// Classify a failure response.
///
/// An `error` object with `type` and `message` is tried first and becomes an
/// [`IcheckError::Api`]. Otherwise a top-level `status` >= 400 becomes
/// [`IcheckError::BadRequest`] (400) or [`IcheckError::Status`]. Anything else
/// is [`IcheckError::Unparsable`] carrying the raw body.
pub fn response_to_error(status: u16, response_headers: &HeaderMap, body: &[u8]) -> IcheckError {
    if let Ok(ErrorBody { error }) = serde_json::from_slice::<ErrorBody>(body) {
        let envelope = ErrorEnvelope {
            error_type: ErrorType::from(error.error_type.as_str()),
            message: error.message,
            code: error.code,
            param: error.param,
            request_id: response_headers
                .get(headers::REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            http_status: status,
            charge_id: error.charge,
        };
        return IcheckError::Api(ApiError::classify(envelope, error.decline_code));
    }

    if let Some(error) = status_scheme_error(body) {
        return error;
    }

    IcheckError::Unparsable(String::from_utf8_lossy(body).into_owned())
}

fn status_scheme_error(body: &[u8]) -> Option<IcheckError> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let status = status_in_body(&value)?;

    if status == 400 {
        return Some(match serde_json::from_value(value) {
            Ok(bad_request) => IcheckError::BadRequest(bad_request),
            Err(e) => IcheckError::Json(e),
        });
    }

    let message = value
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or_default()
        .to_string();
    Some(IcheckError::Status(StatusError { status, message }))
}

/// A top-level numeric `status` of 400 or more.
fn status_in_body(value: &serde_json::Value) -> Option<u16> {
    let status = value.as_object()?.get("status")?.as_u64()?;
    u16::try_from(status).ok().filter(|s| *s >= 400)
}

fn header_value(value: &str) -> Result<HeaderValue, IcheckError> {
    HeaderValue::from_str(value).map_err(|e| IcheckError::InvalidHeader(e.to_string()))
}
