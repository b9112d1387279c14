//! The current account: login, logout, registration.

use reqwest::Method;
use serde::Deserialize;

use crate::backend::Backend;
use crate::backend::endpoints::paths;
use crate::error::IcheckError;
use crate::resources::user::{AccessToken, LoginResponse, User, UserResponse};
use crate::types::{Params, RequestValues};

/// Provider used by [`Account::login_with_social`] when none is set.
pub const DEFAULT_SOCIAL_PROVIDER: &str = "facebook";

/// Username/password login.
#[derive(Debug, Clone, Default)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
    /// Requested token lifetime in seconds.
    pub ttl: Option<i64>,
}

impl LoginParams {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ttl: None,
        }
    }

    pub fn ttl(mut self, ttl: i64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn append_to(&self, body: &mut RequestValues) {
        body.add("username", self.username.as_str());
        body.add("password", self.password.as_str());
        if let Some(ttl) = self.ttl {
            body.add("ttl", ttl.to_string());
        }
    }
}

/// Login with an OAuth code from a social provider.
#[derive(Debug, Clone, Default)]
pub struct LoginSocialParams {
    /// Provider name; [`DEFAULT_SOCIAL_PROVIDER`] when unset.
    pub provider: Option<String>,
    /// Authorization code issued by the provider.
    pub code: String,
    pub ttl: Option<i64>,
}

impl LoginSocialParams {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn ttl(mut self, ttl: i64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// The provider, falling back to [`DEFAULT_SOCIAL_PROVIDER`].
    pub fn provider_name(&self) -> &str {
        self.provider
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_SOCIAL_PROVIDER)
    }

    pub fn append_to(&self, body: &mut RequestValues) {
        body.add("code", self.code.as_str());
        if let Some(ttl) = self.ttl {
            body.add("ttl", ttl.to_string());
        }
    }
}

/// A new account.
///
/// Empty optional fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct RegisterParams {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl RegisterParams {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn append_to(&self, body: &mut RequestValues) {
        body.add("username", self.username.as_str());
        body.add("password", self.password.as_str());
        let optional = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                body.add(key, value);
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct LogoutResponse {
    #[serde(default)]
    data: serde_json::Value,
}

/// Client for the current account.
#[derive(Debug)]
pub struct Account<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> Account<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// The user owning the access token in `params`.
    pub async fn me(&self, params: &Params) -> Result<User, IcheckError> {
        let mut body = RequestValues::new();
        params.append_to(&mut body);
        let response: UserResponse = self
            .backend
            .call(Method::GET, paths::ACCOUNT, Some(&body), Some(params))
            .await?;
        Ok(response.data)
    }

    /// Exchange a username and password for an access token.
    pub async fn login(&self, request: &LoginParams) -> Result<AccessToken, IcheckError> {
        let mut body = RequestValues::new();
        request.append_to(&mut body);
        let response: LoginResponse = self
            .backend
            .call(Method::POST, paths::LOGIN, Some(&body), None)
            .await?;
        Ok(response.data)
    }

    /// Invalidate the access token in `params`.
    ///
    /// Returns whatever the API puts under `data`.
    pub async fn logout(&self, params: &Params) -> Result<serde_json::Value, IcheckError> {
        let response: LogoutResponse = self
            .backend
            .call(Method::POST, paths::LOGOUT, None, Some(params))
            .await?;
        Ok(response.data)
    }

    /// Exchange a social provider's authorization code for an access token.
    pub async fn login_with_social(
        &self,
        request: &LoginSocialParams,
    ) -> Result<AccessToken, IcheckError> {
        let path = format!("{}/{}", paths::AUTH, request.provider_name());
        let mut body = RequestValues::new();
        request.append_to(&mut body);
        let response: LoginResponse = self
            .backend
            .call(Method::GET, &path, Some(&body), None)
            .await?;
        Ok(response.data)
    }

    /// Create an account.
    pub async fn register(&self, request: &RegisterParams) -> Result<User, IcheckError> {
        let mut body = RequestValues::new();
        request.append_to(&mut body);
        let response: UserResponse = self
            .backend
            .call(Method::POST, paths::REGISTER, Some(&body), None)
            .await?;
        Ok(response.data)
    }
}
