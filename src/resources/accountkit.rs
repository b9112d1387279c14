//! Phone-number authentication through AccountKit.
//!
//! Each call forwards an AccountKit authorization `code` obtained by the
//! mobile or web SDK.

use reqwest::Method;
use serde::Deserialize;

use crate::backend::Backend;
use crate::backend::endpoints::paths;
use crate::error::IcheckError;
use crate::resources::user::{AccessToken, LoginResponse};
use crate::types::{Params, RequestValues};

/// Login with an AccountKit code.
///
/// `name` and `password` are used when the phone number has no account yet.
#[derive(Debug, Clone, Default)]
pub struct AccountKitLoginParams {
    pub code: String,
    pub name: Option<String>,
    pub password: Option<String>,
    pub ttl: Option<i64>,
}

impl AccountKitLoginParams {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn ttl(mut self, ttl: i64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn append_to(&self, body: &mut RequestValues) {
        body.add("code", self.code.as_str());
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            body.add("name", name);
        }
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            body.add("password", password);
        }
        if let Some(ttl) = self.ttl {
            body.add("ttl", ttl.to_string());
        }
    }
}

/// Set a new password for the account verified by `code`.
#[derive(Debug, Clone, Default)]
pub struct AccountKitResetPasswordParams {
    pub code: String,
    pub password: String,
}

impl AccountKitResetPasswordParams {
    pub fn new(code: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            password: password.into(),
        }
    }

    pub fn append_to(&self, body: &mut RequestValues) {
        body.add("code", self.code.as_str());
        body.add("password", self.password.as_str());
    }
}

/// Move the account to the phone number verified by `code`, confirmed with
/// the account password.
#[derive(Debug, Clone, Default)]
pub struct AccountKitChangePhoneParams {
    pub code: String,
    pub password: String,
}

impl AccountKitChangePhoneParams {
    pub fn new(code: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            password: password.into(),
        }
    }

    pub fn append_to(&self, body: &mut RequestValues) {
        body.add("code", self.code.as_str());
        body.add("password", self.password.as_str());
    }
}

/// `{"data": ...}` returned by the password and phone endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountKitResponse {
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Client for `/accountkit`.
#[derive(Debug)]
pub struct AccountKit<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> AccountKit<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn login(&self, request: &AccountKitLoginParams) -> Result<AccessToken, IcheckError> {
        let mut body = RequestValues::new();
        request.append_to(&mut body);
        let response: LoginResponse = self
            .backend
            .call(Method::POST, paths::ACCOUNTKIT_LOGIN, Some(&body), None)
            .await?;
        Ok(response.data)
    }

    pub async fn reset_password(
        &self,
        request: &AccountKitResetPasswordParams,
    ) -> Result<AccountKitResponse, IcheckError> {
        let mut body = RequestValues::new();
        request.append_to(&mut body);
        self.backend
            .call(
                Method::POST,
                paths::ACCOUNTKIT_RESET_PASSWORD,
                Some(&body),
                None,
            )
            .await
    }

    /// Change the phone number of the account owning the token in `params`.
    pub async fn change_phone(
        &self,
        request: &AccountKitChangePhoneParams,
        params: Option<&Params>,
    ) -> Result<AccountKitResponse, IcheckError> {
        let mut body = RequestValues::new();
        request.append_to(&mut body);
        self.backend
            .call(Method::POST, paths::ACCOUNTKIT_CHANGE_PHONE, Some(&body), params)
            .await
    }
}
