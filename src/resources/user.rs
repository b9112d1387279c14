//! Users and access tokens.

use futures_util::FutureExt;
use reqwest::Method;
use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

use crate::backend::Backend;
use crate::backend::endpoints::paths;
use crate::error::IcheckError;
use crate::iter::Iter;
use crate::types::serde_helpers::{empty_string_as_none, string_or_number};
use crate::types::{ListParams, Params, RequestValues};

/// An iCheck user.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Numeric user id
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub id: i64,
    /// Public iCheck id
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub icheck_id: String,
    /// Display name from the social profile
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, rename = "social_name")]
    pub name: String,
    /// Social provider (e.g. `facebook`)
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub social_type: String,
    /// Id at the social provider
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub social_id: String,
    /// Avatar URL
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub avatar: String,
    /// Cover image URL
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub cover: String,
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub phone: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub email_verified: bool,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub phone_verified: bool,
}

/// A session token returned by the login endpoints.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// The token, sent back as the `access-token` header
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub id: String,
    /// The logged-in user, when the API includes it
    #[serde(default)]
    pub user: Option<User>,
    /// Lifetime in seconds
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub ttl: i64,
    /// Token for the realtime database, when issued
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub firebase_token: Option<String>,
}

impl AccessToken {
    /// Params authenticating requests as the token's user.
    pub fn to_params(&self) -> Params {
        Params::with_access_token(self.id.as_str())
    }
}

/// `{"data": AccessToken}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub data: AccessToken,
}

/// `{"data": User}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub data: User,
}

/// A page of users.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub data: Vec<User>,
}

/// Parameters for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserListParams {
    /// Paging, filters and expansion.
    pub list: ListParams,
    /// Restrict the listing to these iCheck ids, sent as `icheck_id[]`.
    pub icheck_ids: Vec<String>,
}

impl UserListParams {
    /// Create empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an iCheck id to restrict the listing to.
    pub fn icheck_id(mut self, id: impl Into<String>) -> Self {
        self.icheck_ids.push(id.into());
        self
    }

    /// Add the user-specific values, without paging.
    fn append_ids_to(&self, body: &mut RequestValues) {
        for id in &self.icheck_ids {
            body.add("icheck_id[]", id.as_str());
        }
    }

    /// Add all parameters to the request values.
    pub fn append_to(&self, body: &mut RequestValues) {
        self.append_ids_to(body);
        self.list.append_to(body);
    }
}

/// Client for `/users`.
#[derive(Debug)]
pub struct Users<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> Users<'a, B> {
    /// Create a client over `backend`.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Get a user by id.
    pub async fn get(&self, id: &str, params: Option<&Params>) -> Result<User, IcheckError> {
        let path = format!("{}/{}", paths::USERS, id);
        let mut body = RequestValues::new();
        if let Some(params) = params {
            params.append_to(&mut body);
        }
        self.backend
            .call(Method::GET, &path, Some(&body), params)
            .await
    }

    /// Get one page of users.
    pub async fn list(&self, params: &UserListParams) -> Result<UserList, IcheckError> {
        let mut body = RequestValues::new();
        params.append_to(&mut body);
        let request_params = params.list.to_params();
        self.backend
            .call(Method::GET, paths::USERS, Some(&body), Some(&request_params))
            .await
    }

    /// Iterate over every user matching `params`, one page at a time.
    pub fn list_iter(&self, params: UserListParams) -> Iter<'a, User> {
        let backend = self.backend;
        let request_params = params.list.to_params();

        let mut seed = RequestValues::new();
        params.append_ids_to(&mut seed);

        Iter::new(Some(params.list), Some(seed), move |body: RequestValues| {
            let request_params = request_params.clone();
            async move {
                let page: UserList = backend
                    .call(Method::GET, paths::USERS, Some(&body), Some(&request_params))
                    .await?;
                Ok(page.data)
            }
            .boxed()
        })
    }
}
