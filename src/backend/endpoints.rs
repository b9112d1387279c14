//! iCheck REST API endpoint constants.

use std::time::Duration;

/// Base URL of the production API.
pub const PRODUCTION_URL: &str = "https://core.icheck.com.vn";

/// Base URL of the sandbox API.
pub const SANDBOX_URL: &str = "http://sandbox.icheck.com.vn:4336";

/// API version sent in the [`VERSION_HEADER`].
pub const API_VERSION: &str = "2017-08-12";

/// Timeout of the HTTP client built by the backend builder.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(80);

/// Basic auth user name issued to the public bindings.
pub const SERVICE_USERNAME: &str = "icheck";

/// Basic auth password issued to the public bindings.
pub const SERVICE_PASSWORD: &str = "iYAF&;cBe#G3a~D:#heck";

/// Header names.
pub mod headers {
    /// Per-user access token.
    pub const ACCESS_TOKEN: &str = "access-token";
    /// API version.
    pub const VERSION: &str = "icheck-version";
    /// JSON diagnostics about the binding and runtime.
    pub const CLIENT_USER_AGENT: &str = "x-icheck-client-user-agent";
    /// Request id echoed by the API.
    pub const REQUEST_ID: &str = "request-id";
}

/// Resource paths.
pub mod paths {
    /// Current account.
    pub const ACCOUNT: &str = "/account";
    /// Username/password login.
    pub const LOGIN: &str = "/login";
    /// Invalidate the access token.
    pub const LOGOUT: &str = "/logout";
    /// Social login, followed by `/{provider}`.
    pub const AUTH: &str = "/auth";
    /// Create an account.
    pub const REGISTER: &str = "/register";
    /// AccountKit login.
    pub const ACCOUNTKIT_LOGIN: &str = "/accountkit/login";
    /// AccountKit password reset.
    pub const ACCOUNTKIT_RESET_PASSWORD: &str = "/accountkit/reset-password";
    /// AccountKit phone change.
    pub const ACCOUNTKIT_CHANGE_PHONE: &str = "/accountkit/change-phone";
    /// Addresses of the current account.
    pub const ADDRESSES: &str = "/addresses";
    /// Users.
    pub const USERS: &str = "/users";
    /// Cities, districts and wards.
    pub const LOCATIONS: &str = "/locations";
    /// Full-text search.
    pub const SEARCH: &str = "/search";
}
