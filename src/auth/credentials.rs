//! Service credentials for HTTP Basic authentication.

use secrecy::{ExposeSecret, SecretString};

use crate::backend::endpoints::{SERVICE_PASSWORD, SERVICE_USERNAME};

/// Environment variable holding the Basic auth user name.
pub const USERNAME_VAR: &str = "ICHECK_BASIC_USER";
/// Environment variable holding the Basic auth password.
pub const PASSWORD_VAR: &str = "ICHECK_BASIC_PASSWORD";

/// Basic auth credentials identifying the calling service.
#[derive(Clone)]
pub struct Credentials {
    /// The user name (public identifier)
    pub username: String,
    password: SecretString,
}

impl Credentials {
    /// Create new credentials from a user name and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Get the password.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl Default for Credentials {
    /// The credential pair issued to the public bindings.
    fn default() -> Self {
        Self::new(SERVICE_USERNAME, SERVICE_PASSWORD)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing service credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug, Default)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, password),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `ICHECK_BASIC_USER` and `ICHECK_BASIC_PASSWORD`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Try to create credentials from default environment variables.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(USERNAME_VAR, PASSWORD_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env_vars(user_var: &str, password_var: &str) -> Option<Self> {
        let username = std::env::var(user_var).ok()?;
        let password = std::env::var(password_var).ok()?;

        Some(Self {
            credentials: Credentials::new(username, password),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("my_user", "super_secret");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_user"));
        assert!(!debug_str.contains("super_secret"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials::new("user", "secret");
        let creds = provider.get_credentials();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.expose_password(), "secret");
    }

    #[test]
    fn test_static_credentials_as_shared_provider() {
        let provider: std::sync::Arc<dyn CredentialsProvider> =
            std::sync::Arc::new(StaticCredentials::new("partner", "pw"));
        assert_eq!(provider.get_credentials().username, "partner");
    }

    #[test]
    fn test_default_credentials_use_service_pair() {
        let creds = Credentials::default();
        assert_eq!(creds.username, SERVICE_USERNAME);
        assert_eq!(creds.expose_password(), SERVICE_PASSWORD);
    }

    #[test]
    fn test_env_credentials_missing_vars() {
        assert!(
            EnvCredentials::try_from_env_vars("ICHECK_TEST_UNSET_USER", "ICHECK_TEST_UNSET_PW")
                .is_none()
        );
    }
}
