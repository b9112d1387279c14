//! Client identification headers.

use std::sync::OnceLock;

use serde::Serialize;

use crate::error::IcheckError;

/// Version of these bindings.
pub const BINDINGS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// System name used when `uname` is unavailable.
pub const UNKNOWN_PLATFORM: &str = "unknown platform";

/// Version of the compiler that built these bindings, recorded by the build
/// script.
pub const RUSTC_VERSION: &str = match option_env!("VERGEN_RUSTC_SEMVER") {
    Some(version) => version,
    None => "unknown",
};

/// Information about the application built on these bindings.
///
/// Reserved for plugins that wish to identify themselves to iCheck; it is
/// appended to the `User-Agent` header and embedded in the diagnostics header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    name: String,
    url: String,
    version: String,
}

impl AppInfo {
    /// Create app info. The name must not be empty.
    pub fn new(name: impl Into<String>) -> Result<Self, IcheckError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IcheckError::InvalidAppInfo(
                "app info name cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            url: String::new(),
            version: String::new(),
        })
    }

    /// Set the application URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the application version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format as `name/version (url)`, omitting the parts that are unset.
    pub fn format_user_agent(&self) -> String {
        let mut s = self.name.clone();
        if !self.version.is_empty() {
            s.push('/');
            s.push_str(&self.version);
        }
        if !self.url.is_empty() {
            s.push_str(" (");
            s.push_str(&self.url);
            s.push(')');
        }
        s
    }
}

/// Runtime diagnostics sent as JSON in the client user-agent header.
#[derive(Debug, Serialize)]
struct ClientUserAgent<'a> {
    application: Option<&'a AppInfo>,
    bindings_version: &'static str,
    language: &'static str,
    language_version: &'static str,
    publisher: &'static str,
    uname: &'static str,
}

/// The `User-Agent` value.
pub fn user_agent(app_info: Option<&AppInfo>) -> String {
    let base = format!("Icheck/v1 RustBindings/{BINDINGS_VERSION}");
    match app_info {
        Some(info) => format!("{base} {}", info.format_user_agent()),
        None => base,
    }
}

/// The JSON diagnostics header value.
pub fn client_user_agent(app_info: Option<&AppInfo>) -> Result<String, IcheckError> {
    let agent = ClientUserAgent {
        application: app_info,
        bindings_version: BINDINGS_VERSION,
        language: "rust",
        language_version: RUSTC_VERSION,
        publisher: "icheck",
        uname: uname(),
    };
    Ok(serde_json::to_string(&agent)?)
}

/// Best-effort `uname -a`, run once per process; any failure yields
/// [`UNKNOWN_PLATFORM`].
fn uname() -> &'static str {
    static UNAME: OnceLock<String> = OnceLock::new();
    UNAME.get_or_init(|| {
        std::process::Command::new("uname")
            .arg("-a")
            .output()
            .ok()
            .filter(|out| out.status.success())
            .and_then(|out| String::from_utf8(out.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_PLATFORM.to_string())
    })
}
