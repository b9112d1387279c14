//! Environment selection and log verbosity.

use std::str::FromStr;

use crate::backend::endpoints::{PRODUCTION_URL, SANDBOX_URL};

/// Environment variable selecting [`Environment`].
pub const ENVIRONMENT_VAR: &str = "ICHECK_ENV";
/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "ICHECK_BASE_URL";
/// Environment variable selecting [`LogLevel`].
pub const LOG_LEVEL_VAR: &str = "ICHECK_LOG_LEVEL";

/// Which iCheck deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// `https://core.icheck.com.vn`
    #[default]
    Production,
    /// `http://sandbox.icheck.com.vn:4336`
    Sandbox,
}

impl Environment {
    /// Base URL of this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_URL,
            Environment::Sandbox => SANDBOX_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "live" => Ok(Environment::Production),
            "sandbox" | "dev" | "development" => Ok(Environment::Sandbox),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// How much the backend logs around each request.
///
/// Levels are cumulative: `Info` also logs errors, `Debug` logs everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// No logging.
    None = 0,
    /// Failures only.
    Errors = 1,
    /// Failures and one line per request.
    #[default]
    Info = 2,
    /// Also timings and raw response bodies.
    Debug = 3,
}

impl LogLevel {
    /// Whether failures are logged.
    pub fn errors(self) -> bool {
        self >= LogLevel::Errors
    }

    /// Whether request lines are logged.
    pub fn info(self) -> bool {
        self >= LogLevel::Info
    }

    /// Whether timings and bodies are logged.
    pub fn debug(self) -> bool {
        self >= LogLevel::Debug
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LogLevel::None),
            1 => Ok(LogLevel::Errors),
            2 => Ok(LogLevel::Info),
            3 => Ok(LogLevel::Debug),
            other => Err(format!("log level must be between 0 and 3, got {other}")),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid log level: {s}"))?;
        LogLevel::try_from(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!("sandbox".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert_eq!(" PRODUCTION ".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(Environment::Production.base_url(), "https://core.icheck.com.vn");
        assert_eq!(Environment::Sandbox.base_url(), "http://sandbox.icheck.com.vn:4336");
    }

    #[test]
    fn test_log_level_parse_and_order() {
        assert_eq!("0".parse::<LogLevel>().unwrap(), LogLevel::None);
        assert_eq!("3".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("4".parse::<LogLevel>().is_err());
        assert!("loud".parse::<LogLevel>().is_err());

        assert!(LogLevel::Info.errors());
        assert!(LogLevel::Info.info());
        assert!(!LogLevel::Info.debug());
        assert!(!LogLevel::None.errors());
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
