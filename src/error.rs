//! Error types for the iCheck client library.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// The main error type for all iCheck client operations.
#[derive(Error, Debug)]
pub enum IcheckError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// iCheck API returned an `error` object
    #[error("iCheck API error: {0}")]
    Api(ApiError),

    /// A status-in-body 400 response carrying validation failures
    #[error("Bad request: {0}")]
    BadRequest(BadRequestError),

    /// A status-in-body failure other than 400
    #[error("iCheck API error: {0}")]
    Status(StatusError),

    /// Failure response whose body matched neither error scheme
    #[error("Unparsable error returned from iCheck: {0}")]
    Unparsable(String),

    /// A header name or value supplied by the caller is not valid HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// App info was rejected
    #[error("Invalid app info: {0}")]
    InvalidAppInfo(String),

    /// A configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl IcheckError {
    /// The classified API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            IcheckError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status reported by the API for failure responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            IcheckError::Api(err) => Some(err.envelope().http_status),
            IcheckError::BadRequest(err) => Some(err.status),
            IcheckError::Status(err) => Some(err.status),
            _ => None,
        }
    }
}

/// The `type` field of an iCheck error object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// `api_error`
    Api,
    /// `api_connection_error`
    ApiConnection,
    /// `authentication_error`
    Authentication,
    /// `card_error`
    Card,
    /// `invalid_request_error`
    InvalidRequest,
    /// `more_permissions_required`
    Permission,
    /// `rate_limit_error`
    RateLimit,
    /// Any type this library does not know about
    Other(String),
}

impl ErrorType {
    /// The wire representation of this type.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorType::Api => "api_error",
            ErrorType::ApiConnection => "api_connection_error",
            ErrorType::Authentication => "authentication_error",
            ErrorType::Card => "card_error",
            ErrorType::InvalidRequest => "invalid_request_error",
            ErrorType::Permission => "more_permissions_required",
            ErrorType::RateLimit => "rate_limit_error",
            ErrorType::Other(s) => s,
        }
    }
}

impl From<&str> for ErrorType {
    fn from(s: &str) -> Self {
        match s {
            "api_error" => ErrorType::Api,
            "api_connection_error" => ErrorType::ApiConnection,
            "authentication_error" => ErrorType::Authentication,
            "card_error" => ErrorType::Card,
            "invalid_request_error" => ErrorType::InvalidRequest,
            "more_permissions_required" => ErrorType::Permission,
            "rate_limit_error" => ErrorType::RateLimit,
            other => ErrorType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every classified API error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    /// Error type as reported by the API
    pub error_type: ErrorType,
    /// Human-readable error message
    pub message: String,
    /// Machine-readable code, see [`error_codes`]
    pub code: Option<String>,
    /// The request parameter the error relates to
    pub param: Option<String>,
    /// Value of the `Request-Id` response header
    pub request_id: Option<String>,
    /// HTTP status of the failed response
    pub http_status: u16,
    /// Charge the error relates to
    pub charge_id: Option<String>,
}

impl std::fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)?;
        if let Some(code) = &self.code {
            write!(f, " (code: {code})")?;
        }
        Ok(())
    }
}

/// A card failure, the only error kind with extra fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardError {
    /// Common error fields
    pub envelope: ErrorEnvelope,
    /// Issuer decline code, when the card was declined
    pub decline_code: Option<String>,
}

/// An error returned by the API as an `error` object, classified by its `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Catch-all for API-side failures
    Api(ErrorEnvelope),
    /// The API could not reach an upstream service
    ApiConnection(ErrorEnvelope),
    /// Credentials were missing or wrong
    Authentication(ErrorEnvelope),
    /// A card could not be charged
    Card(CardError),
    /// The request had invalid parameters
    InvalidRequest(ErrorEnvelope),
    /// The caller lacks permissions for the request
    Permission(ErrorEnvelope),
    /// Too many requests in too short a time
    RateLimit(ErrorEnvelope),
    /// A `type` this library does not classify; match on
    /// [`ErrorEnvelope::error_type`] to handle it.
    Unrecognized(ErrorEnvelope),
}

impl ApiError {
    /// Wrap an envelope in the variant matching its type.
    pub fn classify(envelope: ErrorEnvelope, decline_code: Option<String>) -> Self {
        match envelope.error_type {
            ErrorType::Api => ApiError::Api(envelope),
            ErrorType::ApiConnection => ApiError::ApiConnection(envelope),
            ErrorType::Authentication => ApiError::Authentication(envelope),
            ErrorType::Card => ApiError::Card(CardError {
                envelope,
                decline_code,
            }),
            ErrorType::InvalidRequest => ApiError::InvalidRequest(envelope),
            ErrorType::Permission => ApiError::Permission(envelope),
            ErrorType::RateLimit => ApiError::RateLimit(envelope),
            ErrorType::Other(_) => ApiError::Unrecognized(envelope),
        }
    }

    /// The common error fields.
    pub fn envelope(&self) -> &ErrorEnvelope {
        match self {
            ApiError::Api(e)
            | ApiError::ApiConnection(e)
            | ApiError::Authentication(e)
            | ApiError::InvalidRequest(e)
            | ApiError::Permission(e)
            | ApiError::RateLimit(e)
            | ApiError::Unrecognized(e) => e,
            ApiError::Card(card) => &card.envelope,
        }
    }

    /// Error message from the API.
    pub fn message(&self) -> &str {
        &self.envelope().message
    }

    /// Decline code of a card error.
    pub fn decline_code(&self) -> Option<&str> {
        match self {
            ApiError::Card(card) => card.decline_code.as_deref(),
            _ => None,
        }
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ApiError::RateLimit(_))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.envelope(), f)
    }
}

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    /// Name of the rule
    #[serde(default)]
    pub rule: String,
    /// Message describing the failure
    #[serde(default)]
    pub message: String,
}

/// Validation failure reported with `"status": 400` in the response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadRequestError {
    /// Status from the body
    pub status: u16,
    /// Short error identifier (e.g. `E_VALIDATION`)
    #[serde(default)]
    pub error: String,
    /// Summary of the failure
    #[serde(default)]
    pub summary: String,
    /// Failed rules keyed by attribute name
    #[serde(default)]
    pub invalid_attributes: BTreeMap<String, Vec<Rule>>,
}

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let first = self
            .invalid_attributes
            .values()
            .find_map(|rules| rules.first());
        match first {
            Some(rule) => f.write_str(&rule.message),
            None if !self.summary.is_empty() => f.write_str(&self.summary),
            None => write!(f, "Invalid attributes: {:?}", self.invalid_attributes),
        }
    }
}

/// Failure reported with a `status` >= 400 in the body and no richer shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusError {
    /// Status from the body
    pub status: u16,
    /// Message from the body
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (status {})", self.message, self.status)
    }
}

/// Known iCheck error codes for pattern matching.
pub mod error_codes {
    /// Card errors
    pub const INCORRECT_NUMBER: &str = "incorrect_number";
    pub const INVALID_NUMBER: &str = "invalid_number";
    pub const INVALID_EXPIRY_MONTH: &str = "invalid_expiry_month";
    pub const INVALID_EXPIRY_YEAR: &str = "invalid_expiry_year";
    pub const INVALID_CVC: &str = "invalid_cvc";
    pub const EXPIRED_CARD: &str = "expired_card";
    pub const INCORRECT_CVC: &str = "incorrect_cvc";
    pub const INCORRECT_ZIP: &str = "incorrect_zip";
    pub const CARD_DECLINED: &str = "card_declined";

    /// Request errors
    pub const MISSING: &str = "missing";
    pub const PROCESSING_ERROR: &str = "processing_error";
    pub const RATE_LIMIT: &str = "rate_limit";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(error_type: &str) -> ErrorEnvelope {
        ErrorEnvelope {
            error_type: ErrorType::from(error_type),
            message: "Something failed".to_string(),
            code: None,
            param: None,
            request_id: None,
            http_status: 400,
            charge_id: None,
        }
    }

    #[test]
    fn test_error_type_round_trip() {
        for s in [
            "api_error",
            "api_connection_error",
            "authentication_error",
            "card_error",
            "invalid_request_error",
            "more_permissions_required",
            "rate_limit_error",
        ] {
            assert_eq!(ErrorType::from(s).as_str(), s);
        }
        assert_eq!(
            ErrorType::from("teapot_error"),
            ErrorType::Other("teapot_error".to_string())
        );
    }

    #[test]
    fn test_classify_card_keeps_decline_code() {
        let error = ApiError::classify(envelope("card_error"), Some("expired_card".into()));
        assert_eq!(error.decline_code(), Some("expired_card"));
        assert_eq!(error.message(), "Something failed");
    }

    #[test]
    fn test_classify_ignores_decline_code_for_other_kinds() {
        let error = ApiError::classify(envelope("rate_limit_error"), Some("x".into()));
        assert!(error.is_rate_limit());
        assert_eq!(error.decline_code(), None);
    }

    #[test]
    fn test_unrecognized_keeps_envelope() {
        let error = ApiError::classify(envelope("teapot_error"), None);
        match &error {
            ApiError::Unrecognized(env) => assert_eq!(env.error_type.as_str(), "teapot_error"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_display() {
        let mut env = envelope("invalid_request_error");
        env.code = Some(error_codes::MISSING.to_string());
        let error = ApiError::classify(env, None);
        assert_eq!(
            error.to_string(),
            "invalid_request_error: Something failed (code: missing)"
        );
    }

    #[test]
    fn test_bad_request_display_uses_first_rule() {
        let json = r#"{
            "status": 400,
            "error": "E_VALIDATION",
            "summary": "1 attribute is invalid",
            "invalidAttributes": {
                "phone": [{"rule": "required", "message": "Phone is required"}]
            }
        }"#;
        let error: BadRequestError = serde_json::from_str(json).unwrap();
        assert_eq!(error.to_string(), "Phone is required");
        assert_eq!(IcheckError::BadRequest(error).status(), Some(400));
    }

    #[test]
    fn test_bad_request_display_falls_back_to_summary() {
        let error: BadRequestError =
            serde_json::from_str(r#"{"status":400,"summary":"Nope"}"#).unwrap();
        assert_eq!(error.to_string(), "Nope");
    }
}
