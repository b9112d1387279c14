//! Serde helpers for the loosely typed fields in iCheck responses.

use serde::{Deserialize, Deserializer, de};

/// Deserialize an identifier sent either as a JSON number or a string.
///
/// Older endpoints return numeric ids (`"id": 12`) while newer ones return
/// strings (`"id": "tok_1"`); both become a `String`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use icheck_api_client::types::serde_helpers::string_or_number;
///
/// #[derive(Deserialize, Debug)]
/// struct Record {
///     #[serde(deserialize_with = "string_or_number::deserialize")]
///     id: String,
/// }
///
/// let a: Record = serde_json::from_str(r#"{"id":42}"#).unwrap();
/// let b: Record = serde_json::from_str(r#"{"id":"42"}"#).unwrap();
/// assert_eq!(a.id, b.id);
/// ```
pub mod string_or_number {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Unsigned(u64),
        Signed(i64),
    }

    /// Deserialize a string or integer into a `String`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer) {
            Ok(Raw::String(s)) => Ok(s),
            Ok(Raw::Unsigned(n)) => Ok(n.to_string()),
            Ok(Raw::Signed(n)) => Ok(n.to_string()),
            Err(_) => Err(de::Error::custom("expected a string or integer id")),
        }
    }
}

/// Deserialize an optional field that should be a string but may arrive as
/// any JSON scalar.
///
/// Strings are kept, numbers and booleans are rendered as text, and `null`,
/// arrays or objects become `None`. The field never fails the surrounding
/// struct.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use icheck_api_client::types::serde_helpers::optional_scalar_string;
///
/// #[derive(Deserialize, Debug)]
/// struct Detail {
///     #[serde(deserialize_with = "optional_scalar_string::deserialize", default)]
///     code: Option<String>,
/// }
///
/// let a: Detail = serde_json::from_str(r#"{"code":402}"#).unwrap();
/// let b: Detail = serde_json::from_str(r#"{"code":{"nested":true}}"#).unwrap();
/// assert_eq!(a.code.as_deref(), Some("402"));
/// assert!(b.code.is_none());
/// ```
pub mod optional_scalar_string {
    use super::*;
    use serde_json::Value;

    /// Deserialize any JSON value, keeping only scalars as a `String`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
    }
}

/// Deserialize an empty or null string as `None`.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use icheck_api_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     email: Option<String>,
/// }
///
/// let response: Response = serde_json::from_str(r#"{"email":""}"#).unwrap();
/// assert!(response.email.is_none());
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Record {
        #[serde(deserialize_with = "string_or_number::deserialize")]
        id: String,
    }

    #[test]
    fn test_string_or_number() {
        let a: Record = serde_json::from_str(r#"{"id":7}"#).unwrap();
        let b: Record = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        let c: Record = serde_json::from_str(r#"{"id":-3}"#).unwrap();
        assert_eq!(a.id, "7");
        assert_eq!(b.id, "7");
        assert_eq!(c.id, "-3");
    }

    #[test]
    fn test_string_or_number_rejects_objects() {
        let result: Result<Record, _> = serde_json::from_str(r#"{"id":{}}"#);
        assert!(result.is_err());
    }

    #[derive(Deserialize)]
    struct Detail {
        #[serde(default, deserialize_with = "optional_scalar_string::deserialize")]
        code: Option<String>,
    }

    #[test]
    fn test_optional_scalar_string() {
        let cases = [
            (r#"{"code":"card_declined"}"#, Some("card_declined")),
            (r#"{"code":402}"#, Some("402")),
            (r#"{"code":true}"#, Some("true")),
            (r#"{"code":null}"#, None),
            (r#"{"code":[1]}"#, None),
            (r#"{}"#, None),
        ];
        for (json, expected) in cases {
            let detail: Detail = serde_json::from_str(json).unwrap();
            assert_eq!(detail.code.as_deref(), expected, "{json}");
        }
    }
}
