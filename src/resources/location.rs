//! Administrative locations: cities, districts, wards.

use reqwest::Method;
use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

use crate::backend::Backend;
use crate::backend::endpoints::paths;
use crate::error::IcheckError;
use crate::types::serde_helpers::string_or_number;
use crate::types::{Params, RequestValues};

/// Location type listed when none is given.
pub const DEFAULT_LOCATION_TYPE: &str = "city";

/// A city, district or ward.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub id: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, rename = "type")]
    pub location_type: String,
    /// Any other fields returned by the API.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `{"data": [Location]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub data: Vec<Location>,
}

/// `{"data": Location}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationResponse {
    pub data: Location,
}

/// Filters for listing locations.
#[derive(Debug, Clone, Default)]
pub struct LocationListParams {
    /// Only children of this location.
    pub parent: Option<String>,
    /// Location type; [`DEFAULT_LOCATION_TYPE`] when unset.
    pub location_type: Option<String>,
}

impl LocationListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn location_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_type = Some(location_type.into());
        self
    }

    pub fn append_to(&self, body: &mut RequestValues) {
        if let Some(parent) = self.parent.as_deref().filter(|p| !p.is_empty()) {
            body.add("parent", parent);
        }
        let location_type = self
            .location_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_LOCATION_TYPE);
        body.add("type", location_type);
    }
}

/// Client for `/locations`.
#[derive(Debug)]
pub struct Locations<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> Locations<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn list(&self, request: &LocationListParams) -> Result<Vec<Location>, IcheckError> {
        let mut body = RequestValues::new();
        request.append_to(&mut body);
        let response: LocationsResponse = self
            .backend
            .call(Method::GET, paths::LOCATIONS, Some(&body), None)
            .await?;
        Ok(response.data)
    }

    pub async fn get(&self, id: &str, params: Option<&Params>) -> Result<Location, IcheckError> {
        let path = format!("{}/{}", paths::LOCATIONS, id);
        let response: LocationResponse =
            self.backend.call(Method::GET, &path, None, params).await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_type_is_city() {
        let mut body = RequestValues::new();
        LocationListParams::new().append_to(&mut body);
        assert_eq!(body.encode(), "type=city");

        let mut body = RequestValues::new();
        LocationListParams::new()
            .parent("1")
            .location_type("district")
            .append_to(&mut body);
        assert_eq!(body.encode(), "parent=1&type=district");
    }

    #[test]
    fn test_location_keeps_extra_fields() {
        let location: Location =
            serde_json::from_str(r#"{"id":1,"name":"Ha Noi","type":"city","parent":null}"#)
                .unwrap();
        assert_eq!(location.id, "1");
        assert_eq!(location.location_type, "city");
        assert!(location.extra.contains_key("parent"));
    }
}
