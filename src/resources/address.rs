//! Shipping addresses of the current account.

use reqwest::Method;
use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

use crate::backend::Backend;
use crate::backend::endpoints::paths;
use crate::error::IcheckError;
use crate::types::serde_helpers::{empty_string_as_none, string_or_number};
use crate::types::{Params, RequestValues};

/// A saved address.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub id: String,
    /// Street line
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub address: String,
    /// City location id
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub city: i64,
    /// District location id
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub district: i64,
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub email: Option<String>,
}

/// Fields of an address to create or update. Unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct AddressBody {
    pub address: Option<String>,
    pub city: Option<i64>,
    pub district: Option<i64>,
    pub email: Option<String>,
}

impl AddressBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn city(mut self, city: i64) -> Self {
        self.city = Some(city);
        self
    }

    pub fn district(mut self, district: i64) -> Self {
        self.district = Some(district);
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn append_to(&self, body: &mut RequestValues) {
        if let Some(address) = self.address.as_deref().filter(|a| !a.is_empty()) {
            body.add("address", address);
        }
        if let Some(city) = self.city {
            body.add("city", city.to_string());
        }
        if let Some(district) = self.district {
            body.add("district", district.to_string());
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            body.add("email", email);
        }
    }
}

/// `{"data": Address}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressResponse {
    pub data: Address,
}

/// `{"data": [Address]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressListResponse {
    #[serde(default)]
    pub data: Vec<Address>,
}

/// Client for `/addresses`. Every call needs an access token in `params`.
#[derive(Debug)]
pub struct Addresses<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> Addresses<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn list(&self, params: &Params) -> Result<Vec<Address>, IcheckError> {
        let mut body = RequestValues::new();
        params.append_to(&mut body);
        let response: AddressListResponse = self
            .backend
            .call(Method::GET, paths::ADDRESSES, Some(&body), Some(params))
            .await?;
        Ok(response.data)
    }

    pub async fn get(&self, id: &str, params: &Params) -> Result<Address, IcheckError> {
        let path = format!("{}/{}", paths::ADDRESSES, id);
        let mut body = RequestValues::new();
        params.append_to(&mut body);
        let response: AddressResponse = self
            .backend
            .call(Method::GET, &path, Some(&body), Some(params))
            .await?;
        Ok(response.data)
    }

    pub async fn create(
        &self,
        address: &AddressBody,
        params: &Params,
    ) -> Result<Address, IcheckError> {
        let mut body = RequestValues::new();
        address.append_to(&mut body);
        params.append_to(&mut body);
        let response: AddressResponse = self
            .backend
            .call(Method::POST, paths::ADDRESSES, Some(&body), Some(params))
            .await?;
        Ok(response.data)
    }

    pub async fn update(
        &self,
        id: &str,
        address: &AddressBody,
        params: &Params,
    ) -> Result<Address, IcheckError> {
        let path = format!("{}/{}", paths::ADDRESSES, id);
        let mut body = RequestValues::new();
        address.append_to(&mut body);
        params.append_to(&mut body);
        let response: AddressResponse = self
            .backend
            .call(Method::PUT, &path, Some(&body), Some(params))
            .await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_body_skips_unset() {
        let mut body = RequestValues::new();
        AddressBody::new()
            .address("1 Trang Tien")
            .city(1)
            .append_to(&mut body);
        assert_eq!(body.encode(), "address=1+Trang+Tien&city=1");
    }

    #[test]
    fn test_address_body_skips_empty_strings() {
        let mut body = RequestValues::new();
        AddressBody::new()
            .address("")
            .email("")
            .district(4)
            .append_to(&mut body);
        assert_eq!(body.encode(), "district=4");
    }

    #[test]
    fn test_address_null_location_ids() {
        let address: Address =
            serde_json::from_str(r#"{"id":"a1","city":null,"district":null,"email":null}"#).unwrap();
        assert_eq!(address.city, 0);
        assert_eq!(address.district, 0);
        assert!(address.email.is_none());
    }

    #[test]
    fn test_address_numeric_id() {
        let address: Address =
            serde_json::from_str(r#"{"id": 12, "address": null, "city": 1, "district": 7}"#)
                .unwrap();
        assert_eq!(address.id, "12");
        assert_eq!(address.address, "");
        assert_eq!(address.district, 7);
        assert!(address.email.is_none());
    }
}
