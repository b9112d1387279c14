//! Request modifiers shared by every resource.

use secrecy::SecretString;

use crate::types::RequestValues;

/// Maximum page size accepted by list endpoints.
pub const MAX_LIMIT: usize = 100;

/// Common properties of every request.
#[derive(Debug, Clone, Default)]
pub struct Params {
    /// Fields to expand in the response, sent as `expand[]`.
    pub expand: Vec<String>,
    /// Sent as the `access-token` header.
    pub access_token: Option<SecretString>,
    /// Extra header lines added to the HTTP request, in order.
    pub headers: Vec<(String, String)>,
}

impl Params {
    /// Create empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Params carrying only an access token.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self::new().access_token(token)
    }

    /// Add a field to expand.
    pub fn expand(mut self, field: impl Into<String>) -> Self {
        self.expand.push(field.into());
        self
    }

    /// Set the access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::from(token.into()));
        self
    }

    /// Add an extra header line. Repeated names produce repeated headers.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add the common parameters to the request values.
    pub fn append_to(&self, body: &mut RequestValues) {
        for field in &self.expand {
            body.add("expand[]", field.as_str());
        }
    }
}

/// Common properties of every list request.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Expansion fields, access token and headers.
    pub params: Params,
    /// Page size; values above [`MAX_LIMIT`] are capped when encoded.
    pub limit: usize,
    /// Number of items to skip.
    pub skip: usize,
    /// Filters applied to the listing.
    pub filters: Filters,
}

impl ListParams {
    /// Create empty list params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the number of items to skip.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Add a field to expand.
    pub fn expand(mut self, field: impl Into<String>) -> Self {
        self.params.expand.push(field.into());
        self
    }

    /// Add a filter, see [`Filters::add_filter`].
    pub fn filter(
        mut self,
        key: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters.add_filter(key, op, value);
        self
    }

    /// Add the list parameters to the request values.
    ///
    /// Filters come first, then `skip`, `limit` and `expand[]`.
    pub fn append_to(&self, body: &mut RequestValues) {
        self.filters.append_to(body);

        if self.skip > 0 {
            body.add("skip", self.skip.to_string());
        }

        if self.limit > 0 {
            body.add("limit", self.limit.min(MAX_LIMIT).to_string());
        }

        self.params.append_to(body);
    }

    /// Copy the fields that apply to the HTTP request itself.
    ///
    /// Expansion fields are left out: they already travel in the body built by
    /// [`ListParams::append_to`].
    pub fn to_params(&self) -> Params {
        Params {
            expand: Vec::new(),
            access_token: self.params.access_token.clone(),
            headers: self.params.headers.clone(),
        }
    }
}

/// A filter encoded as `key[op]=value`, or `key=value` without an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Filter {
    key: String,
    op: String,
    value: String,
}

/// A collection of filters for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    filters: Vec<Filter>,
}

impl Filters {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter. An empty `op` produces a plain `key=value` pair.
    pub fn add_filter(
        &mut self,
        key: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.filters.push(Filter {
            key: key.into(),
            op: op.into(),
            value: value.into(),
        });
    }

    /// Returns true if no filters were added.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Add the filters to the request values in the order they were added.
    pub fn append_to(&self, values: &mut RequestValues) {
        for f in &self.filters {
            if f.op.is_empty() {
                values.add(f.key.as_str(), f.value.as_str());
            } else {
                values.add(format!("{}[{}]", f.key, f.op), f.value.as_str());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_filters_encoding() {
        let mut filters = Filters::new();
        filters.add_filter("created", "gte", "100");
        filters.add_filter("status", "", "active");

        let mut values = RequestValues::new();
        filters.append_to(&mut values);

        assert_eq!(values.get("created[gte]"), vec!["100"]);
        assert_eq!(values.get("status"), vec!["active"]);
        assert_eq!(values.encode(), "created%5Bgte%5D=100&status=active");
    }

    #[test]
    fn test_list_params_caps_limit() {
        let params = ListParams::new().limit(500);
        let mut values = RequestValues::new();
        params.append_to(&mut values);

        assert_eq!(values.encode(), "limit=100");
        assert_eq!(params.limit, 500);
    }

    #[test]
    fn test_list_params_order() {
        let params = ListParams::new()
            .limit(10)
            .skip(20)
            .expand("user")
            .filter("type", "", "city");
        let mut values = RequestValues::new();
        params.append_to(&mut values);

        let keys: Vec<&str> = values.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "skip", "limit", "expand[]"]);
    }

    #[test]
    fn test_list_params_omits_zero_paging() {
        let mut values = RequestValues::new();
        ListParams::new().append_to(&mut values);
        assert!(values.is_empty());
    }

    #[test]
    fn test_params_expand() {
        let params = Params::new().expand("user").expand("address");
        let mut values = RequestValues::new();
        params.append_to(&mut values);
        assert_eq!(values.get("expand[]"), vec!["user", "address"]);
    }

    #[test]
    fn test_to_params_copies_request_fields() {
        let mut list = ListParams::new().expand("user");
        list.params = list
            .params
            .access_token("tok_1")
            .header("X-Trace", "abc");

        let params = list.to_params();
        assert!(params.expand.is_empty());
        assert_eq!(
            params.access_token.as_ref().map(|t| t.expose_secret()),
            Some("tok_1")
        );
        assert_eq!(params.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
    }

    #[test]
    fn test_params_debug_redacts_token() {
        let params = Params::with_access_token("super_secret");
        let debug = format!("{params:?}");
        assert!(!debug.contains("super_secret"));
    }
}
