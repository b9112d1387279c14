//! Full-text search.

use reqwest::Method;
use serde::Deserialize;

use crate::backend::Backend;
use crate::backend::endpoints::paths;
use crate::error::IcheckError;
use crate::types::{Params, RequestValues};

/// A search query. Unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub query: String,
    /// Kind of document to search (e.g. `product`).
    pub search_type: Option<String>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn search_type(mut self, search_type: impl Into<String>) -> Self {
        self.search_type = Some(search_type.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn append_to(&self, body: &mut RequestValues) {
        if !self.query.is_empty() {
            body.add("query", self.query.as_str());
        }
        if let Some(search_type) = self.search_type.as_deref().filter(|t| !t.is_empty()) {
            body.add("type", search_type);
        }
        if let Some(limit) = self.limit {
            body.add("limit", limit.to_string());
        }
        if let Some(skip) = self.skip {
            body.add("skip", skip.to_string());
        }
    }
}

/// Search hits grouped by document type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Client for `/search`.
#[derive(Debug)]
pub struct Search<'a, B> {
    backend: &'a B,
}

impl<'a, B: Backend> Search<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn search(
        &self,
        request: &SearchParams,
        params: Option<&Params>,
    ) -> Result<SearchResponse, IcheckError> {
        let mut body = RequestValues::new();
        request.append_to(&mut body);
        if let Some(params) = params {
            params.append_to(&mut body);
        }
        self.backend
            .call(Method::GET, paths::SEARCH, Some(&body), params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_sent_as_query() {
        let mut body = RequestValues::new();
        SearchParams::new("milk")
            .search_type("product")
            .limit(5)
            .append_to(&mut body);
        assert_eq!(body.encode(), "query=milk&type=product&limit=5");
        assert!(body.get("password").is_empty());
    }

    #[test]
    fn test_empty_query_is_not_sent() {
        let mut body = RequestValues::new();
        SearchParams::new("").search_type("").skip(10).append_to(&mut body);
        assert_eq!(body.encode(), "skip=10");
    }
}
