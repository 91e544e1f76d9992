//! Query building: raw user text → encoded request URL.

use crate::search::models::SearchRequest;

/// Default volumes endpoint. Overridable through `Config::api_endpoint`,
/// mainly so tests can point the pipeline at a local server.
pub const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

const QUERY_PARAM: &str = "q";

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    endpoint: String,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(SEARCH_ENDPOINT)
    }
}

impl QueryBuilder {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Pure and total: any input yields a well-formed URL. Whether an empty
    /// query is worth dispatching is the caller's decision.
    pub fn build(&self, raw_query: &str) -> SearchRequest {
        let encoded_url = format!(
            "{}?{}={}",
            self.endpoint,
            QUERY_PARAM,
            urlencoding::encode(raw_query)
        );
        SearchRequest {
            raw_query: raw_query.to_string(),
            encoded_url,
        }
    }
}
