//! Data models for the search pipeline.
//!
//! Everything here is a plain value: created by one component, handed to the
//! next, dropped when a newer search supersedes it.

/// Substituted when a volume carries no usable author list.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// One decoded search hit. Produced only by `search::extract`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub info_url: String,
}

/// A built, percent-encoded request. Consumed once by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub raw_query: String,
    pub encoded_url: String,
}

/// Coarse failure taxonomy exposed past the loader boundary.
///
/// The UI only needs to pick a message, so everything transport-shaped
/// collapses to `Network` and everything decode-shaped to `Parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
}

/// Terminal outcome of one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Non-empty result list, source order preserved.
    Success(Vec<Book>),
    /// Syntactically valid response with zero usable entries.
    Empty,
    /// The connectivity gate failed before any network traffic.
    NoConnection,
    Failure(ErrorKind),
}
