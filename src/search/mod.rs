//! The search pipeline.
//!
//! Submodules, leaves first:
//! - `models`       — Book / SearchRequest / SearchResult value types
//! - `query`        — raw text → encoded request URL
//! - `connectivity` — reachability gate consulted before each dispatch
//! - `fetch`        — one HTTP GET with fixed timeouts
//! - `extract`      — response body → ordered Book records
//! - `loader`       — dispatch orchestration + request-token supersession
//! - `state`        — loader events → presentation vocabulary

pub mod connectivity;
pub mod extract;
pub mod fetch;
pub mod loader;
pub mod models;
pub mod query;
pub mod state;
