//! Single-shot HTTP fetch with fixed timeouts.
//!
//! One GET per call, no retries. Retry policy, if anyone ever wants it,
//! belongs to the caller.

use std::time::Duration;

use anyhow::Result;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONNECTION, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const READ_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid request url")]
    InvalidUrl,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected http status {0}")]
    HttpStatus(u16),
}

/// Seam between the loader and the network, so tests can inject a fetcher
/// with a controllable completion order.
pub trait BookFetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36",
            ),
        );

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }
}

impl BookFetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl)?;

        let resp = self
            .client
            .get(parsed)
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = resp.status().as_u16();
        debug!("GET {url} -> {status}");
        if status != 200 {
            // Body is intentionally not read on non-200; dropping the
            // response releases the connection.
            return Err(FetchError::HttpStatus(status));
        }

        let body = resp
            .bytes()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(body.to_vec())
    }
}
