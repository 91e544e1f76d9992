//! Application configuration (`Config`) and its defaults.
//!
//! Also carries the field metadata used to generate a commented `config.yml`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::{ConfigSpec, FieldMeta};
use crate::search::query::SEARCH_ENDPOINT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Volumes search endpoint. The HTTP timeouts are fixed in code on
    /// purpose; only the target is configurable.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// `host:port` probed before each dispatch to decide reachability.
    #[serde(default = "default_connectivity_probe")]
    pub connectivity_probe: String,

    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            connectivity_probe: default_connectivity_probe(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl Config {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.max(50))
    }
}

impl ConfigSpec for Config {
    const FILE_NAME: &'static str = "config.yml";

    fn fields() -> &'static [FieldMeta] {
        static FIELDS: [FieldMeta; 3] = [
            FieldMeta {
                name: "api_endpoint",
                description: "Google Books volumes endpoint used for searches",
            },
            FieldMeta {
                name: "connectivity_probe",
                description: "host:port probed to decide network reachability before a search",
            },
            FieldMeta {
                name: "probe_timeout_ms",
                description: "Connect timeout for the reachability probe, in milliseconds",
            },
        ];
        &FIELDS
    }
}

fn default_api_endpoint() -> String {
    SEARCH_ENDPOINT.to_string()
}

fn default_connectivity_probe() -> String {
    "www.googleapis.com:443".to_string()
}

fn default_probe_timeout_ms() -> u64 {
    1500
}
