use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZonesConfig {
    /// Zone sources in load order. `http://` and `https://` entries are
    /// fetched, anything else is read from the local filesystem.
    #[serde(default)]
    pub sources: Vec<String>,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            sources: vec![],
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    30
}
