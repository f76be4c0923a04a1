use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;

/// Hop cap applied when chasing CNAME chains through the local zone data.
pub const DEFAULT_MAX_CNAME_HOPS: usize = 8;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream resolver for questions the local zones cannot answer.
    /// `None` or an empty string disables forwarding.
    #[serde(default = "default_forward_server")]
    pub forward_server: Option<String>,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_max_cname_hops")]
    pub max_cname_hops: usize,
}

impl DnsConfig {
    /// Parsed upstream address, or `None` when forwarding is disabled.
    pub fn forward_addr(&self) -> Result<Option<SocketAddr>, ConfigError> {
        match self.forward_server.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(server) => server.parse().map(Some).map_err(|e| {
                ConfigError::Validation(format!("Invalid forward server '{}': {}", server, e))
            }),
        }
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            forward_server: default_forward_server(),
            query_timeout_ms: default_query_timeout_ms(),
            max_cname_hops: default_max_cname_hops(),
        }
    }
}

fn default_forward_server() -> Option<String> {
    Some("1.1.1.1:53".to_string())
}

fn default_query_timeout_ms() -> u64 {
    3000
}

fn default_max_cname_hops() -> usize {
    DEFAULT_MAX_CNAME_HOPS
}
