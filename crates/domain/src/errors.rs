use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Failed to fetch zone source {source_id}: {reason}")]
    ZoneFetch { source_id: String, reason: String },

    #[error("Failed to parse zone source {source_id} at line {line}: {reason}")]
    ZoneParse {
        source_id: String,
        line: usize,
        reason: String,
    },

    #[error("CNAME chain for {name} exceeds {max_hops} hops")]
    ChainTooDeep { name: String, max_hops: usize },

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for failures that must abort startup.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::ZoneFetch { .. } | Self::ZoneParse { .. })
    }
}
