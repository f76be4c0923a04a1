use async_trait::async_trait;
use dnsd_domain::DomainError;
use hickory_proto::rr::Record;

/// Fetches one zone source and parses it into records.
#[async_trait]
pub trait ZoneSource: Send + Sync {
    /// Records must be returned in the order they appear in the source.
    /// Any fetch or parse failure is an error; partial zones are never
    /// returned.
    async fn load(&self, source: &str) -> Result<Vec<Record>, DomainError>;
}
