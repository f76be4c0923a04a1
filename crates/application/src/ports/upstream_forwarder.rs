use async_trait::async_trait;
use hickory_proto::op::Query;
use hickory_proto::rr::Record;

/// Relays a question the local zones cannot answer to an upstream resolver.
#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Returns the upstream answer section verbatim. Transport and protocol
    /// failures are reported as an empty answer, never as an error.
    async fn forward(&self, question: &Query) -> Vec<Record>;

    /// Upstream address, for logging.
    fn upstream(&self) -> String;
}
