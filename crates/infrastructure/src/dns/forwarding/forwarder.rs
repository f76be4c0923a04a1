use super::message_builder::MessageBuilder;
use super::response_parser::{DnsResponse, ResponseParser};
use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use dnsd_application::ports::UpstreamForwarder;
use dnsd_domain::DomainError;
use hickory_proto::op::Query;
use hickory_proto::rr::Record;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Relays questions to one upstream server, one exchange per question.
pub struct UdpForwarder {
    server: SocketAddr,
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
}

impl UdpForwarder {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self::with_transport(server, Arc::new(UdpTransport::new(server)), timeout)
    }

    pub fn with_transport(
        server: SocketAddr,
        transport: Arc<dyn DnsTransport>,
        timeout: Duration,
    ) -> Self {
        Self {
            server,
            transport,
            timeout,
        }
    }

    /// Send `question` upstream and decode the reply.
    pub async fn query(&self, question: &Query) -> Result<DnsResponse, DomainError> {
        let (id, request_bytes) = MessageBuilder::build_query(question)?;

        debug!(
            server = %self.server,
            id = id,
            domain = %question.name(),
            record_type = ?question.query_type(),
            protocol = self.transport.protocol_name(),
            "Forwarding query"
        );

        let response = self.transport.send(&request_bytes, self.timeout).await?;
        ResponseParser::parse(&response.bytes)
    }
}

#[async_trait]
impl UpstreamForwarder for UdpForwarder {
    async fn forward(&self, question: &Query) -> Vec<Record> {
        match self.query(question).await {
            Ok(response) => {
                debug!(
                    server = %self.server,
                    domain = %question.name(),
                    rcode = ResponseParser::rcode_to_status(response.rcode),
                    truncated = response.truncated,
                    answers = response.answers.len(),
                    "Upstream answered"
                );
                response.answers
            }
            Err(e) => {
                debug!(
                    server = %self.server,
                    domain = %question.name(),
                    error = %e,
                    "Upstream exchange failed"
                );
                Vec::new()
            }
        }
    }

    fn upstream(&self) -> String {
        self.server.to_string()
    }
}
