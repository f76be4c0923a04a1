use crate::dns::forwarding::MessageBuilder;
use dnsd_application::use_cases::HandleDnsQueryUseCase;
use hickory_proto::op::{Message, MessageType};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Largest reply a plain (non-EDNS) UDP client is guaranteed to accept.
const MAX_UDP_REPLY_SIZE: usize = 512;

/// Wire-level entry point: bytes in, reply bytes out.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Decode one datagram, answer it and encode the reply.
    ///
    /// Returns `None` when nothing should be sent back: the datagram does
    /// not decode, it is itself a response, or the reply cannot be encoded.
    /// A reply over 512 bytes is sent with its answers dropped and TC set.
    pub async fn handle_raw_udp(&self, query_buf: &[u8], client_ip: IpAddr) -> Option<Vec<u8>> {
        let request = match Message::from_vec(query_buf) {
            Ok(message) => message,
            Err(e) => {
                debug!(client = %client_ip, bytes = query_buf.len(), error = %e, "Dropping undecodable datagram");
                return None;
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client_ip, id = request.id(), "Dropping non-query message");
            return None;
        }

        let mut reply = self.use_case.execute(&request, client_ip).await;

        let bytes = Self::encode(&reply, client_ip)?;
        if bytes.len() <= MAX_UDP_REPLY_SIZE {
            return Some(bytes);
        }

        warn!(
            client = %client_ip,
            id = reply.id(),
            size = bytes.len(),
            answers = reply.answers().len(),
            "Reply exceeds UDP limit, sending truncated"
        );
        reply.take_answers();
        reply.set_truncated(true);
        Self::encode(&reply, client_ip)
    }

    fn encode(reply: &Message, client_ip: IpAddr) -> Option<Vec<u8>> {
        match MessageBuilder::serialize_message(reply) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %client_ip, id = reply.id(), error = %e, "Failed to encode reply");
                None
            }
        }
    }
}
