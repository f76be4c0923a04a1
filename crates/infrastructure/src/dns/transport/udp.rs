//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). Responses larger than
//! `MAX_UDP_RESPONSE_SIZE` are cut off by the kernel and will fail to decode.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnsd_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn transport_error(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::Transport {
            server: self.server_addr.to_string(),
            reason: format!("{}: {}", action, e),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        // Ephemeral port in the server's address family
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.transport_error("failed to bind UDP socket", e))?;

        // Connected socket: the kernel drops datagrams from other peers
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.transport_error("failed to connect UDP socket", e))?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send(message_bytes))
            .await
            .map_err(|_| DomainError::QueryTimeout)?
            .map_err(|e| self.transport_error("failed to send UDP query", e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let bytes_received = tokio::time::timeout(timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| DomainError::QueryTimeout)?
            .map_err(|e| self.transport_error("failed to receive UDP response", e))?;

        recv_buf.truncate(bytes_received);
        validate_response_id(message_bytes, &recv_buf, self.server_addr)?;

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse { bytes: recv_buf })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

/// The first two bytes of query and response must carry the same ID.
fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    let (Some(query_id), Some(response_id)) = (query.get(..2), response.get(..2)) else {
        return Err(DomainError::InvalidDnsResponse(format!(
            "message from {} too short to carry an ID",
            server
        )));
    };

    if query_id != response_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "ID mismatch from {}: sent {:02x}{:02x}, got {:02x}{:02x}",
            server, query_id[0], query_id[1], response_id[0], response_id[1]
        )));
    }

    Ok(())
}
