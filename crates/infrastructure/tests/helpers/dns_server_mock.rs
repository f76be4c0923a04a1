use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Clone)]
pub enum MockUpstreamBehavior {
    /// Reply with these answers to every query.
    Answer(Vec<Record>),
    /// Reply with the answers but a different message ID.
    WrongId(Vec<Record>),
    /// Reply with bytes that do not decode.
    Garbage,
    /// Never reply.
    Silent,
}

/// Upstream resolver stand-in bound to an ephemeral loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockUpstreamBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_mock_response(&buf[..len], &behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_mock_response(query: &[u8], behavior: &MockUpstreamBehavior) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;

        let (id, answers) = match behavior {
            MockUpstreamBehavior::Answer(answers) => (request.id(), answers),
            MockUpstreamBehavior::WrongId(answers) => (request.id().wrapping_add(1), answers),
            MockUpstreamBehavior::Garbage => return Some(vec![0xde, 0xad, 0xbe]),
            MockUpstreamBehavior::Silent => return None,
        };

        let mut response = Message::new();
        response
            .set_id(id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query);
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        response.add_queries(request.queries().iter().cloned());
        response.add_answers(answers.iter().cloned());

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        response.emit(&mut encoder).ok()?;
        Some(buf)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
