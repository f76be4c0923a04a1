use dnsd_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::unix::AsyncFd;
use tokio::io::Interest;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// Largest datagram accepted from a client.
const MAX_DATAGRAM_SIZE: usize = 4096;

/// Bind `num_workers` UDP sockets on the same address with SO_REUSEPORT and
/// serve until every worker stops. Bind failures are returned immediately.
pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    num_workers: usize,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    info!(bind_address = %socket_addr, num_workers, "Starting DNS server with SO_REUSEPORT");

    let handler = Arc::new(handler);
    let mut join_set: JoinSet<()> = JoinSet::new();

    for i in 0..num_workers {
        let udp_socket = Arc::new(create_udp_socket(domain, socket_addr)?);
        let handler_udp = handler.clone();
        join_set.spawn(async move {
            run_udp_worker(udp_socket, handler_udp, i).await;
        });
    }

    info!("DNS server ready: {} workers on {}", num_workers, socket_addr);

    while join_set.join_next().await.is_some() {}
    Ok(())
}

/// Receive loop; every datagram is answered on its own task so a slow
/// upstream exchange never blocks the socket.
async fn run_udp_worker(
    socket: Arc<AsyncFd<std::net::UdpSocket>>,
    handler: Arc<DnsServerHandler>,
    worker_id: usize,
) {
    let mut recv_buf = [0u8; MAX_DATAGRAM_SIZE];

    loop {
        let mut guard = match socket.readable().await {
            Ok(g) => g,
            Err(_) => break,
        };

        loop {
            match socket.get_ref().recv_from(&mut recv_buf) {
                Ok((n, from)) => {
                    let handler_clone = handler.clone();
                    let socket_clone = socket.clone();
                    let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
                    tokio::spawn(async move {
                        if let Some(response) =
                            handler_clone.handle_raw_udp(&owned_buf, from.ip()).await
                        {
                            send_response(&socket_clone, &response, from).await;
                        }
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    guard.clear_ready();
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    error!(worker = worker_id, error = %e, "UDP recv error");
                    guard.clear_ready();
                    break;
                }
            }
        }
    }
}

async fn send_response(socket: &AsyncFd<std::net::UdpSocket>, response: &[u8], to: SocketAddr) {
    let result = socket
        .async_io(Interest::WRITABLE, |inner| inner.send_to(response, to))
        .await;

    if let Err(e) = result {
        debug!(client = %to, error = %e, "Failed to send reply");
    }
}

fn create_udp_socket(
    domain: Domain,
    socket_addr: SocketAddr,
) -> anyhow::Result<AsyncFd<std::net::UdpSocket>> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_reuse_port(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(AsyncFd::with_interest(
        std_socket,
        Interest::READABLE | Interest::WRITABLE,
    )?)
}
