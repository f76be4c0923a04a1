use clap::Parser;
use dnsd_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dnsd")]
#[command(version)]
#[command(about = "dnsd - authoritative responder for fetched zones with upstream forwarding")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (host:port); an empty value disables forwarding
    #[arg(long, value_name = "ADDR")]
    forward_server: Option<String>,

    /// Zone source (http(s) URL or file path); repeat to load several
    #[arg(long = "zone-url", value_name = "URL")]
    zone_urls: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.port,
        bind_address: cli.bind,
        forward_server: cli.forward_server,
        zone_sources: cli.zone_urls,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::log_config(&config, cli.config.as_deref());

    info!("Starting dnsd v{}", env!("CARGO_PKG_VERSION"));

    // Zones are loaded once; a failure here aborts startup
    let dns_services = di::DnsServices::new(&config).await.map_err(|e| {
        error!(error = %e, "Startup failed");
        e
    })?;

    let listen_addr = config.server.listen_addr();
    let num_workers = config.server.num_workers;
    let handler = dns_services.handler;

    tokio::select! {
        result = server::start_dns_server(listen_addr, handler, num_workers) => {
            if let Err(e) = result {
                error!(error = %e, "DNS server error");
                return Err(e);
            }
        }
        signal = server::shutdown_signal() => {
            info!(signal = signal, "Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
