use dnsd_application::ports::{UpstreamForwarder, ZoneSource};
use dnsd_application::services::QueryResolver;
use dnsd_application::use_cases::{HandleDnsQueryUseCase, LoadZonesUseCase};
use dnsd_domain::Config;
use dnsd_infrastructure::dns::{DnsServerHandler, UdpForwarder};
use dnsd_infrastructure::zones::ZoneSourceLoader;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    /// Loads every zone source and wires the query path. Any zone load
    /// failure is returned before a socket is opened.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS services");

        let zone_source: Arc<dyn ZoneSource> = Arc::new(ZoneSourceLoader::new(
            Duration::from_secs(config.zones.fetch_timeout_secs),
        )?);
        let store = LoadZonesUseCase::new(zone_source)
            .execute(&config.zones.sources)
            .await?;

        let forwarder = Self::build_forwarder(config)?;

        let resolver = Arc::new(
            QueryResolver::new(Arc::new(store), forwarder)
                .with_max_cname_hops(config.dns.max_cname_hops),
        );

        info!(
            records = resolver.store().len(),
            forwarding = resolver.has_forwarder(),
            max_cname_hops = config.dns.max_cname_hops,
            "DNS services initialized"
        );

        let use_case = Arc::new(HandleDnsQueryUseCase::new(resolver));
        let handler = DnsServerHandler::new(use_case);

        Ok(Self { handler })
    }

    fn build_forwarder(config: &Config) -> anyhow::Result<Option<Arc<dyn UpstreamForwarder>>> {
        let Some(server) = config.dns.forward_addr()? else {
            info!("Forwarding disabled");
            return Ok(None);
        };

        let timeout = Duration::from_millis(config.dns.query_timeout_ms);
        info!(server = %server, timeout_ms = config.dns.query_timeout_ms, "Forwarding enabled");

        Ok(Some(Arc::new(UdpForwarder::new(server, timeout))))
    }
}
