use dnsd_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Called once logging is up, so the effective settings reach the log.
pub fn log_config(config: &Config, config_path: Option<&str>) {
    let config_file = config_path
        .map(str::to_string)
        .or_else(Config::get_config_path)
        .unwrap_or_else(|| "default".to_string());

    info!(
        config_file = %config_file,
        dns_port = config.server.dns_port,
        bind = %config.server.bind_address,
        workers = config.server.num_workers,
        forward_server = config.dns.forward_server.as_deref().unwrap_or(""),
        query_timeout_ms = config.dns.query_timeout_ms,
        max_cname_hops = config.dns.max_cname_hops,
        zone_sources = config.zones.sources.len(),
        "Configuration loaded"
    );

    for (index, source) in config.zones.sources.iter().enumerate() {
        info!(index, source = %source, "Zone source configured");
    }
}
