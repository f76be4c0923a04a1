mod upstream_forwarder;
mod zone_source;

pub use upstream_forwarder::UpstreamForwarder;
pub use zone_source::ZoneSource;
