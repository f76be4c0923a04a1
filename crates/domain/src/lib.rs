//! dnsd domain layer: configuration and error types shared by every crate.
pub mod config;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig, ServerConfig, ZonesConfig};
pub use errors::DomainError;
