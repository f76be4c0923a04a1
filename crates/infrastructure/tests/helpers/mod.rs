#![allow(dead_code, unused_imports)]

pub mod dns_server_mock;
pub mod records;

pub use dns_server_mock::{MockDnsServer, MockUpstreamBehavior};
pub use records::*;
