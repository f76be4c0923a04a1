pub mod forwarder;
pub mod message_builder;
pub mod response_parser;

pub use forwarder::UdpForwarder;
pub use message_builder::MessageBuilder;
pub use response_parser::{DnsResponse, ResponseParser};
