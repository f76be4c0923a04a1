#![allow(dead_code, unused_imports)]

pub mod mock_ports;
pub mod records;

pub use mock_ports::{MockForwarder, MockZoneSource};
pub use records::*;
