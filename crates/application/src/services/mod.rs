pub mod query_resolver;
pub mod record_store;

pub use query_resolver::{DnsResolution, QueryResolver};
pub use record_store::RecordStore;
