pub mod parser;
pub mod source;

pub use parser::parse_zone;
pub use source::ZoneSourceLoader;
