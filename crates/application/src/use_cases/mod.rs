pub mod dns;
pub mod zones;

pub use dns::HandleDnsQueryUseCase;
pub use zones::LoadZonesUseCase;
