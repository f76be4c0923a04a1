pub mod load_zones;

pub use load_zones::LoadZonesUseCase;
