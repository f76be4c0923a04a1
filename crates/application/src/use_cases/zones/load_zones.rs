use crate::ports::ZoneSource;
use crate::services::RecordStore;
use dnsd_domain::DomainError;
use std::sync::Arc;
use tracing::{error, info};

/// Loads every configured zone source, in order, into one [`RecordStore`].
pub struct LoadZonesUseCase {
    zone_source: Arc<dyn ZoneSource>,
}

impl LoadZonesUseCase {
    pub fn new(zone_source: Arc<dyn ZoneSource>) -> Self {
        Self { zone_source }
    }

    /// Fails on the first source that cannot be fetched or parsed; no
    /// partial store is ever returned.
    pub async fn execute(&self, sources: &[String]) -> Result<RecordStore, DomainError> {
        let mut records = Vec::new();

        for source in sources {
            let loaded = self.zone_source.load(source).await.map_err(|e| {
                error!(source = %source, error = %e, "Failed to load zone source");
                e
            })?;

            info!(source = %source, records = loaded.len(), "Zone source loaded");
            records.extend(loaded);
        }

        let store = RecordStore::new(records);
        info!(
            sources = sources.len(),
            records = store.len(),
            names = store.distinct_names(),
            "Record store ready"
        );

        Ok(store)
    }
}
