use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{TripRecord, TripStore, newest_first};
use crate::Result;

/// Non-persistent store, used for tests and `--ephemeral` servers
#[derive(Debug, Default)]
pub struct MemoryTripStore {
    trips: RwLock<HashMap<String, TripRecord>>,
}

impl MemoryTripStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripStore for MemoryTripStore {
    async fn save(&self, record: TripRecord) -> Result<()> {
        self.trips.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<TripRecord>> {
        Ok(self.trips.read().await.get(id).cloned())
    }

    async fn list_for_owner(&self, owner: &str) -> Result<Vec<TripRecord>> {
        let mut records: Vec<TripRecord> = self
            .trips
            .read()
            .await
            .values()
            .filter(|record| record.owner == owner)
            .cloned()
            .collect();
        newest_first(&mut records);
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.trips.write().await.remove(id).is_some())
    }
}
