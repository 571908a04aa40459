use std::path::Path;

use async_trait::async_trait;
use fjall::Keyspace;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tokio::task;

use super::{TripRecord, TripStore, newest_first};
use crate::{Result, YatraError};

fn trip_key(id: &str) -> Vec<u8> {
    format!("trip:{id}").into_bytes()
}

fn owner_key(owner: &str) -> Vec<u8> {
    format!("owner:{owner}").into_bytes()
}

fn store_error(err: anyhow::Error) -> YatraError {
    YatraError::store(format!("{err:#}"))
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

/// Trips persisted in a fjall keyspace, postcard-encoded.
///
/// Each trip lives under `trip:<id>`; `owner:<user>` holds the ids a user
/// has saved so listing does not need a scan.
pub struct FjallTripStore {
    _db: fjall::Database,
    store: Keyspace,
    index_lock: Mutex<()>,
}

impl FjallTripStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = fjall::Database::builder(path)
            .open()
            .map_err(|e| YatraError::store(format!("Failed to open trip store at {}: {e}", path.display())))?;
        let trips = db
            .keyspace("trips", fjall::KeyspaceCreateOptions::default)
            .map_err(|e| YatraError::store(format!("Failed to open trips keyspace: {e}")))?;
        tracing::info!("Trip store opened at {}", path.display());

        Ok(Self {
            _db: db,
            store: trips,
            index_lock: Mutex::new(()),
        })
    }

    async fn read<T: DeserializeOwned + Send + 'static>(&self, key: Vec<u8>) -> anyhow::Result<Option<T>> {
        let store = self.store.clone();
        let maybe_bytes = task::spawn_blocking(move || get_from_store(store, key)).await??;

        match maybe_bytes {
            Some(bytes) => Ok(Some(postcard::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(&self, key: Vec<u8>, value: &T) -> anyhow::Result<()> {
        let store = self.store.clone();
        let bytes = postcard::to_stdvec(value)?;
        task::spawn_blocking(move || store.insert(key, bytes)).await??;
        Ok(())
    }

    async fn erase(&self, key: Vec<u8>) -> anyhow::Result<()> {
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key)).await??;
        Ok(())
    }

    async fn owner_index(&self, owner: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.read(owner_key(owner)).await?.unwrap_or_default())
    }
}

#[async_trait]
impl TripStore for FjallTripStore {
    #[tracing::instrument(name = "save_trip", level = "debug", skip(self, record), fields(id = %record.id))]
    async fn save(&self, record: TripRecord) -> Result<()> {
        let _guard = self.index_lock.lock().await;

        self.write(trip_key(&record.id), &record).await.map_err(store_error)?;

        let mut ids = self.owner_index(&record.owner).await.map_err(store_error)?;
        if !ids.contains(&record.id) {
            ids.push(record.id.clone());
            self.write(owner_key(&record.owner), &ids)
                .await
                .map_err(store_error)?;
        }
        Ok(())
    }

    #[tracing::instrument(name = "get_trip", level = "debug", skip(self))]
    async fn get(&self, id: &str) -> Result<Option<TripRecord>> {
        self.read(trip_key(id)).await.map_err(store_error)
    }

    #[tracing::instrument(name = "list_trips", level = "debug", skip(self))]
    async fn list_for_owner(&self, owner: &str) -> Result<Vec<TripRecord>> {
        let ids = self.owner_index(owner).await.map_err(store_error)?;

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.read::<TripRecord>(trip_key(&id)).await.map_err(store_error)? {
                Some(record) => records.push(record),
                None => tracing::warn!("Owner index references missing trip {}", id),
            }
        }
        newest_first(&mut records);
        Ok(records)
    }

    #[tracing::instrument(name = "delete_trip", level = "debug", skip(self))]
    async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.index_lock.lock().await;

        let Some(record) = self
            .read::<TripRecord>(trip_key(id))
            .await
            .map_err(store_error)?
        else {
            return Ok(false);
        };

        self.erase(trip_key(id)).await.map_err(store_error)?;

        let mut ids = self.owner_index(&record.owner).await.map_err(store_error)?;
        ids.retain(|existing| existing != id);
        let result = if ids.is_empty() {
            self.erase(owner_key(&record.owner)).await
        } else {
            self.write(owner_key(&record.owner), &ids).await
        };
        result.map_err(store_error)?;

        Ok(true)
    }
}

impl std::fmt::Debug for FjallTripStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FjallTripStore").finish_non_exhaustive()
    }
}
