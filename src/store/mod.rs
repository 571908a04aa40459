//! Trip persistence
//!
//! Saved trips are snapshots: the request fields plus the total computed by
//! [`crate::estimate::estimate`] at save time. The stores never recompute or
//! mutate a record after it is written.

pub mod fjall_store;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::estimate::{TripRequest, estimate};
use crate::{Result, YatraError};

pub use fjall_store::FjallTripStore;
pub use memory::MemoryTripStore;

/// Persisted trip snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: String,
    /// Id of the user who saved the trip
    pub owner: String,
    pub name: String,
    pub source_location: String,
    pub destination: String,
    pub budget: f64,
    pub duration: Option<String>,
    pub travel_style: Option<String>,
    pub notes: Option<String>,
    pub total_cost: u128,
    pub created_at: DateTime<Utc>,
}

impl TripRecord {
    /// Build a new record, computing the total from the request
    pub fn from_request(owner: &str, name: &str, request: &TripRequest) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(YatraError::validation("Trip name cannot be empty"));
        }
        let breakdown = estimate(request)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
            source_location: request.source_location.clone(),
            destination: request.destination.clone(),
            budget: request.budget,
            duration: request.duration.clone(),
            travel_style: request.travel_style.clone(),
            notes: request.notes.clone(),
            total_cost: breakdown.total,
            created_at: Utc::now(),
        })
    }

    /// The request this record was saved from
    #[must_use]
    pub fn to_request(&self) -> TripRequest {
        TripRequest {
            source_location: self.source_location.clone(),
            destination: self.destination.clone(),
            budget: self.budget,
            duration: self.duration.clone(),
            travel_style: self.travel_style.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Storage backend for saved trips
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn save(&self, record: TripRecord) -> Result<()>;

    async fn get(&self, id: &str) -> Result<Option<TripRecord>>;

    /// All trips saved by `owner`, newest first
    async fn list_for_owner(&self, owner: &str) -> Result<Vec<TripRecord>>;

    /// Remove a trip; returns whether it existed
    async fn delete(&self, id: &str) -> Result<bool>;
}

pub(crate) fn newest_first(records: &mut [TripRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_total_matches_estimate() {
        let request = TripRequest::new("Pune", "Goa", 5000.0)
            .with_duration("1-2 days")
            .with_travel_style("premium")
            .with_notes("monsoon trip");
        let record = TripRecord::from_request("asha@example.com", " Goa getaway ", &request).unwrap();

        assert_eq!(record.name, "Goa getaway");
        assert_eq!(record.total_cost, 6499);
        assert_eq!(record.to_request(), request);
    }

    #[test]
    fn test_record_requires_name_and_valid_budget() {
        let request = TripRequest::new("Pune", "Goa", 5000.0);
        let err = TripRecord::from_request("asha@example.com", "  ", &request).unwrap_err();
        assert!(matches!(err, YatraError::Validation { .. }));

        let broke = TripRequest::new("Pune", "Goa", 0.0);
        let err = TripRecord::from_request("asha@example.com", "Trip", &broke).unwrap_err();
        assert!(matches!(err, YatraError::Validation { .. }));
    }
}
