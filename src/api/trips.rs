use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;

use super::{ApiError, AppState, CurrentUser};
use crate::YatraError;
use crate::estimate::TripRequest;
use crate::store::TripRecord;

#[derive(Debug, Deserialize)]
pub struct SaveTripRequest {
    pub name: String,
    pub trip: TripRequest,
}

pub async fn list_trips(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<TripRecord>>, ApiError> {
    Ok(Json(state.trips.list_for_owner(&current.user.id).await?))
}

pub async fn create_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    payload: Result<Json<SaveTripRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TripRecord>), ApiError> {
    let Json(request) = payload?;
    let record = TripRecord::from_request(&current.user.id, &request.name, &request.trip)?;

    state.trips.save(record.clone()).await?;
    info!("Saved trip {} for {}", record.id, current.user.id);

    Ok((StatusCode::CREATED, Json(record)))
}

/// Fetch a trip the caller owns; other users' trips are reported as missing.
async fn owned_trip(state: &AppState, owner: &str, id: &str) -> Result<TripRecord, ApiError> {
    match state.trips.get(id).await? {
        Some(record) if record.owner == owner => Ok(record),
        _ => Err(YatraError::not_found(format!("Trip {id} not found")).into()),
    }
}

pub async fn get_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<TripRecord>, ApiError> {
    Ok(Json(owned_trip(&state, &current.user.id, &id).await?))
}

pub async fn delete_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    owned_trip(&state, &current.user.id, &id).await?;
    if !state.trips.delete(&id).await? {
        return Err(YatraError::not_found(format!("Trip {id} not found")).into());
    }
    info!("Deleted trip {} for {}", id, current.user.id);
    Ok(StatusCode::NO_CONTENT)
}
