use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ApiError, AppState};
use crate::catalog::{City, Hotel, filter_hotels_by_budget};
use crate::estimate::{TripEstimate, TripRequest, assess};
use crate::wizard::{WizardFlow, WizardPage, WizardStep};
use crate::{VERSION, YatraError};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

pub async fn estimate_trip(
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<TripEstimate>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(assess(&request)?))
}

pub async fn list_cities(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .catalog
            .city_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

fn find_city<'a>(state: &'a AppState, name: &str) -> Result<&'a City, YatraError> {
    state
        .catalog
        .city(name)
        .ok_or_else(|| YatraError::not_found(format!("Unknown city: {name}")))
}

pub async fn get_city(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<City>, ApiError> {
    Ok(Json(find_city(&state, &name)?.clone()))
}

#[derive(Debug, Deserialize)]
pub struct HotelQuery {
    pub budget: Option<f64>,
}

pub async fn city_hotels(
    State(state): State<AppState>,
    Path(name): Path<String>,
    query: Result<Query<HotelQuery>, QueryRejection>,
) -> Result<Json<Vec<Hotel>>, ApiError> {
    let Query(query) = query?;
    let city = find_city(&state, &name)?;

    let hotels = match query.budget {
        Some(budget) if !budget.is_finite() || budget <= 0.0 => {
            return Err(YatraError::validation("Budget must be a positive number").into());
        }
        Some(budget) => filter_hotels_by_budget(&city.hotels, budget),
        None => city.hotels.clone(),
    };
    Ok(Json(hotels))
}

pub async fn wizard_page(
    State(state): State<AppState>,
    Path(step): Path<String>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<WizardPage>, ApiError> {
    let step: WizardStep = step.parse()?;
    let Json(request) = payload?;

    let flow = WizardFlow::new(state.catalog.as_ref());
    Ok(Json(flow.page(step, &request)?))
}
