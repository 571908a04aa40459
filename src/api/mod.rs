//! HTTP API for the browser wizard
//!
//! Routes are mounted under `/api` by [`crate::web`]. Planning endpoints are
//! public; session and trip endpoints use bearer tokens issued by
//! `POST /api/session`.

mod error;
mod planning;
mod session;
mod trips;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::catalog::CatalogProvider;
use crate::session::SessionRegistry;
use crate::store::TripStore;

pub use error::ApiError;
pub use session::CurrentUser;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub trips: Arc<dyn TripStore>,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogProvider>, trips: Arc<dyn TripStore>) -> Self {
        Self {
            catalog,
            trips,
            sessions: SessionRegistry::new(),
        }
    }

    /// Replace the session registry, e.g. one with a configured TTL
    #[must_use]
    pub fn with_sessions(mut self, sessions: SessionRegistry) -> Self {
        self.sessions = sessions;
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(planning::health))
        .route("/estimate", post(planning::estimate_trip))
        .route("/cities", get(planning::list_cities))
        .route("/cities/{city}", get(planning::get_city))
        .route("/cities/{city}/hotels", get(planning::city_hotels))
        .route("/wizard/{step}", post(planning::wizard_page))
        .route(
            "/session",
            post(session::sign_in)
                .get(session::whoami)
                .delete(session::sign_out),
        )
        .route("/trips", get(trips::list_trips).post(trips::create_trip))
        .route("/trips/{id}", get(trips::get_trip).delete(trips::delete_trip))
        .with_state(state)
}
