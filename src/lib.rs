//! Yatra - trip planning wizard and budget estimator for domestic Indian travel
//!
//! This library provides the trip cost estimator, the city content catalog,
//! the wizard step sequence, trip persistence and the HTTP API serving the
//! browser front end.

pub mod api;
pub mod catalog;
pub mod config;
pub mod currency;
pub mod error;
pub mod estimate;
pub mod logging;
pub mod session;
pub mod store;
pub mod web;
pub mod wizard;

// Re-export core types for public API
pub use catalog::{CatalogProvider, City, StaticCatalog};
pub use config::YatraConfig;
pub use error::YatraError;
pub use estimate::{
    BudgetLevel, BudgetStatus, CostBreakdown, TravelStyle, TripEstimate, TripRequest, assess,
    classify_budget, estimate,
};
pub use session::{Session, SessionRegistry, User};
pub use store::{FjallTripStore, MemoryTripStore, TripRecord, TripStore};
pub use wizard::{TripSummary, WizardFlow, WizardStep};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, YatraError>;
