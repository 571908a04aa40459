//! Content catalog
//!
//! City-keyed travel content shown by the wizard panels:
//! - Hotels with nightly price ranges
//! - Attractions, local dishes and cultural highlights
//! - Local transport options and fares
//!
//! The estimator never reads this data; it is injected into the wizard and
//! the HTTP layer through [`CatalogProvider`].

pub mod hotels;
pub mod static_catalog;

use serde::{Deserialize, Serialize};

pub use hotels::{filter_hotels_by_budget, min_nightly_price};
pub use static_catalog::StaticCatalog;

/// Read access to city content
pub trait CatalogProvider: Send + Sync {
    /// Names of all known cities, in catalog order
    fn city_names(&self) -> Vec<&str>;

    /// Case-insensitive lookup of a city by name
    fn city(&self, name: &str) -> Option<&City>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub name: String,
    pub state: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub culture: Vec<CulturalHighlight>,
    #[serde(default)]
    pub transport: Vec<TransportOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    pub area: String,
    /// Nightly price range as displayed, e.g. `"₹2,500 - ₹6,000"`
    pub price_range: String,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub name: String,
    pub description: String,
    pub entry_fee: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub name: String,
    pub description: String,
    pub where_to_try: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalHighlight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOption {
    pub mode: String,
    pub fare: String,
    #[serde(default)]
    pub notes: String,
}
