use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::{CatalogProvider, City};
use crate::{Result, YatraError};

const EMBEDDED_CATALOG: &str = include_str!("india_catalog.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    cities: Vec<City>,
}

/// Catalog backed by a JSON document loaded once at startup
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    cities: Vec<City>,
    index: HashMap<String, usize>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl StaticCatalog {
    /// Catalog bundled with the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading catalog from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| YatraError::catalog(format!("Invalid catalog JSON: {e}")))?;
        Self::from_cities(file.cities)
    }

    pub fn from_cities(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(YatraError::catalog("Catalog contains no cities"));
        }

        let mut seen = HashSet::new();
        let mut index = HashMap::with_capacity(cities.len());
        for (position, city) in cities.iter().enumerate() {
            let key = normalize(&city.name);
            if key.is_empty() {
                return Err(YatraError::catalog(format!(
                    "City at position {position} has an empty name"
                )));
            }
            if !seen.insert(key.clone()) {
                return Err(YatraError::catalog(format!(
                    "Duplicate city in catalog: {}",
                    city.name
                )));
            }
            index.insert(key, position);
        }

        debug!("Catalog loaded with {} cities", cities.len());
        Ok(Self { cities, index })
    }

    /// Load from `path` when given, otherwise fall back to the embedded data set
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }
}

impl CatalogProvider for StaticCatalog {
    fn city_names(&self) -> Vec<&str> {
        self.cities.iter().map(|city| city.name.as_str()).collect()
    }

    fn city(&self, name: &str) -> Option<&City> {
        self.index
            .get(&normalize(name))
            .and_then(|&position| self.cities.get(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = StaticCatalog::embedded().unwrap();
        let names = catalog.city_names();
        assert!(names.contains(&"Goa"));
        assert!(names.contains(&"Jaipur"));

        for name in names {
            let city = catalog.city(name).unwrap();
            assert!(!city.hotels.is_empty(), "{name} has no hotels");
            assert!(!city.attractions.is_empty(), "{name} has no attractions");
            assert!(!city.dishes.is_empty(), "{name} has no dishes");
            assert!(!city.culture.is_empty(), "{name} has no culture notes");
            assert!(!city.transport.is_empty(), "{name} has no transport");
        }
    }

    #[test]
    fn test_city_lookup_is_case_insensitive() {
        let catalog = StaticCatalog::embedded().unwrap();
        assert_eq!(catalog.city("  jaipur ").unwrap().name, "Jaipur");
        assert!(catalog.city("Atlantis").is_none());
    }

    #[test]
    fn test_rejects_duplicate_cities() {
        let json = r#"{"cities":[{"name":"Goa","state":"Goa"},{"name":"goa","state":"Goa"}]}"#;
        let err = StaticCatalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate city"));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let err = StaticCatalog::from_json(r#"{"cities":[]}"#).unwrap_err();
        assert!(matches!(err, YatraError::Catalog { .. }));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"cities":[{{"name":"Shimla","state":"Himachal Pradesh","hotels":[{{"name":"Ridge View","area":"Mall Road","priceRange":"₹3,000 - ₹5,000","rating":4.1}}]}}]}}"#
        )
        .unwrap();

        let catalog = StaticCatalog::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(catalog.city_names(), vec!["Shimla"]);
        assert_eq!(catalog.city("shimla").unwrap().hotels.len(), 1);
    }
}
