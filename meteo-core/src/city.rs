use serde::{Deserialize, Serialize};

/// A named point the dashboard queries weather for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCoordinate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityCoordinate {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), latitude, longitude }
    }
}

const DEFAULT_CITIES: &[(&str, f64, f64)] = &[
    ("London", 51.5074, -0.1278),
    ("New York", 40.7128, -74.0060),
    ("Tokyo", 35.6762, 139.6503),
    ("Paris", 48.8566, 2.3522),
    ("Sydney", -33.8688, 151.2093),
    ("Mumbai", 19.0760, 72.8777),
    ("Dubai", 25.2048, 55.2708),
    ("Singapore", 1.3521, 103.8198),
    ("Berlin", 52.5200, 13.4050),
    ("Toronto", 43.6532, -79.3832),
];

/// The built-in registry, in query order.
pub fn default_registry() -> Vec<CityCoordinate> {
    DEFAULT_CITIES
        .iter()
        .map(|&(name, lat, lon)| CityCoordinate::new(name, lat, lon))
        .collect()
}
