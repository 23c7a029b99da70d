//! Fixed table of named observing sites.

use crate::api::SkyLocation;
use crate::error::{SkyMapError, SkyMapResult};
use crate::models::Observer;

/// (name, region, latitude, longitude)
const LOCATIONS: [(&str, &str, f64, f64); 29] = [
    ("San Francisco", "North America", 37.7749, -122.4194),
    ("New York", "North America", 40.7128, -74.0060),
    ("Toronto", "North America", 43.651070, -79.347015),
    ("Mexico City", "North America", 19.4326, -99.1332),
    ("Buenos Aires", "South America", -34.6037, -58.3816),
    ("Rio de Janeiro", "South America", -22.9068, -43.1729),
    ("Santiago", "South America", -33.4489, -70.6693),
    ("London", "Europe", 51.5074, -0.1278),
    ("Paris", "Europe", 48.8566, 2.3522),
    ("Berlin", "Europe", 52.5200, 13.4050),
    ("Rome", "Europe", 41.9028, 12.4964),
    ("Moscow", "Europe", 55.7558, 37.6173),
    ("Cairo", "Africa", 30.0444, 31.2357),
    ("Cape Town", "Africa", -33.9249, 18.4241),
    ("Nairobi", "Africa", -1.2921, 36.8219),
    ("Lagos", "Africa", 6.5244, 3.3792),
    ("Istanbul", "Middle East", 41.0082, 28.9784),
    ("Dubai", "Middle East", 25.276987, 55.296249),
    ("Jerusalem", "Middle East", 31.7683, 35.2137),
    ("Tokyo", "Asia", 35.6762, 139.6503),
    ("Beijing", "Asia", 39.9042, 116.4074),
    ("New Delhi", "Asia", 28.6139, 77.2090),
    ("Bangkok", "Asia", 13.7563, 100.5018),
    ("Singapore", "Asia", 1.3521, 103.8198),
    ("Sydney", "Oceania", -33.8688, 151.2093),
    ("Auckland", "Oceania", -36.8485, 174.7633),
    ("Honolulu", "Extra", 21.3069, -157.8583),
    ("Reykjavik", "Extra", 64.1355, -21.8954),
    ("Anchorage", "Extra", 61.2181, -149.9003),
];

/// All locations, in display order.
pub fn all() -> Vec<SkyLocation> {
    LOCATIONS
        .iter()
        .map(|&(name, region, latitude, longitude)| SkyLocation {
            name: name.to_string(),
            region: region.to_string(),
            latitude,
            longitude,
        })
        .collect()
}

/// Find a location by its exact name.
pub fn lookup(name: &str) -> SkyMapResult<SkyLocation> {
    LOCATIONS
        .iter()
        .find(|(n, ..)| *n == name)
        .map(|&(name, region, latitude, longitude)| SkyLocation {
            name: name.to_string(),
            region: region.to_string(),
            latitude,
            longitude,
        })
        .ok_or_else(|| SkyMapError::UnknownLocation(name.to_string()))
}

impl SkyLocation {
    /// Observer standing at this location, at sea level.
    pub fn observer(&self) -> SkyMapResult<Observer> {
        Observer::new(self.latitude, self.longitude)
    }
}
