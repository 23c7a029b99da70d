use serde::{Deserialize, Serialize};

/// A named observing site offered by the location picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyLocation {
    pub name: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Route function name constant
pub const LIST_LOCATIONS: &str = "list_locations";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sky_location_roundtrip_fields() {
        let loc = SkyLocation {
            name: "Reykjavik".to_string(),
            region: "Extra".to_string(),
            latitude: 64.1355,
            longitude: -21.8954,
        };
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["name"], "Reykjavik");
        assert_eq!(json["latitude"], 64.1355);
    }
}
