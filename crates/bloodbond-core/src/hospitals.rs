use serde::{Deserialize, Serialize};

/// Free-text place as entered at hospital registration.
///
/// Neither part is canonical; either may be absent on older records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            state: Some(state.into()),
        }
    }

    /// Geocoder query string `"<city>, <state>"`, or `None` when either part
    /// is missing or blank.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        let city = self.city.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let state = self
            .state
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some(location_query(city, state))
    }
}

/// Formats a city/state pair the way the geocoder expects it.
#[must_use]
pub fn location_query(city: &str, state: &str) -> String {
    format!("{}, {}", city.trim(), state.trim())
}

/// A hospital as read from the directory: the candidate set for ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalRecord {
    pub name: String,
    pub email: String,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_joins_trimmed_parts() {
        let loc = Location::new("  Pune ", "Maharashtra ");
        assert_eq!(loc.query().as_deref(), Some("Pune, Maharashtra"));
    }

    #[test]
    fn query_is_none_when_city_missing() {
        let loc = Location {
            city: None,
            state: Some("Goa".to_string()),
        };
        assert!(loc.query().is_none());
    }

    #[test]
    fn query_is_none_when_state_blank() {
        let loc = Location::new("Panaji", "   ");
        assert!(loc.query().is_none());
    }

    #[test]
    fn hospital_record_serializes_nested_location() {
        let record = HospitalRecord {
            name: "City Care".to_string(),
            email: "care@example.com".to_string(),
            location: Location::new("Delhi", "Delhi"),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["location"]["city"], "Delhi");
    }
}
