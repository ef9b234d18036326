use bloodbond_core::{GeoCoordinate, HospitalRecord};

/// Why a hospital could not be placed on the distance scale.
#[derive(Debug, Clone, PartialEq)]
pub enum UnresolvedReason {
    /// The stored record lacks a city or state.
    MissingLocation,
    /// The provider returned no match for the hospital's location.
    NotFound,
    /// The provider call failed; carries the rendered error.
    ProviderUnavailable(String),
}

impl UnresolvedReason {
    /// Human-readable text for the `geocoding_error` field.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            UnresolvedReason::MissingLocation => {
                "Hospital record has no city/state to geocode.".to_string()
            }
            UnresolvedReason::NotFound => "Could not geocode hospital location.".to_string(),
            UnresolvedReason::ProviderUnavailable(detail) => {
                format!("Geocoding failed: {detail}")
            }
        }
    }
}

/// Outcome of resolving one candidate, built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved {
        coordinates: GeoCoordinate,
        /// Rounded to two decimals.
        distance_km: f64,
    },
    Unresolved(UnresolvedReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HospitalDistanceEntry {
    pub hospital: HospitalRecord,
    pub resolution: Resolution,
}

impl HospitalDistanceEntry {
    #[must_use]
    pub fn distance_km(&self) -> Option<f64> {
        match self.resolution {
            Resolution::Resolved { distance_km, .. } => Some(distance_km),
            Resolution::Unresolved(_) => None,
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<GeoCoordinate> {
        match self.resolution {
            Resolution::Resolved { coordinates, .. } => Some(coordinates),
            Resolution::Unresolved(_) => None,
        }
    }

    #[must_use]
    pub fn geocoding_error(&self) -> Option<String> {
        match &self.resolution {
            Resolution::Resolved { .. } => None,
            Resolution::Unresolved(reason) => Some(reason.message()),
        }
    }
}

/// Successful ranking results.
#[derive(Debug, Clone, PartialEq)]
pub enum RankOutcome {
    /// Every candidate, nearest first, unresolved entries last.
    Ranked(Vec<HospitalDistanceEntry>),
    /// The caller's own location had no geocoding match, so no distances
    /// exist. Candidates are returned bare, in directory order.
    NoUserLocation {
        query: String,
        hospitals: Vec<HospitalRecord>,
    },
}

#[cfg(test)]
mod tests {
    use bloodbond_core::Location;

    use super::*;

    fn entry(resolution: Resolution) -> HospitalDistanceEntry {
        HospitalDistanceEntry {
            hospital: HospitalRecord {
                name: "AIIMS".to_string(),
                email: "desk@aiims.test".to_string(),
                location: Location::new("Delhi", "Delhi"),
            },
            resolution,
        }
    }

    #[test]
    fn resolved_entry_exposes_distance_and_coordinates() {
        let coordinates = GeoCoordinate::new(28.5672, 77.21).expect("valid");
        let e = entry(Resolution::Resolved {
            coordinates,
            distance_km: 5.12,
        });
        assert_eq!(e.distance_km(), Some(5.12));
        assert_eq!(e.coordinates(), Some(coordinates));
        assert!(e.geocoding_error().is_none());
    }

    #[test]
    fn unresolved_entry_exposes_only_error() {
        let e = entry(Resolution::Unresolved(UnresolvedReason::NotFound));
        assert!(e.distance_km().is_none());
        assert!(e.coordinates().is_none());
        assert_eq!(
            e.geocoding_error().as_deref(),
            Some("Could not geocode hospital location.")
        );
    }

    #[test]
    fn provider_failure_message_includes_detail() {
        let reason = UnresolvedReason::ProviderUnavailable("timed out".to_string());
        assert_eq!(reason.message(), "Geocoding failed: timed out");
    }
}
