use bloodbond_geocoder::GeocodeError;
use thiserror::Error;

/// Request-level ranking failures.
///
/// Failures for a single hospital never surface here; they are recorded on
/// that hospital's entry instead.
#[derive(Debug, Error)]
pub enum RankError {
    /// Caller input was missing or blank.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("no hospitals found in the directory")]
    DirectoryEmpty,

    /// The provider could not be reached while resolving the caller's own
    /// location. A later retry may succeed.
    #[error("geocoding provider unavailable for \"{query}\": {source}")]
    ProviderUnavailable {
        query: String,
        #[source]
        source: GeocodeError,
    },
}

impl RankError {
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, RankError::ProviderUnavailable { .. })
    }
}
