use thiserror::Error;

/// Failures talking to the geocoding provider.
///
/// A lookup that matches nothing is not an error; see
/// [`NominatimClient::resolve`](crate::NominatimClient::resolve).
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, timeout, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON array.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider returned a place whose coordinates are unusable.
    #[error("invalid coordinate for \"{query}\": {reason}")]
    InvalidCoordinate { query: String, reason: String },

    #[error("invalid geocoder base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
