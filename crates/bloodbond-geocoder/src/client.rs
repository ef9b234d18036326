//! HTTP client for the Nominatim `/search` endpoint.
//!
//! One call to [`NominatimClient::resolve`] is one outbound request. The
//! client does not pace itself: the provider allows at most one request per
//! second per client identity, and callers share a
//! [`RequestPacer`](crate::RequestPacer) to stay under that ceiling.

use std::time::Duration;

use bloodbond_core::{GeoCoordinate, GeocoderConfig};
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::NominatimPlace;

/// Client for a Nominatim-compatible geocoding service.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
    contact_email: String,
}

impl NominatimClient {
    /// Creates a client from the geocoder section of the app config.
    ///
    /// The `User-Agent` carries the configured agent plus the contact address,
    /// as the provider's usage policy requires.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.identifying_user_agent())
            .build()?;

        // Keep a trailing slash so `join("search")` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            contact_email: config.contact_email.clone(),
        })
    }

    /// Resolves a free-text `"<city>, <state>"` query to a coordinate.
    ///
    /// Returns `Ok(None)` when the provider has no match for the query.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or a non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body is not a JSON array of places.
    /// - [`GeocodeError::InvalidCoordinate`] if the first place's `lat`/`lon`
    ///   are not numbers within range.
    pub async fn resolve(&self, query: &str) -> Result<Option<GeoCoordinate>, GeocodeError> {
        let url = self.search_url(query)?;
        tracing::debug!(query, "geocoding lookup");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        places
            .into_iter()
            .next()
            .map(|place| parse_place(query, &place))
            .transpose()
    }

    /// Builds `{base}/search?format=json&limit=1&q=...&email=...` with every value
    /// percent-encoded.
    pub(crate) fn search_url(&self, query: &str) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            pairs.append_pair("limit", "1");
            pairs.append_pair("q", query);
            pairs.append_pair("email", &self.contact_email);
        }
        Ok(url)
    }
}

fn parse_place(query: &str, place: &NominatimPlace) -> Result<GeoCoordinate, GeocodeError> {
    let invalid = |reason: String| GeocodeError::InvalidCoordinate {
        query: query.to_owned(),
        reason,
    };

    let lat = place
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(format!("lat '{}': {e}", place.lat)))?;
    let lon = place
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(format!("lon '{}': {e}", place.lon)))?;

    GeoCoordinate::new(lat, lon).map_err(|e| invalid(e.to_string()))
}
