use serde::Deserialize;

/// One element of a Nominatim `/search?format=json` response.
///
/// Nominatim encodes coordinates as decimal strings. Only the fields the
/// ranking needs are kept; everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
