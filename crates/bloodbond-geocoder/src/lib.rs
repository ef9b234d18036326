//! Client and pacing primitives for the Nominatim geocoding provider.

pub mod cache;
pub mod client;
pub mod error;
pub mod pacer;
pub mod types;

pub use cache::GeocodeCache;
pub use client::NominatimClient;
pub use error::GeocodeError;
pub use pacer::RequestPacer;
pub use types::NominatimPlace;
