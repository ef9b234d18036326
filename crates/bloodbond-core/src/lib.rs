pub mod app_config;
pub mod config;
pub mod geo;
pub mod hospitals;

pub use app_config::{AppConfig, Environment, GeocoderConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_km, round_km, GeoCoordinate, EARTH_RADIUS_KM};
pub use hospitals::{location_query, HospitalRecord, Location};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}
