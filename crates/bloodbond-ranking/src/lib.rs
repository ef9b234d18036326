//! Nearest-hospital ranking: geocode the caller and every candidate hospital
//! through the shared pacer, then order hospitals by great-circle distance.

pub mod error;
pub mod ranker;
pub mod types;

pub use error::RankError;
pub use ranker::{sort_by_distance, validate_user_location, HospitalRanker};
pub use types::{HospitalDistanceEntry, RankOutcome, Resolution, UnresolvedReason};
