//! Orchestrates geocoding and distance computation for one ranking request.

use std::cmp::Ordering;
use std::sync::Arc;

use bloodbond_core::{haversine_km, location_query, round_km, GeoCoordinate, HospitalRecord};
use bloodbond_geocoder::{GeocodeCache, GeocodeError, NominatimClient, RequestPacer};

use crate::error::RankError;
use crate::types::{HospitalDistanceEntry, RankOutcome, Resolution, UnresolvedReason};

/// Ranks hospitals by distance from a caller-supplied city/state.
///
/// Holds the process-wide [`RequestPacer`]; every outbound geocoding call made
/// through this ranker, from any request, waits on it. Candidates within one
/// request are resolved strictly one after another.
pub struct HospitalRanker {
    client: NominatimClient,
    pacer: Arc<RequestPacer>,
    cache: Option<GeocodeCache>,
}

impl HospitalRanker {
    #[must_use]
    pub fn new(client: NominatimClient, pacer: Arc<RequestPacer>) -> Self {
        Self {
            client,
            pacer,
            cache: None,
        }
    }

    /// Enables memoisation of geocoding outcomes across requests.
    #[must_use]
    pub fn with_cache(mut self, cache: Option<GeocodeCache>) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn pacer(&self) -> &Arc<RequestPacer> {
        &self.pacer
    }

    /// Resolves one query, consulting the cache first and pacing any
    /// outbound call.
    ///
    /// # Errors
    ///
    /// Propagates [`GeocodeError`] from the provider. Errors are not cached.
    pub async fn geocode(&self, query: &str) -> Result<Option<GeoCoordinate>, GeocodeError> {
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(query)) {
            tracing::debug!(query, found = cached.is_some(), "geocode cache hit");
            return Ok(cached);
        }

        self.pacer.acquire().await;
        let outcome = self.client.resolve(query).await?;

        if let Some(cache) = &self.cache {
            cache.insert(query, outcome);
        }
        Ok(outcome)
    }

    /// Ranks `candidates` by distance from `"<user_city>, <user_state>"`.
    ///
    /// Candidate order is the tie-break order in the result.
    ///
    /// # Errors
    ///
    /// - [`RankError::BadRequest`] if either part of the caller's location is blank.
    /// - [`RankError::DirectoryEmpty`] if `candidates` is empty.
    /// - [`RankError::ProviderUnavailable`] if the caller's location could not
    ///   be looked up at all.
    pub async fn rank(
        &self,
        user_city: &str,
        user_state: &str,
        candidates: Vec<HospitalRecord>,
    ) -> Result<RankOutcome, RankError> {
        validate_user_location(user_city, user_state)?;
        if candidates.is_empty() {
            return Err(RankError::DirectoryEmpty);
        }

        let user_query = location_query(user_city, user_state);
        let origin = match self.geocode(&user_query).await {
            Ok(Some(coord)) => coord,
            Ok(None) => {
                tracing::warn!(query = %user_query, "could not geocode user location");
                return Ok(RankOutcome::NoUserLocation {
                    query: user_query,
                    hospitals: candidates,
                });
            }
            Err(source) => {
                tracing::error!(query = %user_query, error = %source, "geocoder unavailable for user location");
                return Err(RankError::ProviderUnavailable {
                    query: user_query,
                    source,
                });
            }
        };

        tracing::info!(
            query = %user_query,
            candidates = candidates.len(),
            "ranking hospitals by distance"
        );

        let mut entries = Vec::with_capacity(candidates.len());
        for hospital in candidates {
            let resolution = self.resolve_candidate(origin, &hospital).await;
            entries.push(HospitalDistanceEntry {
                hospital,
                resolution,
            });
        }

        sort_by_distance(&mut entries);

        let resolved = entries.iter().filter(|e| e.distance_km().is_some()).count();
        tracing::info!(
            resolved,
            unresolved = entries.len() - resolved,
            "hospital ranking complete"
        );

        Ok(RankOutcome::Ranked(entries))
    }

    async fn resolve_candidate(&self, origin: GeoCoordinate, hospital: &HospitalRecord) -> Resolution {
        let Some(query) = hospital.location.query() else {
            tracing::warn!(hospital = %hospital.name, "hospital has no city/state; skipping geocoding");
            return Resolution::Unresolved(UnresolvedReason::MissingLocation);
        };

        match self.geocode(&query).await {
            Ok(Some(coordinates)) => Resolution::Resolved {
                coordinates,
                distance_km: round_km(haversine_km(origin, coordinates)),
            },
            Ok(None) => {
                tracing::warn!(hospital = %hospital.name, query = %query, "could not geocode hospital location");
                Resolution::Unresolved(UnresolvedReason::NotFound)
            }
            Err(e) => {
                tracing::warn!(hospital = %hospital.name, query = %query, error = %e, "geocoding failed for hospital");
                Resolution::Unresolved(UnresolvedReason::ProviderUnavailable(e.to_string()))
            }
        }
    }
}

/// Rejects a caller location with a blank city or state.
///
/// # Errors
///
/// Returns [`RankError::BadRequest`] naming the missing parts.
pub fn validate_user_location(user_city: &str, user_state: &str) -> Result<(), RankError> {
    match (user_city.trim().is_empty(), user_state.trim().is_empty()) {
        (false, false) => Ok(()),
        (true, true) => Err(RankError::BadRequest(
            "missing location: user city and state are required".to_string(),
        )),
        (true, false) => Err(RankError::BadRequest(
            "missing location: user city is required".to_string(),
        )),
        (false, true) => Err(RankError::BadRequest(
            "missing location: user state is required".to_string(),
        )),
    }
}

/// Stable sort, nearest first; entries without a distance go last in their
/// original relative order.
pub fn sort_by_distance(entries: &mut [HospitalDistanceEntry]) {
    entries.sort_by(|a, b| match (a.distance_km(), b.distance_km()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
