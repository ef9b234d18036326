//! Geocoding and ranking commands that talk to the configured provider.

use std::sync::Arc;

use bloodbond_core::{AppConfig, HospitalRecord};
use bloodbond_geocoder::{NominatimClient, RequestPacer};
use bloodbond_ranking::{HospitalRanker, RankOutcome};

fn build_ranker(config: &AppConfig) -> anyhow::Result<HospitalRanker> {
    let client = NominatimClient::new(&config.geocoder)?;
    let pacer = Arc::new(RequestPacer::from_millis(config.geocoder.min_interval_ms));
    Ok(HospitalRanker::new(client, pacer))
}

/// Look up one location and print its coordinates.
///
/// # Errors
///
/// Returns an error if the provider cannot be reached.
pub(crate) async fn run_geocode(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let ranker = build_ranker(config)?;
    match ranker.geocode(query.trim()).await? {
        Some(coord) => println!("{query}: {:.6}, {:.6}", coord.latitude(), coord.longitude()),
        None => println!("{query}: not found"),
    }
    Ok(())
}

/// Rank every registered hospital by distance from `city, state`.
///
/// Prints one line per hospital, nearest first; hospitals without a distance
/// show the reason instead.
///
/// # Errors
///
/// Returns an error if the directory is empty, the input is blank, the
/// caller's location cannot be looked up, or the database query fails.
pub(crate) async fn run_nearest(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    city: &str,
    state: &str,
) -> anyhow::Result<()> {
    bloodbond_ranking::validate_user_location(city, state)?;

    let candidates: Vec<HospitalRecord> = bloodbond_db::list_hospital_directory(pool)
        .await?
        .into_iter()
        .map(HospitalRecord::from)
        .collect();

    let ranker = build_ranker(config)?;
    match ranker.rank(city, state, candidates).await? {
        RankOutcome::Ranked(entries) => {
            println!("{:>10}  {:<32}LOCATION", "KM", "HOSPITAL");
            for entry in &entries {
                let location = entry.hospital.location.query().unwrap_or_default();
                match (entry.distance_km(), entry.geocoding_error()) {
                    (Some(km), _) => {
                        println!("{km:>10.2}  {:<32}{location}", entry.hospital.name);
                    }
                    (None, reason) => println!(
                        "{:>10}  {:<32}{location} ({})",
                        "-",
                        entry.hospital.name,
                        reason.unwrap_or_default()
                    ),
                }
            }
        }
        RankOutcome::NoUserLocation { query, hospitals } => {
            println!("could not determine coordinates for {query}; hospitals unranked:");
            for hospital in &hospitals {
                println!("  {}", hospital.name);
            }
        }
    }

    Ok(())
}
