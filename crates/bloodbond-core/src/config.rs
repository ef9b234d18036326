use crate::app_config::{AppConfig, Environment, GeocoderConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so tests can drive it
/// with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("BLOODBOND_ENV", "development"));
    let bind_addr = parse_addr("BLOODBOND_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("BLOODBOND_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("BLOODBOND_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("BLOODBOND_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("BLOODBOND_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let api_rate_limit_per_minute = parse_usize("BLOODBOND_API_RATE_LIMIT_PER_MINUTE", "60")?;

    let defaults = GeocoderConfig::default();
    let min_interval_ms = parse_u64(
        "BLOODBOND_GEOCODER_MIN_INTERVAL_MS",
        &defaults.min_interval_ms.to_string(),
    )?;
    if min_interval_ms == 0 {
        return Err(invalid(
            "BLOODBOND_GEOCODER_MIN_INTERVAL_MS",
            "must be greater than zero".to_string(),
        ));
    }

    let timeout_secs = parse_u64(
        "BLOODBOND_GEOCODER_TIMEOUT_SECS",
        &defaults.timeout_secs.to_string(),
    )?;
    if timeout_secs == 0 {
        return Err(invalid(
            "BLOODBOND_GEOCODER_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let contact_email = require("BLOODBOND_GEOCODER_CONTACT_EMAIL")?
        .trim()
        .to_string();
    if !contact_email.contains('@') {
        return Err(invalid(
            "BLOODBOND_GEOCODER_CONTACT_EMAIL",
            "must be an email address".to_string(),
        ));
    }

    let geocoder = GeocoderConfig {
        base_url: or_default("BLOODBOND_GEOCODER_BASE_URL", &defaults.base_url),
        user_agent: or_default("BLOODBOND_GEOCODER_USER_AGENT", &defaults.user_agent),
        contact_email,
        timeout_secs,
        min_interval_ms,
        cache_ttl_secs: parse_u64(
            "BLOODBOND_GEOCODER_CACHE_TTL_SECS",
            &defaults.cache_ttl_secs.to_string(),
        )?,
    };

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        api_rate_limit_per_minute,
        geocoder,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
