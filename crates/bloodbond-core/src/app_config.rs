use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings for the outbound geocoding provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Contact address the provider's usage policy requires on every request.
    pub contact_email: String,
    pub timeout_secs: u64,
    /// Minimum gap between consecutive outbound lookups, process-wide.
    pub min_interval_ms: u64,
    /// `0` disables the lookup cache.
    pub cache_ttl_secs: u64,
}

impl GeocoderConfig {
    /// `User-Agent` value identifying this deployment to the provider: the
    /// agent tag followed by the contact address in parentheses.
    #[must_use]
    pub fn identifying_user_agent(&self) -> String {
        format!("{} ({})", self.user_agent, self.contact_email)
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "BloodConnectionApp/1.0".to_string(),
            contact_email: "geocoding@bloodbond.invalid".to_string(),
            timeout_secs: 10,
            min_interval_ms: 1_000,
            cache_ttl_secs: 0,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub api_rate_limit_per_minute: usize,
    pub geocoder: GeocoderConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("api_rate_limit_per_minute", &self.api_rate_limit_per_minute)
            .field("geocoder", &self.geocoder)
            .finish()
    }
}
