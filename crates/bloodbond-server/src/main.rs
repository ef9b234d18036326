mod api;
mod middleware;

use std::sync::Arc;

use bloodbond_geocoder::{GeocodeCache, NominatimClient, RequestPacer};
use bloodbond_ranking::HospitalRanker;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = bloodbond_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = bloodbond_db::PoolConfig::from_app_config(&config);
    let pool = bloodbond_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = bloodbond_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    // One pacer for the whole process so concurrent requests share the
    // provider's rate budget.
    let pacer = Arc::new(RequestPacer::from_millis(config.geocoder.min_interval_ms));
    let client = NominatimClient::new(&config.geocoder)?;
    let ranker = HospitalRanker::new(client, pacer)
        .with_cache(GeocodeCache::from_ttl_secs(config.geocoder.cache_ttl_secs));

    let app = build_app(
        AppState {
            pool,
            ranker: Arc::new(ranker),
        },
        RateLimitState::per_minute(config.api_rate_limit_per_minute),
    );

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        geocoder = %config.geocoder.base_url,
        min_interval_ms = config.geocoder.min_interval_ms,
        "starting bloodbond-server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
