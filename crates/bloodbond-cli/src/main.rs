mod hospitals;
mod lookup;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::hospitals::HospitalsCommands;

#[derive(Debug, Parser)]
#[command(name = "bloodbond-cli")]
#[command(about = "BloodBond hospital directory and distance tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Manage the hospital directory
    Hospitals {
        #[command(subcommand)]
        command: HospitalsCommands,
    },
    /// Resolve a free-text location to coordinates
    Geocode {
        /// Location to look up (e.g. "Jaipur, Rajasthan")
        query: String,
    },
    /// Rank registered hospitals by distance from a city/state
    Nearest {
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("bloodbond-cli: no command given; run with --help for usage");
        return Ok(());
    };

    let config = bloodbond_core::load_app_config()?;
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_filter = build_env_filter(rust_log.as_deref(), &config.log_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Geocode { query } => lookup::run_geocode(&config, &query).await,
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    bloodbond_db::ping(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = bloodbond_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
            Ok(())
        }
        Commands::Hospitals { command } => {
            let pool = connect(&config).await?;
            hospitals::run(&pool, command).await
        }
        Commands::Nearest { city, state } => {
            let pool = connect(&config).await?;
            lookup::run_nearest(&pool, &config, &city, &state).await
        }
    }
}

/// `RUST_LOG` wins when set; otherwise the configured `BLOODBOND_LOG_LEVEL`.
fn build_env_filter(
    rust_log: Option<&str>,
    log_level: &str,
) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_new(rust_log.unwrap_or(log_level))
}

async fn connect(config: &bloodbond_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = bloodbond_db::PoolConfig::from_app_config(config);
    Ok(bloodbond_db::connect_pool(&config.database_url, pool_config).await?)
}

#[cfg(test)]
mod tests;
