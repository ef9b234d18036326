//! Hospital directory commands.

use clap::Subcommand;

use bloodbond_db::{DbError, NewHospital};

/// Sub-commands available under `hospitals`.
#[derive(Debug, Subcommand)]
pub enum HospitalsCommands {
    /// Register a hospital
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        registration_number: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
    },
    /// List registered hospitals in registration order
    List,
}

pub(crate) async fn run(pool: &sqlx::PgPool, command: HospitalsCommands) -> anyhow::Result<()> {
    match command {
        HospitalsCommands::Add {
            name,
            email,
            phone,
            registration_number,
            city,
            state,
        } => {
            let new = NewHospital {
                hospital_name: name,
                email,
                phone,
                registration_number,
                city,
                state,
            };
            run_hospitals_add(pool, &new).await
        }
        HospitalsCommands::List => run_hospitals_list(pool).await,
    }
}

/// Insert a hospital and print its public ID.
///
/// # Errors
///
/// Returns an error if the email is already registered or the insert fails.
async fn run_hospitals_add(pool: &sqlx::PgPool, new: &NewHospital) -> anyhow::Result<()> {
    if new.hospital_name.trim().is_empty() || new.email.trim().is_empty() {
        anyhow::bail!("hospital name and email are required");
    }

    match bloodbond_db::insert_hospital(pool, new).await {
        Ok(row) => {
            if row.city.is_none() || row.state.is_none() {
                tracing::warn!(
                    hospital = %row.hospital_name,
                    "registered without city/state; it will never receive a distance"
                );
            }
            println!("registered {} ({})", row.hospital_name, row.public_id);
            Ok(())
        }
        Err(DbError::DuplicateEmail(email)) => {
            anyhow::bail!("a hospital with email {email} is already registered")
        }
        Err(e) => Err(e.into()),
    }
}

async fn run_hospitals_list(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let rows = bloodbond_db::list_hospitals(pool).await?;

    if rows.is_empty() {
        println!("no hospitals registered; run `hospitals add` first");
        return Ok(());
    }

    println!("{:<38}{:<32}{:<20}{:<20}EMAIL", "ID", "NAME", "CITY", "STATE");
    for row in &rows {
        println!(
            "{:<38}{:<32}{:<20}{:<20}{}",
            row.public_id,
            row.hospital_name,
            row.city.as_deref().unwrap_or("-"),
            row.state.as_deref().unwrap_or("-"),
            row.email
        );
    }

    Ok(())
}
