//! Database operations for the `hospitals` table.

use bloodbond_core::{HospitalRecord, Location};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// Input record for registering a hospital.
#[derive(Debug, Clone)]
pub struct NewHospital {
    pub hospital_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub registration_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// A full row from the `hospitals` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HospitalRow {
    pub id: i64,
    pub public_id: Uuid,
    pub hospital_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub registration_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The narrow projection used as the ranking candidate set.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HospitalDirectoryRow {
    pub hospital_name: String,
    pub email: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl From<HospitalDirectoryRow> for HospitalRecord {
    fn from(row: HospitalDirectoryRow) -> Self {
        HospitalRecord {
            name: row.hospital_name,
            email: row.email,
            location: Location {
                city: row.city,
                state: row.state,
            },
        }
    }
}

/// Read the candidate set for nearest-hospital ranking.
///
/// Ordered by `id ASC` so repeated requests see candidates in the same order.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_hospital_directory(
    pool: &PgPool,
) -> Result<Vec<HospitalDirectoryRow>, sqlx::Error> {
    sqlx::query_as::<_, HospitalDirectoryRow>(
        "SELECT hospital_name, email, city, state \
         FROM hospitals \
         ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}

/// List every hospital, oldest registration first.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_hospitals(pool: &PgPool) -> Result<Vec<HospitalRow>, sqlx::Error> {
    sqlx::query_as::<_, HospitalRow>(
        "SELECT id, public_id, hospital_name, email, phone, registration_number, \
                city, state, created_at, updated_at \
         FROM hospitals \
         ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}

/// Fetch one hospital by its public UUID.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_hospital_by_public_id(
    pool: &PgPool,
    public_id: Uuid,
) -> Result<Option<HospitalRow>, sqlx::Error> {
    sqlx::query_as::<_, HospitalRow>(
        "SELECT id, public_id, hospital_name, email, phone, registration_number, \
                city, state, created_at, updated_at \
         FROM hospitals \
         WHERE public_id = $1",
    )
    .bind(public_id)
    .fetch_optional(pool)
    .await
}

/// Insert a hospital. The email is stored lowercased and trimmed; blank
/// city/state values are stored as NULL.
///
/// # Errors
///
/// Returns [`DbError::DuplicateEmail`] if the email is already registered,
/// or [`DbError::Sqlx`] for any other database failure.
pub async fn insert_hospital(pool: &PgPool, new: &NewHospital) -> Result<HospitalRow, DbError> {
    let email = new.email.trim().to_lowercase();

    sqlx::query_as::<_, HospitalRow>(
        "INSERT INTO hospitals \
            (hospital_name, email, phone, registration_number, city, state) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, public_id, hospital_name, email, phone, registration_number, \
                   city, state, created_at, updated_at",
    )
    .bind(new.hospital_name.trim())
    .bind(&email)
    .bind(new.phone.as_deref())
    .bind(new.registration_number.as_deref())
    .bind(non_blank(new.city.as_deref()))
    .bind(non_blank(new.state.as_deref()))
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            DbError::DuplicateEmail(email.clone())
        }
        other => DbError::Sqlx(other),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
