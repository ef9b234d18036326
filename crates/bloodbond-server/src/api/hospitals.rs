use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use bloodbond_core::HospitalRecord;
use bloodbond_ranking::{
    validate_user_location, HospitalDistanceEntry, RankError, RankOutcome,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, status_for_code, ApiError, ApiResponse, AppState, ErrorBody, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct NearestQuery {
    #[serde(rename = "userCity", default)]
    pub user_city: Option<String>,
    #[serde(rename = "userState", default)]
    pub user_state: Option<String>,
}

/// One ranked hospital. `distance` is always present (possibly null);
/// coordinates and `geocodingError` appear only when they apply.
#[derive(Debug, Serialize)]
pub(super) struct NearestHospitalItem {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub email: String,
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "geocodingError", skip_serializing_if = "Option::is_none")]
    pub geocoding_error: Option<String>,
}

impl From<HospitalDistanceEntry> for NearestHospitalItem {
    fn from(entry: HospitalDistanceEntry) -> Self {
        let distance = entry.distance_km();
        let coordinates = entry.coordinates();
        let geocoding_error = entry.geocoding_error();
        let HospitalRecord {
            name,
            email,
            location,
        } = entry.hospital;

        Self {
            name,
            city: location.city,
            state: location.state,
            email,
            distance,
            latitude: coordinates.map(|c| c.latitude()),
            longitude: coordinates.map(|c| c.longitude()),
            geocoding_error,
        }
    }
}

/// Bare identity of a hospital, used when distances cannot be computed.
#[derive(Debug, Serialize)]
pub(super) struct HospitalSummaryItem {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct LocationUnresolvedBody {
    pub error: ErrorBody,
    pub hospitals: Vec<HospitalSummaryItem>,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub(super) struct HospitalItem {
    pub id: Uuid,
    pub hospital_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub registration_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<bloodbond_db::HospitalRow> for HospitalItem {
    fn from(row: bloodbond_db::HospitalRow) -> Self {
        Self {
            id: row.public_id,
            hospital_name: row.hospital_name,
            email: row.email,
            phone: row.phone,
            registration_number: row.registration_number,
            city: row.city,
            state: row.state,
            created_at: row.created_at,
        }
    }
}

pub(super) async fn find_nearest_hospitals(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<NearestQuery>,
) -> Response {
    let user_city = params.user_city.unwrap_or_default();
    let user_state = params.user_state.unwrap_or_default();

    // Reject bad input before touching the database.
    if let Err(e) = validate_user_location(&user_city, &user_state) {
        return nearest_response(req_id.0, Err(e));
    }

    let candidates: Vec<HospitalRecord> = match bloodbond_db::list_hospital_directory(&state.pool)
        .await
    {
        Ok(rows) => rows.into_iter().map(HospitalRecord::from).collect(),
        Err(e) => return map_db_error(req_id.0, &e).into_response(),
    };

    let result = state.ranker.rank(&user_city, &user_state, candidates).await;
    nearest_response(req_id.0, result)
}

/// Maps a ranking result onto the HTTP response shapes.
pub(super) fn nearest_response(request_id: String, result: Result<RankOutcome, RankError>) -> Response {
    match result {
        Ok(RankOutcome::Ranked(entries)) => Json(ApiResponse {
            data: entries
                .into_iter()
                .map(NearestHospitalItem::from)
                .collect::<Vec<_>>(),
            meta: ResponseMeta::new(request_id),
        })
        .into_response(),
        Ok(RankOutcome::NoUserLocation { query, hospitals }) => {
            let code = "location_unresolved";
            let body = LocationUnresolvedBody {
                error: ErrorBody {
                    code: code.to_string(),
                    message: format!(
                        "Could not determine coordinates for user location: {query}. Unable to calculate distances."
                    ),
                },
                hospitals: hospitals
                    .into_iter()
                    .map(|h| HospitalSummaryItem {
                        name: h.name,
                        city: h.location.city,
                        state: h.location.state,
                    })
                    .collect(),
                meta: ResponseMeta::new(request_id),
            };
            (status_for_code(code), Json(body)).into_response()
        }
        Err(RankError::BadRequest(message)) => {
            ApiError::new(request_id, "bad_request", message).into_response()
        }
        Err(RankError::DirectoryEmpty) => ApiError::new(
            request_id,
            "not_found",
            "No hospitals found in the database.",
        )
        .into_response(),
        Err(RankError::ProviderUnavailable { .. }) => ApiError::new(
            request_id,
            "geocoder_unavailable",
            "Location service is temporarily unavailable; please retry shortly.",
        )
        .into_response(),
    }
}

pub(super) async fn list_hospitals(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<HospitalItem>>>, ApiError> {
    let rows = bloodbond_db::list_hospitals(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(HospitalItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_hospital(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(public_id): Path<String>,
) -> Result<Json<ApiResponse<HospitalItem>>, ApiError> {
    let public_id = Uuid::parse_str(&public_id).map_err(|_| {
        ApiError::new(
            req_id.0.clone(),
            "bad_request",
            "Invalid hospital ID",
        )
    })?;

    let row = bloodbond_db::get_hospital_by_public_id(&state.pool, public_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "Hospital not found"))?;

    Ok(Json(ApiResponse {
        data: HospitalItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}
