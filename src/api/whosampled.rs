use axum::{Json, extract::Query, http::StatusCode};
use serde::Deserialize;

use crate::{api::ApiError, types::SampleReport, whosampled as lookup};

#[derive(Debug, Deserialize)]
pub struct WhoSampledParams {
    pub artist: Option<String>,
    pub track: Option<String>,
}

/// `GET /api/whosampled?artist=...&track=...`
pub async fn whosampled(
    Query(params): Query<WhoSampledParams>,
) -> Result<Json<SampleReport>, ApiError> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let (Some(artist), Some(track)) = (non_empty(params.artist), non_empty(params.track)) else {
        return Err(ApiError::bad_request("Missing artist or track param"));
    };

    let report = lookup::lookup(&artist, &track)
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_GATEWAY, format!("Sample lookup failed: {}", e)))?;

    Ok(Json(report))
}
