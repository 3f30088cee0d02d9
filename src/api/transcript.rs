use axum::{Json, extract::Query};
use serde::Deserialize;

use crate::{
    api::ApiError,
    extractor, info, source,
    types::TranscriptResponse,
    warning,
};

#[derive(Debug, Deserialize)]
pub struct TranscriptParams {
    pub url: Option<String>,
}

/// `GET /api/transcript?url=...`
///
/// Resolves the URL to text, extracts the mentions from the full text and
/// returns them with a short preview of what was read.
pub async fn transcript(
    Query(params): Query<TranscriptParams>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing url param"))?;

    let resolved = match source::resolve(&url).await {
        Ok(resolved) => resolved,
        Err(e) => {
            warning!("{} ({})", e, url);
            return Err(ApiError::internal(e.to_string()));
        }
    };

    let albums = extractor::extract(&resolved.text);
    info!("Found {} mentions in {}", albums.len(), url);

    Ok(Json(TranscriptResponse {
        source: resolved.kind,
        video_id: resolved.video_id,
        transcript: source::preview(&resolved.text),
        albums,
    }))
}
