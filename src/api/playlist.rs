use axum::{Json, http::StatusCode};

use crate::{
    api::ApiError,
    management::TokenManager,
    spotify, success,
    types::{PlaylistOutcome, PlaylistRequest},
};

/// `POST /api/playlist` with `{url, albums}`.
pub async fn playlist(
    Json(request): Json<PlaylistRequest>,
) -> Result<Json<PlaylistOutcome>, ApiError> {
    if request.albums.is_empty() {
        return Err(ApiError::bad_request("No albums to add"));
    }

    let mut token_mgr = TokenManager::load().await.map_err(|_| {
        ApiError::new(
            StatusCode::UNAUTHORIZED,
            "Not logged in to Spotify. Run musicfinder auth first.",
        )
    })?;
    let token = token_mgr.get_valid_token().await;

    let outcome = spotify::playlist::from_mentions(&token, &request.url, &request.albums, |_, _| {})
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_GATEWAY, format!("Spotify error: {}", e)))?;

    success!(
        "Created playlist '{}' with {} tracks",
        outcome.name,
        outcome.tracks_added
    );
    Ok(Json(outcome))
}
