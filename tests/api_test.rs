use axum::{
    Json,
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
};
use musicfinder::api::{self, ApiError, TranscriptParams, WhoSampledParams};
use musicfinder::downloader::DownloadError;
use musicfinder::types::{DownloadRequest, PlaylistRequest};

#[tokio::test]
async fn test_health() {
    let Json(body) = api::health().await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_transcript_requires_url() {
    let err = api::transcript(Query(TranscriptParams { url: None }))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Missing url param");

    let err = api::transcript(Query(TranscriptParams {
        url: Some("  ".to_string()),
    }))
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_playlist_requires_albums() {
    let request = PlaylistRequest {
        url: "https://example.com/best-of".to_string(),
        albums: Vec::new(),
    };

    let err = api::playlist(Json(request)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_requires_query() {
    let request = DownloadRequest {
        query: None,
        track_id: Some("t1".to_string()),
        track_name: None,
        artist_name: None,
    };

    let err = api::download(Json(request)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_download_rejects_traversal() {
    for name in ["../secret.mp3", "a/b.mp3", "a\\b.mp3"] {
        let err = api::delete_download(Path(name.to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST, "{}", name);
    }
}

#[tokio::test]
async fn test_delete_download_missing_file() {
    let err = api::delete_download(Path("musicfinder-no-such-file.mp3".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_whosampled_requires_artist_and_track() {
    let err = api::whosampled(Query(WhoSampledParams {
        artist: Some("James Brown".to_string()),
        track: None,
    }))
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);

    let err = api::whosampled(Query(WhoSampledParams {
        artist: Some("".to_string()),
        track: Some("Funky Drummer".to_string()),
    }))
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[test]
fn test_download_error_status_codes() {
    let status = |e: DownloadError| ApiError::from(e).status;

    assert_eq!(status(DownloadError::MissingQuery), StatusCode::BAD_REQUEST);
    assert_eq!(
        status(DownloadError::InvalidFilename("../x".to_string())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status(DownloadError::NotFound("x.mp3".to_string())),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        status(DownloadError::Unavailable("missing".to_string())),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        status(DownloadError::Failed("boom".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_api_error_response_status() {
    let response = ApiError::bad_request("Missing url param").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ApiError::internal("Could not fetch page: timeout").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
