use axum::{Json, extract::Path};
use serde_json::{Value, json};

use crate::{
    api::ApiError,
    downloader, success,
    types::{DownloadEntry, DownloadRequest, DownloadResponse, YtDlpStatus},
};

pub async fn ytdlp_status() -> Json<YtDlpStatus> {
    Json(downloader::status().await)
}

pub async fn list_downloads() -> Result<Json<Vec<DownloadEntry>>, ApiError> {
    Ok(Json(downloader::list().await?))
}

/// `POST /api/download` with `{query, trackId, trackName, artistName}`.
pub async fn download(
    Json(request): Json<DownloadRequest>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let response = downloader::download(&request).await?;
    success!("Downloaded {}", response.filename);
    Ok(Json(response))
}

pub async fn delete_download(Path(filename): Path<String>) -> Result<Json<Value>, ApiError> {
    downloader::delete(&filename).await?;
    Ok(Json(json!({ "success": true })))
}
