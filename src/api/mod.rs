//! # API Module
//!
//! HTTP endpoints of the local musicfinder server.
//!
//! ## Endpoints
//!
//! ### Parsing
//!
//! - [`transcript`] - `GET /api/transcript?url=` resolves a YouTube video or a
//!   web page to text and returns the music mentions found in it.
//! - [`playlist`] - `POST /api/playlist` turns mentions into a Spotify playlist
//!   using the token saved by `musicfinder auth`.
//!
//! ### Sample Lab
//!
//! - [`ytdlp_status`] - `GET /api/ytdlp-status`
//! - [`list_downloads`] - `GET /api/downloads`
//! - [`download`] - `POST /api/download`
//! - [`delete_download`] - `DELETE /api/downloads/{filename}`
//! - [`whosampled`] - `GET /api/whosampled?artist=&track=`
//!
//! ### Authentication & Monitoring
//!
//! - [`callback`] - Spotify OAuth PKCE callback
//! - [`health`] - status and version
//!
//! Failures are reported as `{"error": "..."}` with a matching status code,
//! see [`ApiError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::downloader::DownloadError;

mod callback;
mod downloads;
mod health;
mod playlist;
mod transcript;
mod whosampled;

pub use callback::callback;
pub use downloads::{delete_download, download, list_downloads, ytdlp_status};
pub use health::health;
pub use playlist::playlist;
pub use transcript::{TranscriptParams, transcript};
pub use whosampled::{WhoSampledParams, whosampled};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<DownloadError> for ApiError {
    fn from(err: DownloadError) -> Self {
        let status = match &err {
            DownloadError::MissingQuery | DownloadError::InvalidFilename(_) => {
                StatusCode::BAD_REQUEST
            }
            DownloadError::NotFound(_) => StatusCode::NOT_FOUND,
            DownloadError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            DownloadError::Failed(_) | DownloadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, err.to_string())
    }
}
