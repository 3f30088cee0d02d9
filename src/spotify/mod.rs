//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API that musicfinder
//! needs to turn extracted mentions into a playlist: authentication, catalog
//! search and playlist management.
//!
//! ## Architecture
//!
//! ```text
//! CLI / HTTP API
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Search (mention → album → first track)
//!     └── Playlist Operations (Create, Add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: code verifier/challenge, local callback
//!   server, browser launch, token exchange and refresh.
//! - [`search`] - Resolves an `(artist, title)` mention to an album with
//!   `album:<title> artist:<artist>` and picks the album's first track.
//! - [`playlist`] - Creates private playlists and adds tracks in batches of 100.
//!
//! ## Error Handling
//!
//! All requests go through [`send_with_retry`]:
//! - **502 Bad Gateway** is retried after 10 seconds.
//! - **429 Too Many Requests** honours the `Retry-After` header for delays up
//!   to 120 seconds; longer delays are reported and returned as errors.
//! - Every other non-success status is returned as a `reqwest::Error`.
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user id for playlist creation
//! - `GET /search` - Album search
//! - `GET /albums/{id}/tracks` - First track of an album
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to playlists
//! - `POST /api/token` - Token exchange and refresh operations

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::warning;

pub mod auth;
pub mod playlist;
pub mod search;

const MAX_ATTEMPTS: u32 = 4;
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Sends the request built by `build`, retrying on 502 and on 429 as long as
/// Spotify's `Retry-After` stays reasonable.
pub async fn send_with_retry<F>(build: F) -> Result<Response, reqwest::Error>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 1;

    loop {
        let response = build().send().await?;
        let status = response.status();

        if attempt < MAX_ATTEMPTS && status == StatusCode::BAD_GATEWAY {
            attempt += 1;
            sleep(Duration::from_secs(10)).await;
            continue;
        }

        if attempt < MAX_ATTEMPTS && status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(1);

            if retry_after <= MAX_RETRY_AFTER_SECS {
                attempt += 1;
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            warning!(
                "Spotify asks to retry after {} seconds. Try again later.",
                retry_after
            );
        }

        return response.error_for_status();
    }
}
