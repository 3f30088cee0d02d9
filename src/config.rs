//! Configuration management for musicfinder.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings, the external
//! downloader and the sample lookup service.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::warning;

/// Characters of fetched text shown back to the user as a preview.
pub const TRANSCRIPT_PREVIEW_CHARS: usize = 500;

/// User agent sent when scraping web pages.
pub const SCRAPER_USER_AGENT: &str = "Mozilla/5.0 (compatible; MusicFinderBot/1.0)";

/// Returns the application data directory.
///
/// `MUSICFINDER_DATA_DIR` wins when set, otherwise the platform local data
/// directory is used:
/// - Linux: `~/.local/share/musicfinder`
/// - macOS: `~/Library/Application Support/musicfinder`
/// - Windows: `%LOCALAPPDATA%/musicfinder`
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("MUSICFINDER_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("musicfinder");
    path
}

/// Loads environment variables from the `.env` file in the data directory.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is
/// not an error; every setting has either a default or is only required by the
/// feature that uses it.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
///
/// # Example
///
/// ```
/// use musicfinder::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        if let Err(e) = dotenv::from_path(&path) {
            warning!("Ignoring unreadable {}: {}", path.display(), e);
        }
    }

    Ok(())
}

fn var_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn required(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} must be set", name)),
    }
}

/// Address the HTTP server binds to, e.g. `127.0.0.1:3001`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", "127.0.0.1:3001")
}

/// Returns the Spotify API client ID for authentication.
///
/// # Errors
///
/// Fails when `SPOTIFY_API_AUTH_CLIENT_ID` is not set; Spotify features cannot
/// work without it.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application
/// settings and point at this application's `/callback` route.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:3001/callback")
}

/// Returns the Spotify API scope permissions requested during authorization.
pub fn spotify_scope() -> String {
    var_or(
        "SPOTIFY_API_AUTH_SCOPE",
        "playlist-modify-private playlist-modify-public",
    )
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    var_or(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    var_or(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

/// Name or path of the yt-dlp executable.
pub fn ytdlp_bin() -> String {
    var_or("YTDLP_BIN", "yt-dlp")
}

/// Directory downloaded MP3 files are written to.
pub fn download_dir() -> PathBuf {
    match env::var("DOWNLOAD_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => data_dir().join("downloads"),
    }
}

/// RapidAPI key for live sample lookups. `None` switches to demo data.
pub fn rapidapi_key() -> Option<String> {
    env::var("RAPIDAPI_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// RapidAPI host of the sample lookup service.
pub fn whosampled_api_host() -> String {
    var_or("WHOSAMPLED_API_HOST", "whosampled-api.p.rapidapi.com")
}

/// Upper bound on fetched source text handed to the extractor.
pub fn max_source_text_bytes() -> usize {
    env::var("MAX_SOURCE_TEXT_BYTES")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(2 * 1024 * 1024)
}
