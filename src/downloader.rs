//! yt-dlp integration for fetching tracks as MP3 files.
//!
//! Tracks are located with a `ytsearch1:` query (best match on YouTube),
//! converted to MP3 by yt-dlp and stored in the download directory. The
//! directory doubles as the index of what has been downloaded: file names
//! start with the track id they were requested for.

use std::{fmt, path::PathBuf};

use crate::{
    config,
    types::{DownloadEntry, DownloadRequest, DownloadResponse, YtDlpStatus},
    utils,
};

#[derive(Debug)]
pub enum DownloadError {
    MissingQuery,
    Unavailable(String),
    Failed(String),
    InvalidFilename(String),
    NotFound(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        DownloadError::Io(err)
    }
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::MissingQuery => write!(f, "Missing query"),
            DownloadError::Unavailable(msg) => write!(f, "yt-dlp is not available: {}", msg),
            DownloadError::Failed(msg) => write!(f, "Download failed: {}", msg),
            DownloadError::InvalidFilename(name) => write!(f, "Invalid filename: {}", name),
            DownloadError::NotFound(name) => write!(f, "File not found: {}", name),
            DownloadError::Io(e) => write!(f, "File system error: {}", e),
        }
    }
}

impl std::error::Error for DownloadError {}

/// Checks whether yt-dlp can be run and reports its version.
pub async fn status() -> YtDlpStatus {
    let output = tokio::process::Command::new(config::ytdlp_bin())
        .arg("--version")
        .output()
        .await;

    match output {
        Ok(out) if out.status.success() => YtDlpStatus {
            available: true,
            version: Some(String::from_utf8_lossy(&out.stdout).trim().to_string()),
        },
        _ => YtDlpStatus {
            available: false,
            version: None,
        },
    }
}

/// File name stem for a download request: `<trackId>_<artist - track>`, or
/// the query alone when no track id is given. Always filesystem safe.
pub fn file_stem(request: &DownloadRequest) -> Option<String> {
    let query = request.query.as_deref().map(str::trim).filter(|q| !q.is_empty())?;

    let label = match (request.artist_name.as_deref(), request.track_name.as_deref()) {
        (Some(artist), Some(track)) if !artist.trim().is_empty() && !track.trim().is_empty() => {
            format!("{} - {}", artist.trim(), track.trim())
        }
        _ => query.to_string(),
    };

    let stem = match request.track_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => format!(
            "{}_{}",
            utils::sanitize_filename(id),
            utils::sanitize_filename(&label)
        ),
        _ => utils::sanitize_filename(&label),
    };

    Some(stem)
}

/// Rejects names that could point outside the download directory.
pub fn validate_filename(filename: &str) -> Result<(), DownloadError> {
    let bad = filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
        || filename.contains('\0');

    if bad {
        Err(DownloadError::InvalidFilename(filename.to_string()))
    } else {
        Ok(())
    }
}

/// Searches for `request.query` and stores the best match as MP3.
pub async fn download(request: &DownloadRequest) -> Result<DownloadResponse, DownloadError> {
    let stem = file_stem(request).ok_or(DownloadError::MissingQuery)?;
    let query = request.query.as_deref().unwrap_or_default().trim();

    let ytdlp = status().await;
    if !ytdlp.available {
        return Err(DownloadError::Unavailable(format!(
            "'{}' could not be executed",
            config::ytdlp_bin()
        )));
    }

    let dir = config::download_dir();
    tokio::fs::create_dir_all(&dir).await?;

    let output_template = dir.join(format!("{}.%(ext)s", stem));
    let output = tokio::process::Command::new(config::ytdlp_bin())
        .arg("--extract-audio")
        .arg("--audio-format")
        .arg("mp3")
        .arg("--audio-quality")
        .arg("0")
        .arg("--no-playlist")
        .arg("--no-warnings")
        .arg("--output")
        .arg(&output_template)
        .arg(format!("ytsearch1:{}", query))
        .output()
        .await
        .map_err(|e| DownloadError::Failed(format!("failed to run yt-dlp: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DownloadError::Failed(stderr.trim().to_string()));
    }

    let filename = format!("{}.mp3", stem);
    let metadata = tokio::fs::metadata(dir.join(&filename))
        .await
        .map_err(|_| DownloadError::Failed(format!("no audio produced for '{}'", query)))?;

    Ok(DownloadResponse {
        success: true,
        filename,
        size: metadata.len(),
    })
}

/// All MP3 files in the download directory, sorted by name. A missing
/// directory means nothing has been downloaded yet.
pub async fn list() -> Result<Vec<DownloadEntry>, DownloadError> {
    let dir = config::download_dir();
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut downloads = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let filename = entry.file_name().to_string_lossy().into_owned();
        if !filename.to_ascii_lowercase().ends_with(".mp3") {
            continue;
        }
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }

        downloads.push(DownloadEntry {
            url: format!("/downloads/{}", filename),
            size: metadata.len(),
            filename,
        });
    }

    downloads.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(downloads)
}

fn existing_file(filename: &str) -> Result<PathBuf, DownloadError> {
    validate_filename(filename)?;
    let path = config::download_dir().join(filename);
    if path.is_file() {
        Ok(path)
    } else {
        Err(DownloadError::NotFound(filename.to_string()))
    }
}

pub async fn delete(filename: &str) -> Result<(), DownloadError> {
    let path = existing_file(filename)?;
    tokio::fs::remove_file(path).await?;
    Ok(())
}
