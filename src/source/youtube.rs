//! YouTube caption transcripts.
//!
//! Captions are downloaded with yt-dlp (manual English subtitles first, auto
//! generated ones as fallback) in WebVTT format and flattened into plain text.

use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{config, management::TranscriptCache, source::SourceError, warning};

use super::TAG_RE;

/// Returns true for ids made of the characters YouTube uses (`A-Z a-z 0-9 - _`).
pub fn is_valid_video_id(video_id: &str) -> bool {
    !video_id.is_empty()
        && video_id.len() <= 64
        && video_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Returns the transcript of `video_id` as a single line of text.
///
/// Served from the transcript cache when possible; freshly downloaded
/// transcripts are written back to it. Cache failures only warn.
pub async fn fetch_transcript(video_id: &str) -> Result<String, SourceError> {
    if !is_valid_video_id(video_id) {
        return Err(SourceError::Transcript(format!(
            "invalid video id '{}'",
            video_id
        )));
    }

    let cache = TranscriptCache::new();
    match cache.get(video_id).await {
        Ok(Some(transcript)) => return Ok(transcript),
        Ok(None) => {}
        Err(e) => warning!("Transcript cache unreadable for {}: {}", video_id, e),
    }

    let transcript = download_captions(video_id).await?;

    if let Err(e) = cache.put(video_id, &transcript).await {
        warning!("Failed to cache transcript for {}: {}", video_id, e);
    }

    Ok(transcript)
}

async fn download_captions(video_id: &str) -> Result<String, SourceError> {
    let workdir = scratch_dir(video_id);
    tokio::fs::create_dir_all(&workdir)
        .await
        .map_err(|e| SourceError::Transcript(format!("cannot create work dir: {}", e)))?;

    let result = run_ytdlp(video_id, &workdir).await;

    if let Err(e) = tokio::fs::remove_dir_all(&workdir).await {
        warning!("Failed to clean up {}: {}", workdir.display(), e);
    }

    result
}

async fn run_ytdlp(video_id: &str, workdir: &Path) -> Result<String, SourceError> {
    let output_template = workdir.join("%(id)s");
    let video_url = format!("https://www.youtube.com/watch?v={}", video_id);

    let output = tokio::process::Command::new(config::ytdlp_bin())
        .arg("--write-sub")
        .arg("--write-auto-sub")
        .arg("--sub-lang")
        .arg("en,en-US,en-GB")
        .arg("--sub-format")
        .arg("vtt")
        .arg("--skip-download")
        .arg("--no-warnings")
        .arg("--output")
        .arg(&output_template)
        .arg(&video_url)
        .output()
        .await
        .map_err(|e| SourceError::Transcript(format!("failed to run yt-dlp: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SourceError::Transcript(format!(
            "yt-dlp failed: {}",
            stderr.trim()
        )));
    }

    let mut vtt_files: Vec<PathBuf> = std::fs::read_dir(workdir)
        .map_err(|e| SourceError::Transcript(format!("cannot read work dir: {}", e)))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("vtt"))
        .collect();

    if vtt_files.is_empty() {
        return Err(SourceError::Transcript("no captions found".to_string()));
    }

    // plain ".en.vtt" before regional variants
    vtt_files.sort_by_key(|path| {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        match name.as_deref() {
            Some(n) if n.ends_with(".en.vtt") => 0,
            Some(n) if n.contains(".en") => 1,
            _ => 2,
        }
    });

    let content = tokio::fs::read_to_string(&vtt_files[0])
        .await
        .map_err(|e| SourceError::Transcript(format!("cannot read captions: {}", e)))?;

    let transcript = parse_vtt(&content);
    if transcript.is_empty() {
        return Err(SourceError::Transcript("captions are empty".to_string()));
    }

    Ok(transcript)
}

fn scratch_dir(video_id: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("musicfinder-{}-{}", video_id, nanos))
}

/// Flattens a WebVTT document into the spoken text, joined by single spaces.
///
/// Drops the header block, cue identifiers, timing lines, `NOTE`/`STYLE`
/// blocks and inline tags. Auto generated captions repeat each line in the
/// following cue; consecutive duplicate lines are kept once.
pub fn parse_vtt(content: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut skipping_block = false;

    for raw in content.lines() {
        let line = raw.trim();

        if line.is_empty() {
            skipping_block = false;
            continue;
        }
        if skipping_block {
            continue;
        }
        if line.starts_with("WEBVTT") || line.starts_with("NOTE") || line.starts_with("STYLE") {
            skipping_block = true;
            continue;
        }
        if line.contains("-->")
            || line.starts_with("Kind:")
            || line.starts_with("Language:")
            || line.chars().all(|c| c.is_ascii_digit())
        {
            continue;
        }

        let text = decode_entities(&TAG_RE.replace_all(line, ""));
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if lines.last().map(|last| last == text).unwrap_or(false) {
            continue;
        }
        lines.push(text.to_string());
    }

    lines.join(" ")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
