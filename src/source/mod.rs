//! # Source Module
//!
//! Turns a user supplied URL into the plain text the mention extractor runs on.
//!
//! Two paths exist:
//!
//! - **YouTube** ([`youtube`]) - the video id is parsed from the URL and the
//!   caption track is fetched with yt-dlp, then flattened into one line of text.
//!   Transcripts are cached on disk per video id.
//! - **Web page** ([`webpage`]) - any other URL is fetched over HTTP and its
//!   tags are stripped.
//!
//! Fetched text is capped at `MAX_SOURCE_TEXT_BYTES` before it is handed on.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use url::Url;

use crate::{config, types::SourceKind, utils};

pub mod webpage;
pub mod youtube;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern must compile"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

#[derive(Debug)]
pub enum SourceError {
    Page(String),
    Transcript(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Page(msg) => write!(f, "Could not fetch page: {}", msg),
            SourceError::Transcript(msg) => write!(
                f,
                "Could not fetch transcript: {}. The video may not have captions enabled.",
                msg
            ),
        }
    }
}

impl std::error::Error for SourceError {}

/// Text resolved from a URL, ready for extraction.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub kind: SourceKind,
    pub video_id: Option<String>,
    pub text: String,
}

/// Returns the YouTube video id of `url`, if it is a YouTube link.
///
/// `youtube.com` hosts (including `www.` and `m.`) use the `v` query
/// parameter; `youtu.be` short links use the first path segment.
pub fn extract_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;

    let id = if host.contains("youtube.com") {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    } else if host == "youtu.be" {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(|segment| segment.to_string())
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

/// Replaces every HTML tag with a space and collapses whitespace runs.
pub fn strip_tags(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    WHITESPACE_RE.replace_all(&without_tags, " ").into_owned()
}

/// The first 500 characters of `text` followed by `...`.
pub fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(config::TRANSCRIPT_PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

/// Fetches the text behind `url`: the caption transcript for YouTube links,
/// the tag-stripped page for everything else.
pub async fn resolve(url: &str) -> Result<SourceText, SourceError> {
    let (kind, video_id, mut text) = match extract_video_id(url) {
        Some(video_id) => {
            let text = youtube::fetch_transcript(&video_id).await?;
            (SourceKind::Youtube, Some(video_id), text)
        }
        None => {
            let text = webpage::fetch_webpage(url).await?;
            (SourceKind::Webpage, None, text)
        }
    };

    utils::truncate_to_bytes(&mut text, config::max_source_text_bytes());

    Ok(SourceText {
        kind,
        video_id,
        text,
    })
}
