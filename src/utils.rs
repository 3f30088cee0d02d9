use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{MentionCandidate, MentionTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Human readable file size: `—` for zero, whole KB below one MB, else MB
/// with one decimal.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "—".to_string();
    }

    let mb = 1024.0 * 1024.0;
    let bytes = bytes as f64;
    if bytes < mb {
        format!("{:.0} KB", bytes / 1024.0)
    } else {
        format!("{:.1} MB", bytes / mb)
    }
}

/// Makes `name` safe to use as a file name stem.
///
/// Path separators, reserved characters and control characters become `_`,
/// whitespace runs collapse to a single space and the result is capped at
/// 120 characters. Never returns an empty string.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_space = false;

    for c in name.trim().chars() {
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
            continue;
        }
        last_space = false;

        match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => out.push('_'),
            c if c.is_control() => out.push('_'),
            c => out.push(c),
        }
    }

    let mut out: String = out.trim().chars().take(120).collect();
    while out.contains("..") {
        out = out.replace("..", ".");
    }
    let out = out.trim_matches('.').trim().to_string();
    if out.is_empty() {
        "untitled".to_string()
    } else {
        out
    }
}

/// Cuts `text` to at most `max_bytes` without splitting a character.
pub fn truncate_to_bytes(text: &mut String, max_bytes: usize) {
    if text.len() <= max_bytes {
        return;
    }

    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}

pub fn mention_table_rows(mentions: &[MentionCandidate]) -> Vec<MentionTableRow> {
    mentions
        .iter()
        .enumerate()
        .map(|(i, m)| MentionTableRow {
            rank: i + 1,
            artist: m.artist.clone(),
            title: m.title.clone(),
        })
        .collect()
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
