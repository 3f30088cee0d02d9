use musicfinder::source::{
    SourceError, extract_video_id, preview, strip_tags,
    youtube::{is_valid_video_id, parse_vtt},
};

#[test]
fn test_extract_video_id_watch_urls() {
    assert_eq!(
        extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
        Some("dQw4w9WgXcQ".to_string())
    );
    assert_eq!(
        extract_video_id("https://youtube.com/watch?feature=share&v=abc123"),
        Some("abc123".to_string())
    );
    assert_eq!(
        extract_video_id("https://m.youtube.com/watch?v=xyz_-9"),
        Some("xyz_-9".to_string())
    );
}

#[test]
fn test_extract_video_id_short_urls() {
    assert_eq!(
        extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
        Some("dQw4w9WgXcQ".to_string())
    );
    assert_eq!(
        extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"),
        Some("dQw4w9WgXcQ".to_string())
    );
}

#[test]
fn test_extract_video_id_rejects_other_urls() {
    assert_eq!(extract_video_id("https://www.youtube.com/watch"), None);
    assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), None);
    assert_eq!(extract_video_id("https://youtu.be/"), None);
    assert_eq!(extract_video_id("https://example.com/watch?v=abc"), None);
    assert_eq!(extract_video_id("not a url"), None);
}

#[test]
fn test_is_valid_video_id() {
    assert!(is_valid_video_id("dQw4w9WgXcQ"));
    assert!(is_valid_video_id("a-b_c"));
    assert!(!is_valid_video_id(""));
    assert!(!is_valid_video_id("../etc"));
    assert!(!is_valid_video_id("abc def"));
}

#[test]
fn test_strip_tags() {
    assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), " Hello world ");
    assert_eq!(strip_tags("no tags\n\n at   all"), "no tags at all");
}

#[test]
fn test_strip_tags_keeps_quotes_for_extraction() {
    let html = r#"<li><em>"Nevermind"</em> by <a href="/nirvana">Nirvana</a></li>"#;
    assert_eq!(strip_tags(html), r#" "Nevermind" by Nirvana "#);
}

#[test]
fn test_preview() {
    assert_eq!(preview("short"), "short...");

    let long = "a".repeat(600);
    let p = preview(&long);
    assert_eq!(p.len(), 503);
    assert!(p.ends_with("..."));

    // Counted in characters, not bytes
    let accented = "é".repeat(600);
    assert_eq!(preview(&accented).chars().count(), 503);
}

#[test]
fn test_parse_vtt() {
    let vtt = "WEBVTT
Kind: captions
Language: en

00:00:00.000 --> 00:00:02.000 align:start position:0%
Check out <c>\"Thriller\"</c> by Michael Jackson

00:00:02.000 --> 00:00:04.000 align:start position:0%
Check out <c>\"Thriller\"</c> by Michael Jackson
it&#39;s great

NOTE this is a comment
spanning two lines

1
00:00:04.000 --> 00:00:05.000
the end
";

    assert_eq!(
        parse_vtt(vtt),
        "Check out \"Thriller\" by Michael Jackson it's great the end"
    );
}

#[test]
fn test_parse_vtt_empty() {
    assert_eq!(parse_vtt(""), "");
    assert_eq!(parse_vtt("WEBVTT\n\n"), "");
}

#[test]
fn test_source_error_display() {
    assert_eq!(
        SourceError::Page("timeout".to_string()).to_string(),
        "Could not fetch page: timeout"
    );
    assert_eq!(
        SourceError::Transcript("no captions found".to_string()).to_string(),
        "Could not fetch transcript: no captions found. The video may not have captions enabled."
    );
}
