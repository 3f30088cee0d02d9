use musicfinder::downloader::{DownloadError, file_stem, validate_filename};
use musicfinder::spotify::{
    auth::token_from_json,
    playlist::{playlist_description_for, playlist_name_for},
    search::search_query,
};
use musicfinder::types::{DownloadRequest, MentionCandidate};
use musicfinder::whosampled::{demo_report, parse_samples};
use serde_json::json;

// Helper function to create a download request
fn create_test_request(
    query: Option<&str>,
    track_id: Option<&str>,
    track_name: Option<&str>,
    artist_name: Option<&str>,
) -> DownloadRequest {
    DownloadRequest {
        query: query.map(str::to_string),
        track_id: track_id.map(str::to_string),
        track_name: track_name.map(str::to_string),
        artist_name: artist_name.map(str::to_string),
    }
}

#[test]
fn test_file_stem_with_track_id() {
    let request = create_test_request(
        Some("James Brown Funky Drummer"),
        Some("5ByAIlEEnxYdvpnezg7HTX"),
        Some("Funky Drummer"),
        Some("James Brown"),
    );

    assert_eq!(
        file_stem(&request).as_deref(),
        Some("5ByAIlEEnxYdvpnezg7HTX_James Brown - Funky Drummer")
    );
}

#[test]
fn test_file_stem_query_only() {
    let request = create_test_request(Some("AC/DC Back in Black"), None, None, None);
    assert_eq!(file_stem(&request).as_deref(), Some("AC_DC Back in Black"));
}

#[test]
fn test_file_stem_without_query() {
    assert_eq!(file_stem(&create_test_request(None, Some("t1"), None, None)), None);
    assert_eq!(file_stem(&create_test_request(Some("   "), None, None, None)), None);
}

#[test]
fn test_validate_filename() {
    assert!(validate_filename("t1_James Brown - Funky Drummer.mp3").is_ok());
    assert!(validate_filename("").is_err());
    assert!(validate_filename("../vault.json").is_err());
    assert!(validate_filename("sub/dir.mp3").is_err());
    assert!(validate_filename("sub\\dir.mp3").is_err());
    assert!(validate_filename("nul\0.mp3").is_err());
}

#[test]
fn test_download_error_display() {
    assert_eq!(DownloadError::MissingQuery.to_string(), "Missing query");
    assert_eq!(
        DownloadError::NotFound("x.mp3".to_string()).to_string(),
        "File not found: x.mp3"
    );
}

#[test]
fn test_parse_samples_from_array() {
    let json = json!([
        { "type": "sample", "title": "Funky Drummer", "artist": "James Brown", "year": 1970 },
        { "track": "Amen, Brother", "artist_name": "The Winstons", "year": "1969" },
        { "title": "No artist here" }
    ]);

    let hits = parse_samples(&json);

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].kind, "sample");
    assert_eq!(hits[0].year, Some(1970));
    assert_eq!(hits[1].title, "Amen, Brother");
    assert_eq!(hits[1].artist, "The Winstons");
    assert_eq!(hits[1].kind, "sample");
    assert_eq!(hits[1].year, Some(1969));
}

#[test]
fn test_parse_samples_from_object() {
    let json = json!({
        "results": [
            { "sample_type": "interpolation", "name": "Impeach the President", "artist": "The Honey Drippers" }
        ]
    });

    let hits = parse_samples(&json);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kind, "interpolation");
    assert_eq!(hits[0].year, None);
}

#[test]
fn test_parse_samples_unexpected_shape() {
    assert!(parse_samples(&json!({ "message": "quota exceeded" })).is_empty());
    assert!(parse_samples(&json!("nope")).is_empty());
}

#[test]
fn test_demo_report() {
    let report = demo_report();

    assert!(report.mock);
    assert_eq!(report.samples.len(), 3);
    assert_eq!(report.samples[0].title, "Funky Drummer");

    let value = serde_json::to_value(&report.samples[2]).unwrap();
    assert_eq!(value["type"], "interpolation");
}

#[test]
fn test_playlist_name_for() {
    assert_eq!(
        playlist_name_for("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
        "MusicFinder: Parsed from youtube.com"
    );
    assert_eq!(
        playlist_name_for("https://pitchfork.com/features/lists-and-guides/best-albums/"),
        "MusicFinder: Parsed from pitchfork.com"
    );
}

#[test]
fn test_playlist_description_for() {
    assert_eq!(
        playlist_description_for("https://pitchfork.com/best"),
        "Albums mentioned in https://pitchfork.com/best - parsed by MusicFinder"
    );
}

#[test]
fn test_search_query() {
    let mention = MentionCandidate {
        title: "OK Computer".to_string(),
        artist: "Radiohead".to_string(),
    };
    assert_eq!(search_query(&mention), "album:OK Computer artist:Radiohead");
}

#[test]
fn test_token_from_json() {
    let token = token_from_json(&json!({
        "access_token": "access",
        "refresh_token": "refresh",
        "scope": "playlist-modify-private",
        "expires_in": 3600
    }))
    .unwrap();

    assert_eq!(token.access_token, "access");
    assert_eq!(token.refresh_token, "refresh");
    assert_eq!(token.expires_in, 3600);
    assert!(token.obtained_at > 0);
}

#[test]
fn test_token_from_json_error_body() {
    let result = token_from_json(&json!({
        "error": "invalid_grant",
        "error_description": "Invalid authorization code"
    }));
    assert!(result.is_err());
}
