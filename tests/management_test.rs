use std::path::PathBuf;

use chrono::Utc;
use musicfinder::management::{
    SampleFilter, SampleVaultManager, TokenManager, TranscriptCache, download_for,
};
use musicfinder::downloader::file_stem;
use musicfinder::types::{DownloadEntry, DownloadRequest, Sample, Token};

// Helper function to create a test sample
fn create_test_sample(id: &str, name: &str, artist: &str) -> Sample {
    Sample {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        album: None,
        uri: Some(format!("spotify:track:{}", id)),
        spotify_url: None,
        duration_ms: Some(180_000),
        added_at: Utc::now(),
    }
}

// Helper function to create a test download entry
fn create_test_download(filename: &str) -> DownloadEntry {
    DownloadEntry {
        filename: filename.to_string(),
        size: 4096,
        url: format!("/downloads/{}", filename),
    }
}

// Fresh, per-test directory under the system temp dir
fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "musicfinder-test-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_sample_filter_from_str() {
    assert_eq!("all".parse::<SampleFilter>(), Ok(SampleFilter::All));
    assert_eq!("Downloaded".parse::<SampleFilter>(), Ok(SampleFilter::Downloaded));
    assert_eq!(" pending ".parse::<SampleFilter>(), Ok(SampleFilter::Pending));
    assert!("everything".parse::<SampleFilter>().is_err());
    assert_eq!(SampleFilter::default(), SampleFilter::All);
}

#[test]
fn test_sample_filter_display() {
    assert_eq!(SampleFilter::All.to_string(), "all");
    assert_eq!(SampleFilter::Downloaded.to_string(), "downloaded");
    assert_eq!(SampleFilter::Pending.to_string(), "pending");
}

#[test]
fn test_vault_add_replaces_same_id() {
    let mut vault = SampleVaultManager::at(test_dir("vault-add").join("vault.json"));

    vault.add(create_test_sample("t1", "Funky Drummer", "James Brown"));
    vault.add(create_test_sample("t2", "Amen, Brother", "The Winstons"));
    vault.add(create_test_sample("t1", "Funky Drummer (Reissue)", "James Brown"));

    assert_eq!(vault.count(), 2);
    assert_eq!(vault.all()[0].id, "t1");
    assert_eq!(
        vault.get("t1").map(|s| s.name.as_str()),
        Some("Funky Drummer (Reissue)")
    );
}

#[test]
fn test_vault_remove() {
    let mut vault = SampleVaultManager::at(test_dir("vault-remove").join("vault.json"));
    vault.add(create_test_sample("t1", "Funky Drummer", "James Brown"));

    assert!(vault.remove("t1"));
    assert!(!vault.remove("t1"));
    assert_eq!(vault.count(), 0);
}

#[test]
fn test_download_for() {
    let sample = create_test_sample("t1", "Funky Drummer", "James Brown");
    let downloads = vec![
        create_test_download("t2_The Winstons - Amen, Brother.mp3"),
        create_test_download("t1_James Brown - Funky Drummer.mp3"),
    ];

    let found = download_for(&sample, &downloads);
    assert_eq!(
        found.map(|d| d.filename.as_str()),
        Some("t1_James Brown - Funky Drummer.mp3")
    );

    let no_id = create_test_sample("", "Untitled", "Nobody");
    assert!(download_for(&no_id, &downloads).is_none());
}

#[test]
fn test_download_for_matches_sanitized_id() {
    let sample = create_test_sample("spotify:track/5By", "Funky Drummer", "James Brown");

    // Name the file exactly as the downloader would
    let request = DownloadRequest {
        query: Some("James Brown Funky Drummer".to_string()),
        track_id: Some(sample.id.clone()),
        track_name: Some(sample.name.clone()),
        artist_name: Some(sample.artist.clone()),
    };
    let stem = file_stem(&request).unwrap();
    assert_eq!(stem, "spotify_track_5By_James Brown - Funky Drummer");

    let downloads = vec![create_test_download(&format!("{}.mp3", stem))];
    assert!(download_for(&sample, &downloads).is_some());
}

#[test]
fn test_download_for_requires_full_id() {
    let sample = create_test_sample("t1", "Funky Drummer", "James Brown");
    let downloads = vec![create_test_download("t10_Someone Else - Other Track.mp3")];

    assert!(download_for(&sample, &downloads).is_none());
}

#[test]
fn test_vault_filtered() {
    let mut vault = SampleVaultManager::at(test_dir("vault-filter").join("vault.json"));
    vault.add(create_test_sample("t1", "Funky Drummer", "James Brown"));
    vault.add(create_test_sample("t2", "Amen, Brother", "The Winstons"));
    vault.add(create_test_sample("t3", "Impeach the President", "The Honey Drippers"));

    let downloads = vec![create_test_download("t2_The Winstons - Amen, Brother.mp3")];

    let ids = |filter: SampleFilter| -> Vec<String> {
        vault
            .filtered(filter, &downloads)
            .into_iter()
            .map(|s| s.id)
            .collect()
    };

    assert_eq!(ids(SampleFilter::All), vec!["t1", "t2", "t3"]);
    assert_eq!(ids(SampleFilter::Downloaded), vec!["t2"]);
    assert_eq!(ids(SampleFilter::Pending), vec!["t1", "t3"]);
}

#[tokio::test]
async fn test_vault_persistence_roundtrip() {
    let dir = test_dir("vault-persist");
    let path = dir.join("samples").join("vault.json");

    // Never saved: empty
    let vault = SampleVaultManager::at(path.clone())
        .load_from_cache()
        .await
        .unwrap();
    assert_eq!(vault.count(), 0);

    let mut vault = vault;
    vault.add(create_test_sample("t1", "Funky Drummer", "James Brown"));
    vault.save_to_cache().await.unwrap();

    let reloaded = SampleVaultManager::at(path.clone())
        .load_from_cache()
        .await
        .unwrap();
    assert_eq!(reloaded.all(), vault.all());

    // Stored with camelCase keys except duration_ms
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"addedAt\""));
    assert!(raw.contains("\"duration_ms\""));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_vault_corrupt_file_is_an_error() {
    let dir = test_dir("vault-corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("vault.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(SampleVaultManager::at(path).load_from_cache().await.is_err());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_transcript_cache() {
    let dir = test_dir("transcripts");
    let cache = TranscriptCache::in_dir(dir.clone());

    assert_eq!(cache.get("dQw4w9WgXcQ").await.unwrap(), None);

    cache
        .put("dQw4w9WgXcQ", "\"Thriller\" by Michael Jackson")
        .await
        .unwrap();
    assert_eq!(
        cache.get("dQw4w9WgXcQ").await.unwrap().as_deref(),
        Some("\"Thriller\" by Michael Jackson")
    );

    // Ids cannot escape the cache directory
    cache.put("../escape", "x").await.unwrap();
    assert!(!dir.parent().unwrap().join("escape.txt").exists());
    assert!(dir.join("___escape.txt").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_token_manager_holds_token() {
    let token = Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-modify-private".to_string(),
        expires_in: 3600,
        obtained_at: 0,
    };

    let manager = TokenManager::new(token);
    assert_eq!(manager.current_token().access_token, "access");
    assert_eq!(manager.current_token().refresh_token, "refresh");
}
