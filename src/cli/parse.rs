use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    downloader, error, extractor, info,
    management::TokenManager,
    source, spotify, success,
    types::{DownloadRequest, MentionCandidate, SourceKind},
    utils, warning,
};

/// Reads a YouTube video or web page, lists the mentions found in it and
/// optionally turns them into a Spotify playlist and/or local MP3s.
pub async fn parse(url: String, playlist: bool, download: bool) {
    let pb = utils::spinner(&format!("Reading {}...", url));
    let resolved = source::resolve(&url).await;
    pb.finish_and_clear();

    let resolved = match resolved {
        Ok(r) => r,
        Err(e) => error!("{}", e),
    };

    match (&resolved.kind, &resolved.video_id) {
        (SourceKind::Youtube, Some(id)) => info!("Transcript of video {} loaded", id),
        _ => info!("Page text loaded ({} bytes)", resolved.text.len()),
    }

    let mentions = extractor::extract(&resolved.text);
    if mentions.is_empty() {
        warning!("No album or track mentions found.");
        return;
    }

    success!("Found {} mentions", mentions.len());
    println!("{}", Table::new(utils::mention_table_rows(&mentions)));

    if playlist {
        create_playlist(&url, &mentions).await;
    }

    if download {
        download_mentions(&mentions).await;
    }
}

async fn create_playlist(url: &str, mentions: &[MentionCandidate]) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run musicfinder auth\n Error: {}",
            e
        ),
    };
    let token = token_mgr.get_valid_token().await;

    let pb = progress_bar(mentions.len());
    let result = spotify::playlist::from_mentions(&token, url, mentions, |_, mention| {
        pb.set_message(format!("{} - {}", mention.artist, mention.title));
        pb.inc(1);
    })
    .await;
    pb.finish_and_clear();

    let outcome = match result {
        Ok(o) => o,
        Err(e) => error!("Failed to create playlist. Err: {}", e),
    };

    success!(
        "Created playlist '{}' with {} tracks",
        outcome.name,
        outcome.tracks_added
    );
    for missing in &outcome.not_found {
        warning!("Not found on Spotify: \"{}\" by {}", missing.title, missing.artist);
    }
}

async fn download_mentions(mentions: &[MentionCandidate]) {
    let ytdlp = downloader::status().await;
    if !ytdlp.available {
        warning!("yt-dlp is not available, skipping downloads.");
        return;
    }

    let pb = progress_bar(mentions.len());
    let mut downloaded = 0;
    for mention in mentions {
        pb.set_message(format!("{} - {}", mention.artist, mention.title));
        let request = DownloadRequest {
            query: Some(format!("{} {}", mention.artist, mention.title)),
            track_id: None,
            track_name: Some(mention.title.clone()),
            artist_name: Some(mention.artist.clone()),
        };

        match downloader::download(&request).await {
            Ok(_) => downloaded += 1,
            Err(e) => pb.suspend(|| warning!("{} ({} - {})", e, mention.artist, mention.title)),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    success!("Downloaded {} of {} mentions", downloaded, mentions.len());
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
