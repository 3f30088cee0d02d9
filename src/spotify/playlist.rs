use reqwest::Client;
use url::Url;

use crate::{
    config,
    spotify::{search, send_with_retry},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, MentionCandidate, PlaylistOutcome,
    },
    warning,
};

/// Spotify accepts at most this many URIs per add-tracks call.
const TRACKS_PER_REQUEST: usize = 100;

/// Playlist name for mentions parsed from `source_url`:
/// `MusicFinder: Parsed from <host>`, with a leading `www.` dropped.
pub fn playlist_name_for(source_url: &str) -> String {
    let host = Url::parse(source_url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| source_url.to_string());
    let host = host.strip_prefix("www.").unwrap_or(&host);

    format!("MusicFinder: Parsed from {}", host)
}

pub fn playlist_description_for(source_url: &str) -> String {
    format!("Albums mentioned in {} - parsed by MusicFinder", source_url)
}

pub async fn current_user_id(token: &str) -> Result<String, reqwest::Error> {
    let client = Client::new();
    let api_url = format!("{uri}/me", uri = config::spotify_apiurl());

    let response = send_with_retry(|| client.get(&api_url).bearer_auth(token)).await?;
    let user = response.json::<CurrentUser>().await?;
    Ok(user.id)
}

/// Creates a private, non-collaborative playlist for `user_id`.
pub async fn create(
    token: &str,
    user_id: &str,
    name: String,
    description: String,
) -> Result<CreatePlaylistResponse, reqwest::Error> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = config::spotify_apiurl(),
        user_id = user_id
    );
    let body = CreatePlaylistRequest {
        name,
        description,
        public: false,
        collaborative: false,
    };

    let response =
        send_with_retry(|| client.post(&api_url).bearer_auth(token).json(&body)).await?;
    response.json::<CreatePlaylistResponse>().await
}

/// Adds `uris` to the playlist in batches of 100.
pub async fn add_tracks(
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<(), reqwest::Error> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = config::spotify_apiurl(),
        playlist_id = playlist_id
    );

    for chunk in uris.chunks(TRACKS_PER_REQUEST) {
        let body = AddTrackToPlaylistRequest {
            uris: chunk.to_vec(),
        };
        let response =
            send_with_retry(|| client.post(&api_url).bearer_auth(token).json(&body)).await?;
        response.json::<AddTrackToPlaylistResponse>().await?;
    }

    Ok(())
}

/// Builds a playlist from extracted mentions.
///
/// Each mention contributes the first track of its best matching album.
/// Mentions without a match (or whose search failed) are reported in
/// `not_found` instead of aborting. `on_progress` is called before each
/// search with the mention's index.
pub async fn from_mentions<F>(
    token: &str,
    source_url: &str,
    mentions: &[MentionCandidate],
    mut on_progress: F,
) -> Result<PlaylistOutcome, reqwest::Error>
where
    F: FnMut(usize, &MentionCandidate),
{
    let user_id = current_user_id(token).await?;

    let mut uris: Vec<String> = Vec::new();
    let mut not_found: Vec<MentionCandidate> = Vec::new();

    for (i, mention) in mentions.iter().enumerate() {
        on_progress(i, mention);
        match search::find_first_track(token, mention).await {
            Ok(Some(uri)) => uris.push(uri),
            Ok(None) => not_found.push(mention.clone()),
            Err(e) => {
                warning!(
                    "Search failed for \"{}\" by {}: {}",
                    mention.title,
                    mention.artist,
                    e
                );
                not_found.push(mention.clone());
            }
        }
    }

    let name = playlist_name_for(source_url);
    let playlist = create(
        token,
        &user_id,
        name.clone(),
        playlist_description_for(source_url),
    )
    .await?;

    if !uris.is_empty() {
        add_tracks(token, &playlist.id, &uris).await?;
    }

    Ok(PlaylistOutcome {
        playlist_id: playlist.id,
        name,
        tracks_added: uris.len(),
        not_found,
    })
}
