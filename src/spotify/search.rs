use reqwest::Client;

use crate::{
    config,
    spotify::send_with_retry,
    types::{AlbumSummary, MentionCandidate, SearchResponse, Tracks},
};

/// Spotify search expression for a mention: `album:<title> artist:<artist>`.
pub fn search_query(mention: &MentionCandidate) -> String {
    format!("album:{} artist:{}", mention.title, mention.artist)
}

/// Returns the best album match for `mention`, if Spotify knows one.
pub async fn find_album(
    token: &str,
    mention: &MentionCandidate,
) -> Result<Option<AlbumSummary>, reqwest::Error> {
    let client = Client::new();
    let api_url = format!("{uri}/search", uri = config::spotify_apiurl());
    let query = search_query(mention);

    let response = send_with_retry(|| {
        client
            .get(&api_url)
            .bearer_auth(token)
            .query(&[("q", query.as_str()), ("type", "album"), ("limit", "1")])
    })
    .await?;

    let res = response.json::<SearchResponse>().await?;
    Ok(res.albums.and_then(|albums| albums.items.into_iter().next()))
}

/// Returns the URI of the first track on `album_id`.
pub async fn first_track_uri(token: &str, album_id: &str) -> Result<Option<String>, reqwest::Error> {
    let client = Client::new();
    let api_url = format!(
        "{uri}/albums/{id}/tracks?limit=1",
        uri = config::spotify_apiurl(),
        id = album_id
    );

    let response = send_with_retry(|| client.get(&api_url).bearer_auth(token)).await?;
    let tracks = response.json::<Tracks>().await?;

    Ok(tracks.items.into_iter().next().map(|t| t.uri))
}

/// Resolves a mention to a playable track: the first track of the best
/// matching album.
pub async fn find_first_track(
    token: &str,
    mention: &MentionCandidate,
) -> Result<Option<String>, reqwest::Error> {
    match find_album(token, mention).await? {
        Some(album) => first_track_uri(token, &album.id).await,
        None => Ok(None),
    }
}
