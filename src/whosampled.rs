//! Sample lookup ("who sampled this?").
//!
//! With `RAPIDAPI_KEY` configured the lookup queries the RapidAPI hosted
//! WhoSampled service. Without a key a fixed set of demo results is returned,
//! flagged with `mock: true`, so the rest of the Sample Lab stays usable.

use reqwest::Client;
use serde_json::Value;

use crate::{
    config,
    types::{SampleHit, SampleReport},
};

/// Looks up samples used by `track` from `artist`.
pub async fn lookup(artist: &str, track: &str) -> Result<SampleReport, reqwest::Error> {
    match config::rapidapi_key() {
        Some(key) => lookup_live(&key, artist, track).await,
        None => Ok(demo_report()),
    }
}

async fn lookup_live(key: &str, artist: &str, track: &str) -> Result<SampleReport, reqwest::Error> {
    let host = config::whosampled_api_host();
    let client = Client::new();
    let json: Value = client
        .get(format!("https://{}/search", host))
        .query(&[("artist", artist), ("track", track)])
        .header("X-RapidAPI-Key", key)
        .header("X-RapidAPI-Host", host.as_str())
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(SampleReport {
        samples: parse_samples(&json),
        mock: false,
    })
}

/// Pulls sample entries out of a lookup response.
///
/// Accepts a top-level array or an object holding the array under `samples`
/// or `results`. Entries without a title or an artist are skipped; a missing
/// type defaults to `sample`.
pub fn parse_samples(json: &Value) -> Vec<SampleHit> {
    let items = match json {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("samples").or_else(|| map.get("results")) {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| {
            let title = first_str(item, &["title", "track", "name"])?;
            let artist = first_str(item, &["artist", "artist_name"])?;
            let kind = first_str(item, &["type", "sample_type"]).unwrap_or("sample");
            let year = item.get("year").and_then(|y| match y {
                Value::Number(n) => n.as_u64().map(|n| n as u32),
                Value::String(s) => s.trim().parse::<u32>().ok(),
                _ => None,
            });

            Some(SampleHit {
                kind: kind.to_string(),
                title: title.to_string(),
                artist: artist.to_string(),
                year,
            })
        })
        .collect()
}

fn first_str<'v>(item: &'v Value, keys: &[&str]) -> Option<&'v str> {
    keys.iter()
        .filter_map(|key| item.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Demo results served when no API key is configured.
pub fn demo_report() -> SampleReport {
    let hit = |kind: &str, title: &str, artist: &str, year: u32| SampleHit {
        kind: kind.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        year: Some(year),
    };

    SampleReport {
        samples: vec![
            hit("sample", "Funky Drummer", "James Brown", 1970),
            hit("sample", "Amen, Brother", "The Winstons", 1969),
            hit("interpolation", "Impeach the President", "The Honey Drippers", 1973),
        ],
        mock: true,
    }
}
