use chrono::Utc;
use tabled::Table;

use crate::{
    downloader, error, info,
    management::{SampleFilter, SampleVaultManager, download_for},
    success,
    types::{DownloadRequest, Sample, SampleHitTableRow, SampleTableRow},
    utils, warning, whosampled,
};

pub struct NewSample {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
    pub uri: Option<String>,
}

async fn load_vault() -> SampleVaultManager {
    match SampleVaultManager::new(None).load_from_cache().await {
        Ok(vault) => vault,
        Err(e) => error!("Cannot load sample vault. Err: {}", e),
    }
}

async fn save_vault(vault: &SampleVaultManager) {
    if let Err(e) = vault.save_to_cache().await {
        error!("Failed to save sample vault. Err: {}", e);
    }
}

pub async fn add_sample(new: NewSample) {
    let mut vault = load_vault().await;
    let replaced = vault.get(&new.id).is_some();

    let spotify_url = new
        .uri
        .as_deref()
        .and_then(|uri| uri.strip_prefix("spotify:track:"))
        .map(|id| format!("https://open.spotify.com/track/{}", id));

    vault.add(Sample {
        id: new.id.clone(),
        name: new.name.clone(),
        artist: new.artist.clone(),
        album: new.album,
        uri: new.uri,
        spotify_url,
        duration_ms: None,
        added_at: Utc::now(),
    });
    save_vault(&vault).await;

    if replaced {
        success!("Updated {} - {} in the vault", new.artist, new.name);
    } else {
        success!("Added {} - {} to the vault", new.artist, new.name);
    }
}

pub async fn remove_sample(id: String) {
    let mut vault = load_vault().await;
    if !vault.remove(&id) {
        warning!("No sample with id {} in the vault", id);
        return;
    }
    save_vault(&vault).await;
    success!("Removed {}", id);
}

pub async fn list_samples(filter: SampleFilter) {
    let vault = load_vault().await;
    let downloads = downloader::list().await.unwrap_or_else(|e| {
        warning!("Cannot read downloads. Err: {}", e);
        Vec::new()
    });

    let samples = vault.filtered(filter, &downloads);
    if vault.count() == 0 {
        info!("The sample vault is empty.");
        return;
    }
    if samples.is_empty() {
        info!("No {} samples.", filter);
        return;
    }

    let rows: Vec<SampleTableRow> = samples
        .iter()
        .map(|s| SampleTableRow {
            id: s.id.clone(),
            name: s.name.clone(),
            artist: s.artist.clone(),
            album: s.album.clone().unwrap_or_default(),
            status: match download_for(s, &downloads) {
                Some(d) => format!("downloaded ({})", utils::format_bytes(d.size)),
                None => "pending".to_string(),
            },
        })
        .collect();

    println!("{}", Table::new(rows));
    info!("{} of {} samples", samples.len(), vault.count());
}

pub async fn download_sample(id: String) {
    let vault = load_vault().await;
    let Some(sample) = vault.get(&id) else {
        error!("No sample with id {} in the vault", id);
    };

    let request = DownloadRequest {
        query: Some(format!("{} {}", sample.artist, sample.name)),
        track_id: Some(sample.id.clone()),
        track_name: Some(sample.name.clone()),
        artist_name: Some(sample.artist.clone()),
    };

    let pb = utils::spinner(&format!("Downloading {} - {}...", sample.artist, sample.name));
    let result = downloader::download(&request).await;
    pb.finish_and_clear();

    match result {
        Ok(res) => success!("Saved {} ({})", res.filename, utils::format_bytes(res.size)),
        Err(e) => error!("{}", e),
    }
}

pub async fn lookup_sample(id: String) {
    let vault = load_vault().await;
    let Some(sample) = vault.get(&id) else {
        error!("No sample with id {} in the vault", id);
    };

    let report = match whosampled::lookup(&sample.artist, &sample.name).await {
        Ok(r) => r,
        Err(e) => error!("Sample lookup failed. Err: {}", e),
    };

    if report.mock {
        warning!("RAPIDAPI_KEY is not set, showing demo data.");
    }
    if report.samples.is_empty() {
        info!("No samples known for {} - {}", sample.artist, sample.name);
        return;
    }

    let rows: Vec<SampleHitTableRow> = report
        .samples
        .into_iter()
        .map(|hit| SampleHitTableRow {
            kind: hit.kind,
            title: hit.title,
            artist: hit.artist,
            year: hit.year.map(|y| y.to_string()).unwrap_or_default(),
        })
        .collect();

    println!("{}", Table::new(rows));
}
