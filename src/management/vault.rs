use std::{fmt, path::PathBuf, str::FromStr};

use crate::{
    config,
    management::CacheError,
    types::{DownloadEntry, Sample},
    utils,
};

/// Which part of the vault to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFilter {
    #[default]
    All,
    Downloaded,
    Pending,
}

impl FromStr for SampleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SampleFilter::All),
            "downloaded" => Ok(SampleFilter::Downloaded),
            "pending" => Ok(SampleFilter::Pending),
            other => Err(format!(
                "invalid value '{}' (expected all, downloaded or pending)",
                other
            )),
        }
    }
}

impl fmt::Display for SampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SampleFilter::All => "all",
            SampleFilter::Downloaded => "downloaded",
            SampleFilter::Pending => "pending",
        };
        f.write_str(s)
    }
}

/// The user's curated list of tracks ("Sample Lab"), persisted as JSON.
pub struct SampleVaultManager {
    path: PathBuf,
    samples: Vec<Sample>,
}

impl SampleVaultManager {
    pub fn new(samples: Option<Vec<Sample>>) -> Self {
        Self {
            path: Self::default_path(),
            samples: samples.unwrap_or_default(),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            samples: Vec::new(),
        }
    }

    /// Loads the vault from disk. A vault that was never saved is empty.
    pub async fn load_from_cache(self) -> Result<Self, CacheError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self {
                    path: self.path,
                    samples: Vec::new(),
                });
            }
            Err(e) => return Err(CacheError::IoError(e)),
        };

        let samples: Vec<Sample> = serde_json::from_str(&content)?;
        Ok(Self {
            path: self.path,
            samples,
        })
    }

    pub async fn save_to_cache(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.samples)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Adds `sample`, replacing an existing entry with the same id in place.
    pub fn add(&mut self, sample: Sample) -> &mut Self {
        match self.samples.iter_mut().find(|s| s.id == sample.id) {
            Some(existing) => *existing = sample,
            None => self.samples.push(sample),
        }
        self
    }

    /// Removes the sample with `id`; returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.samples.len();
        self.samples.retain(|s| s.id != id);
        self.samples.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.id == id)
    }

    pub fn all(&self) -> &[Sample] {
        &self.samples
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// Samples matching `filter`, in vault order.
    pub fn filtered(&self, filter: SampleFilter, downloads: &[DownloadEntry]) -> Vec<Sample> {
        self.samples
            .iter()
            .filter(|s| match filter {
                SampleFilter::All => true,
                SampleFilter::Downloaded => download_for(s, downloads).is_some(),
                SampleFilter::Pending => download_for(s, downloads).is_none(),
            })
            .cloned()
            .collect()
    }

    fn default_path() -> PathBuf {
        config::data_dir().join("samples/vault.json")
    }
}

/// The downloaded file belonging to `sample`: the first whose name starts
/// with the id as the downloader writes it, `<sanitized id>_`.
pub fn download_for<'d>(sample: &Sample, downloads: &'d [DownloadEntry]) -> Option<&'d DownloadEntry> {
    let id = sample.id.trim();
    if id.is_empty() {
        return None;
    }

    let prefix = format!("{}_", utils::sanitize_filename(id));
    downloads.iter().find(|d| d.filename.starts_with(&prefix))
}
