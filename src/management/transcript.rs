use std::path::PathBuf;

use crate::{config, management::CacheError};

/// On-disk cache of fetched transcripts, one plain text file per video id.
pub struct TranscriptCache {
    dir: PathBuf,
}

impl TranscriptCache {
    pub fn new() -> Self {
        Self::in_dir(config::data_dir().join("cache/transcripts"))
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Returns the cached transcript for `video_id`, `Ok(None)` when absent.
    pub async fn get(&self, video_id: &str) -> Result<Option<String>, CacheError> {
        let path = self.get_path(video_id);
        match async_fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::IoError(e)),
        }
    }

    pub async fn put(&self, video_id: &str, transcript: &str) -> Result<(), CacheError> {
        async_fs::create_dir_all(&self.dir)
            .await
            .map_err(CacheError::IoError)?;
        async_fs::write(self.get_path(video_id), transcript)
            .await
            .map_err(CacheError::IoError)
    }

    fn get_path(&self, video_id: &str) -> PathBuf {
        // ids come from URLs; keep them from escaping the cache dir
        let safe: String = video_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.txt", safe))
    }
}

impl Default for TranscriptCache {
    fn default() -> Self {
        Self::new()
    }
}
