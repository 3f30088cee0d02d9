use std::{fmt, io::Error};

mod auth;
mod transcript;
mod vault;

pub use auth::TokenManager;
pub use transcript::TranscriptCache;
pub use vault::{SampleFilter, SampleVaultManager, download_for};

#[derive(Debug)]
pub enum CacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        CacheError::IoError(err)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerdeError(err)
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::IoError(e) => write!(f, "io error: {}", e),
            CacheError::SerdeError(e) => write!(f, "invalid cache data: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}
