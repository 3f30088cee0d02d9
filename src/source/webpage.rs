use reqwest::{Client, header::USER_AGENT};

use crate::{config, source::SourceError};

use super::strip_tags;

/// Downloads `url` and returns its text content with all tags removed.
///
/// The HTTP status is not checked: error pages are scraped like any other
/// page and simply tend to yield no mentions.
pub async fn fetch_webpage(url: &str) -> Result<String, SourceError> {
    let client = Client::new();
    let response = client
        .get(url)
        .header(USER_AGENT, config::SCRAPER_USER_AGENT)
        .send()
        .await
        .map_err(|e| SourceError::Page(e.to_string()))?;

    let html = response
        .text()
        .await
        .map_err(|e| SourceError::Page(e.to_string()))?;

    Ok(strip_tags(&html))
}
