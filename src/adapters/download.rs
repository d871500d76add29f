//! Streaming media downloads with bounded retries

use crate::error::{ShortForgeError, ShortForgeResult};
use reqwest::header::{REFERER, USER_AGENT};
use std::path::Path;
use tracing::{debug, warn};

/// Some CDNs refuse requests without browser-looking headers
pub const BROWSER_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124 Safari/537.36";

/// Downloads media files to disk, retrying transient failures
pub struct MediaDownloader {
    client: reqwest::Client,
    max_retries: usize,
}

impl MediaDownloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            max_retries: 3,
        }
    }

    /// Fetch `url` into `dest`, retrying up to the configured limit.
    pub async fn fetch(&self, url: &str, dest: &Path) -> ShortForgeResult<()> {
        let mut last_err: Option<ShortForgeError> = None;
        for attempt in 1..=self.max_retries {
            match self.try_fetch(url, dest).await {
                Ok(()) => {
                    debug!(url, dest = %dest.display(), "download complete");
                    return Ok(());
                }
                Err(e) => {
                    warn!(url, attempt, "download failed: {}", e);
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| ShortForgeError::DownloadError {
            url: url.to_string(),
            message: "no attempts made".to_string(),
        }))
    }

    async fn try_fetch(&self, url: &str, dest: &Path) -> ShortForgeResult<()> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_UA)
            .header(REFERER, "https://www.pexels.com/")
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}

impl Default for MediaDownloader {
    fn default() -> Self {
        Self::new()
    }
}
