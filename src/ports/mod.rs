// Ports - provider interface definitions (contracts)

use crate::error::ShortForgeResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Port for background footage and photo search
#[async_trait]
pub trait FootagePort: Send + Sync {
    /// Search portrait-oriented video clips for a query, returning
    /// downloadable URLs ranked best-first. An unconfigured provider
    /// returns an empty list rather than an error.
    async fn search_videos(&self, query: &str, limit: usize) -> ShortForgeResult<Vec<String>>;

    /// Search portrait photos for a query, ranked best-first.
    async fn search_photos(&self, query: &str, limit: usize) -> ShortForgeResult<Vec<String>>;
}

/// Port for background music search
#[async_trait]
pub trait MusicPort: Send + Sync {
    /// Search playable music tracks for a query.
    async fn search(&self, query: &str) -> ShortForgeResult<Vec<MusicCandidate>>;
}

/// Port for AI still-image generation
#[async_trait]
pub trait ImageGenPort: Send + Sync {
    /// Generate a still image depicting the sentence, written to `dest`.
    async fn generate(&self, sentence: &str, dest: &Path) -> ShortForgeResult<PathBuf>;
}

/// One playable music track candidate with attribution metadata
#[derive(Debug, Clone)]
pub struct MusicCandidate {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub license: Option<String>,
    pub landing_url: Option<String>,
    pub duration_secs: f64,
    /// Direct URL of the best (highest bitrate) playable file
    pub url: String,
}
