//! Pexels footage adapter
//!
//! Portrait video and photo search against the Pexels API. A missing
//! API key degrades to empty result sets so the b-roll planner can fall
//! through to its other sources.

use crate::error::ShortForgeResult;
use crate::ports::FootagePort;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

const VIDEO_SEARCH_URL: &str = "https://api.pexels.com/videos/search";
const PHOTO_SEARCH_URL: &str = "https://api.pexels.com/v1/search";

/// Pexels API client
pub struct PexelsClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    videos: Vec<PexelsVideo>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    #[serde(default)]
    video_files: Vec<PexelsVideoFile>,
}

#[derive(Debug, Clone, Deserialize)]
struct PexelsVideoFile {
    link: String,
    #[serde(default)]
    file_type: Option<String>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    bitrate: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    #[serde(default)]
    src: PhotoSources,
}

#[derive(Debug, Default, Deserialize)]
struct PhotoSources {
    large2x: Option<String>,
    portrait: Option<String>,
    original: Option<String>,
    large: Option<String>,
}

impl PexelsClient {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            warn!("PEXELS_API_KEY not set; Pexels searches will return nothing");
        }
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl FootagePort for PexelsClient {
    async fn search_videos(&self, query: &str, limit: usize) -> ShortForgeResult<Vec<String>> {
        let Some(key) = &self.api_key else {
            return Ok(Vec::new());
        };

        debug!(query, limit, "pexels video search");
        let response = self
            .client
            .get(VIDEO_SEARCH_URL)
            .header("Authorization", key)
            .query(&[
                ("query", query),
                ("per_page", &limit.to_string()),
                ("orientation", "portrait"),
                ("size", "large"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: VideoSearchResponse = response.json().await?;
        debug!(found = parsed.videos.len(), "pexels videos found");

        let mut urls = Vec::new();
        for video in parsed.videos {
            urls.extend(rank_video_files(video.video_files));
        }
        Ok(urls)
    }

    async fn search_photos(&self, query: &str, limit: usize) -> ShortForgeResult<Vec<String>> {
        let Some(key) = &self.api_key else {
            return Ok(Vec::new());
        };

        debug!(query, limit, "pexels photo search");
        let response = self
            .client
            .get(PHOTO_SEARCH_URL)
            .header("Authorization", key)
            .query(&[
                ("query", query),
                ("per_page", &limit.to_string()),
                ("orientation", "portrait"),
                ("size", "large"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: PhotoSearchResponse = response.json().await?;
        Ok(parsed
            .photos
            .into_iter()
            .filter_map(|p| best_photo_url(p.src))
            .collect())
    }
}

/// Keep only real video files and order them best-first by height then
/// bitrate, as the API does not guarantee any ordering.
fn rank_video_files(files: Vec<PexelsVideoFile>) -> Vec<String> {
    let mut files: Vec<PexelsVideoFile> = files
        .into_iter()
        .filter(|f| {
            f.file_type
                .as_deref()
                .is_some_and(|t| t.starts_with("video/"))
        })
        .collect();
    files.sort_by(|a, b| {
        (b.height.unwrap_or(0), b.bitrate.unwrap_or(0))
            .cmp(&(a.height.unwrap_or(0), a.bitrate.unwrap_or(0)))
    });
    files.into_iter().map(|f| f.link).collect()
}

/// Prefer the largest renditions a photo offers.
fn best_photo_url(src: PhotoSources) -> Option<String> {
    src.large2x.or(src.portrait).or(src.original).or(src.large)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(link: &str, file_type: &str, height: u32, bitrate: u64) -> PexelsVideoFile {
        PexelsVideoFile {
            link: link.to_string(),
            file_type: Some(file_type.to_string()),
            height: Some(height),
            bitrate: Some(bitrate),
        }
    }

    #[test]
    fn test_rank_video_files_orders_by_height_then_bitrate() {
        let ranked = rank_video_files(vec![
            file("low", "video/mp4", 720, 2000),
            file("best", "video/mp4", 1920, 6000),
            file("mid", "video/mp4", 1920, 4000),
            file("pic", "image/jpeg", 4000, 0),
        ]);
        assert_eq!(ranked, vec!["best", "mid", "low"]);
    }

    #[test]
    fn test_rank_video_files_handles_missing_fields() {
        let ranked = rank_video_files(vec![PexelsVideoFile {
            link: "x".into(),
            file_type: None,
            height: None,
            bitrate: None,
        }]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_best_photo_url_preference() {
        let src = PhotoSources {
            large2x: None,
            portrait: Some("portrait".into()),
            original: Some("original".into()),
            large: None,
        };
        assert_eq!(best_photo_url(src), Some("portrait".into()));
    }
}
