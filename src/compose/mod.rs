//! B-roll planning
//!
//! Maps each merged scene to a concrete visual source through a
//! fallback chain that never aborts the render: generated still for
//! the opening scene, provider videos, provider photos, the previous
//! scene's clip, a random local asset, and finally a solid color card.

pub mod keywords;

use crate::adapters::MediaDownloader;
use crate::error::ShortForgeResult;
use crate::ports::{FootagePort, ImageGenPort};
use crate::subtitle::Scene;
use keywords::build_queries;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Scenes shorter than this get padded so a cut is still perceptible
const MIN_SCENE_SECS: f64 = 1.2;

const QUERY_TOP_K: usize = 3;
const QUERY_MAX_OUT: usize = 8;
const RESULTS_PER_QUERY: usize = 5;

/// Visual source resolved for one scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneSource {
    /// Downloaded or local clip, looped/trimmed to the scene duration
    Video(PathBuf),
    /// Still image animated with a slow zoom
    Still(PathBuf),
    /// Solid black card, the last resort
    Color,
}

/// One scene's resolved visual plus its padded duration
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePlan {
    pub source: SceneSource,
    pub duration: f64,
}

/// Resolves scenes to visual sources using the configured providers
pub struct BrollPlanner<'a> {
    footage: &'a dyn FootagePort,
    image_gen: Option<&'a dyn ImageGenPort>,
    downloader: &'a MediaDownloader,
    assets_dir: Option<PathBuf>,
    work_dir: PathBuf,
}

impl<'a> BrollPlanner<'a> {
    pub fn new(
        footage: &'a dyn FootagePort,
        image_gen: Option<&'a dyn ImageGenPort>,
        downloader: &'a MediaDownloader,
        assets_dir: Option<PathBuf>,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            footage,
            image_gen,
            downloader,
            assets_dir,
            work_dir,
        }
    }

    /// Resolve every scene to a source. URLs are deduplicated within
    /// the run so the same clip never appears twice.
    pub async fn plan(&self, scenes: &[Scene]) -> ShortForgeResult<Vec<ScenePlan>> {
        tokio::fs::create_dir_all(&self.work_dir).await?;

        let mut plans: Vec<ScenePlan> = Vec::with_capacity(scenes.len());
        let mut used_urls: HashSet<String> = HashSet::new();
        let mut last_good: Option<PathBuf> = None;

        for (i, scene) in scenes.iter().enumerate() {
            let duration = scene.duration().max(MIN_SCENE_SECS);
            let queries = build_queries(&scene.text, QUERY_TOP_K, QUERY_MAX_OUT);

            let mut source: Option<SceneSource> = None;

            // The opening scene gets a generated illustration when an
            // image provider is configured
            if i == 0 {
                if let Some(gen) = self.image_gen {
                    let dest = self.work_dir.join("ia_first.jpg");
                    match gen.generate(&scene.text, &dest).await {
                        Ok(path) => {
                            info!(scene = i, "using generated opening image");
                            source = Some(SceneSource::Still(path));
                        }
                        Err(e) => warn!("opening image generation failed: {}", e),
                    }
                }
            }

            if source.is_none() {
                source = self.find_video(i, &queries, &mut used_urls).await;
            }
            if source.is_none() {
                source = self.find_photo(i, &queries, &mut used_urls).await;
            }
            if source.is_none() {
                if let Some(prev) = &last_good {
                    debug!(scene = i, "reusing previous clip");
                    source = Some(SceneSource::Video(prev.clone()));
                }
            }
            if source.is_none() {
                source = self.pick_local_asset();
            }

            let source = source.unwrap_or(SceneSource::Color);
            if let SceneSource::Video(path) = &source {
                last_good = Some(path.clone());
            }
            debug!(scene = i, ?source, duration, "scene planned");
            plans.push(ScenePlan { source, duration });
        }
        Ok(plans)
    }

    async fn find_video(
        &self,
        scene_idx: usize,
        queries: &[String],
        used_urls: &mut HashSet<String>,
    ) -> Option<SceneSource> {
        for query in queries {
            let urls = match self.footage.search_videos(query, RESULTS_PER_QUERY).await {
                Ok(urls) => urls,
                Err(e) => {
                    warn!(query, "video search failed: {}", e);
                    continue;
                }
            };
            for (j, url) in urls.iter().filter(|u| !used_urls.contains(*u)).enumerate() {
                let local = self.work_dir.join(format!("seg{}_{}.mp4", scene_idx, j));
                match self.downloader.fetch(url, &local).await {
                    Ok(()) => {
                        used_urls.insert(url.clone());
                        return Some(SceneSource::Video(local));
                    }
                    Err(e) => warn!(url, "clip download failed: {}", e),
                }
            }
        }
        None
    }

    async fn find_photo(
        &self,
        scene_idx: usize,
        queries: &[String],
        used_urls: &mut HashSet<String>,
    ) -> Option<SceneSource> {
        for query in queries {
            let urls = match self.footage.search_photos(query, RESULTS_PER_QUERY).await {
                Ok(urls) => urls,
                Err(e) => {
                    warn!(query, "photo search failed: {}", e);
                    continue;
                }
            };
            for (j, url) in urls.iter().filter(|u| !used_urls.contains(*u)).enumerate() {
                let local = self.work_dir.join(format!("seg{}_{}.jpg", scene_idx, j));
                match self.downloader.fetch(url, &local).await {
                    Ok(()) => {
                        used_urls.insert(url.clone());
                        return Some(SceneSource::Still(local));
                    }
                    Err(e) => warn!(url, "photo download failed: {}", e),
                }
            }
        }
        None
    }

    fn pick_local_asset(&self) -> Option<SceneSource> {
        let dir = self.assets_dir.as_deref()?;
        let assets = local_assets(dir);
        let choice = assets.choose(&mut rand::thread_rng())?;
        debug!(asset = %choice.display(), "using local fallback clip");
        Some(SceneSource::Video(choice.clone()))
    }
}

/// All mp4 files under `dir`, recursively.
pub fn local_assets(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShortForgeResult;
    use async_trait::async_trait;

    struct NoFootage;

    #[async_trait]
    impl FootagePort for NoFootage {
        async fn search_videos(&self, _query: &str, _limit: usize) -> ShortForgeResult<Vec<String>> {
            Ok(Vec::new())
        }

        async fn search_photos(&self, _query: &str, _limit: usize) -> ShortForgeResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_local_assets_finds_only_mp4() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp4"), b"x").unwrap();
        std::fs::write(dir.path().join("b.MP4"), b"x").unwrap();
        std::fs::write(dir.path().join("c.txt"), b"x").unwrap();
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("d.mp4"), b"x").unwrap();

        let assets = local_assets(dir.path());
        assert_eq!(assets.len(), 3);
    }

    #[tokio::test]
    async fn test_plan_without_providers_yields_color_cards() {
        let work = tempfile::tempdir().unwrap();
        let downloader = MediaDownloader::new();
        let footage = NoFootage;
        let planner = BrollPlanner::new(
            &footage,
            None,
            &downloader,
            None,
            work.path().join("broll"),
        );

        let scenes = vec![
            Scene {
                start: 0.0,
                end: 3.0,
                text: "La glucosa en sangre".to_string(),
            },
            Scene {
                start: 3.0,
                end: 3.5,
                text: "sube".to_string(),
            },
        ];
        let plans = planner.plan(&scenes).await.unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].source, SceneSource::Color);
        assert_eq!(plans[0].duration, 3.0);
        // Short scenes are padded to the minimum
        assert_eq!(plans[1].duration, 1.2);
    }

    #[tokio::test]
    async fn test_plan_uses_local_assets_before_color() {
        let work = tempfile::tempdir().unwrap();
        let assets = tempfile::tempdir().unwrap();
        std::fs::write(assets.path().join("fallback.mp4"), b"x").unwrap();

        let downloader = MediaDownloader::new();
        let footage = NoFootage;
        let planner = BrollPlanner::new(
            &footage,
            None,
            &downloader,
            Some(assets.path().to_path_buf()),
            work.path().join("broll"),
        );

        let scenes = vec![Scene {
            start: 0.0,
            end: 2.0,
            text: "laboratorio".to_string(),
        }];
        let plans = planner.plan(&scenes).await.unwrap();
        assert_eq!(
            plans[0].source,
            SceneSource::Video(assets.path().join("fallback.mp4"))
        );
    }
}
