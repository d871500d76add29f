//! Runtime configuration loading and defaults
//!
//! Precedence follows CLI > environment > config file > built-in
//! defaults. Provider secrets only ever come from the environment.

use crate::error::{ShortForgeError, ShortForgeResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level configuration for a build run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShortsConfig {
    pub scene: SceneConfig,
    pub cues: CueConfig,
    pub render: RenderConfig,
    pub style: SubtitleStyle,
    pub music: MusicConfig,
    /// Directory with local fallback clips used when every provider fails
    pub assets_dir: Option<PathBuf>,
}

/// Scene merging knobs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub min_scene: f64,
    pub max_scene: f64,
}

/// Cue chunking knobs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CueConfig {
    /// Minimum cue duration in seconds; shorter cues flash imperceptibly
    pub min_duration: f64,
    pub words_per_chunk: usize,
    pub max_line_chars: usize,
}

/// Output geometry and encoding settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub video_bitrate: String,
    pub audio_bitrate: String,
}

/// force_style values for the subtitles burn-in filter
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubtitleStyle {
    pub font_size: u32,
    pub outline: u32,
    pub shadow: u32,
    pub margin_v: u32,
}

/// Background music search and mixing settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub queries: Vec<String>,
    pub min_track_secs: f64,
    pub max_track_secs: f64,
    /// loudnorm integrated target for the music bed
    pub music_db: f64,
    /// additional volume offset applied under the voice
    pub ducking_db: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            min_scene: 2.0,
            max_scene: 5.0,
        }
    }
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            min_duration: 0.12,
            words_per_chunk: 1,
            max_line_chars: 30,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
            video_bitrate: "6000k".to_string(),
            audio_bitrate: "192k".to_string(),
        }
    }
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_size: 18,
            outline: 1,
            shadow: 1,
            margin_v: 120,
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            queries: vec![
                "synthwave".to_string(),
                "retrowave".to_string(),
                "80s electronic".to_string(),
                "outrun".to_string(),
                "chiptune 80s".to_string(),
            ],
            min_track_secs: 20.0,
            max_track_secs: 90.0,
            music_db: -18.0,
            ducking_db: -6.0,
        }
    }
}

impl ShortsConfig {
    /// Load configuration, trying an explicit path first and then the
    /// usual file locations; defaults apply when nothing is found.
    pub fn load(explicit: Option<&Path>) -> ShortForgeResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = ["shortforge.toml", "config/shortforge.toml"];
        for candidate in candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::from_file(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn from_file(path: &Path) -> ShortForgeResult<Self> {
        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ShortForgeError::ConfigError {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }
}

/// Provider credentials, environment-only
#[derive(Debug, Clone, Default)]
pub struct ProviderSecrets {
    pub pexels_api_key: Option<String>,
    pub openverse_client_id: Option<String>,
    pub openverse_client_secret: Option<String>,
    pub hf_token: Option<String>,
}

impl ProviderSecrets {
    pub fn from_env() -> Self {
        Self {
            pexels_api_key: std::env::var("PEXELS_API_KEY").ok(),
            openverse_client_id: std::env::var("OPENVERSE_CLIENT_ID").ok(),
            openverse_client_secret: std::env::var("OPENVERSE_CLIENT_SECRET").ok(),
            hf_token: std::env::var("HF_TOKEN").ok(),
        }
    }
}
