//! Command implementations

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::adapters::exec_ffmpeg::{build_base_args, build_burn_args, build_music_mix_args};
use crate::adapters::{
    FfmpegRunner, HuggingFaceImageGen, MediaDownloader, OpenverseAuth, OpenverseClient,
    PexelsClient,
};
use crate::cli::args::{BuildArgs, CuesArgs, ScenesArgs, WrapArgs};
use crate::compose::BrollPlanner;
use crate::config::{ProviderSecrets, ShortsConfig};
use crate::error::ShortForgeError;
use crate::ports::ImageGenPort;
use crate::subtitle::chunker::{chunk_uniform, wrap_cues};
use crate::subtitle::parser::parse_track;
use crate::subtitle::scenes::merge_scenes;
use crate::subtitle::serializer::serialize_cues;
use crate::subtitle::{Cue, Segment};

/// Execute the scenes command
pub fn scenes(args: ScenesArgs) -> Result<()> {
    let content = read_input(&args.input)?;
    let segments = parse_track(&content);
    let scenes = merge_scenes(&segments, args.min_scene, args.max_scene);
    info!(
        "Merged {} transcript blocks into {} scenes",
        segments.len(),
        scenes.len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scenes)?);
    } else {
        for (i, scene) in scenes.iter().enumerate() {
            println!(
                "{:>3}. [{:7.2} - {:7.2}] {}",
                i + 1,
                scene.start,
                scene.end,
                scene.text
            );
        }
    }
    Ok(())
}

/// Execute the cues command
pub fn cues(args: CuesArgs) -> Result<()> {
    let content = read_input(&args.input)?;
    let segments = parse_track(&content);
    let cues = chunk_uniform(&segments, args.min_duration, args.words_per_chunk);
    info!(
        "Chunked {} transcript blocks into {} cues",
        segments.len(),
        cues.len()
    );
    write_output(args.output.as_deref(), &serialize_cues(&cues))
}

/// Execute the wrap command
pub fn wrap(args: WrapArgs) -> Result<()> {
    let content = read_input(&args.input)?;
    let cues = segments_to_cues(&parse_track(&content));
    let wrapped = wrap_cues(&cues, args.max_chars);
    write_output(args.output.as_deref(), &serialize_cues(&wrapped))
}

/// Execute the build command: scenes, footage, base render, music,
/// subtitle burn.
pub async fn build(args: BuildArgs) -> Result<()> {
    info!("Starting build");

    for input in [&args.audio, &args.srt] {
        if !input.exists() {
            return Err(ShortForgeError::InputFileNotFound {
                path: input.display().to_string(),
            }
            .into());
        }
    }

    let config = ShortsConfig::load(args.config.as_deref())?;
    let secrets = ProviderSecrets::from_env();

    let content = read_input(&args.srt)?;
    let segments = parse_track(&content);
    if segments.is_empty() {
        anyhow::bail!("No usable transcript blocks in {}", args.srt.display());
    }
    let scenes = merge_scenes(&segments, config.scene.min_scene, config.scene.max_scene);
    info!("Planning b-roll for {} scenes", scenes.len());

    let work = tempfile::tempdir().context("Failed to create working directory")?;
    let work_dir = work.path();

    let footage = PexelsClient::new(secrets.pexels_api_key.clone());
    let image_gen = match HuggingFaceImageGen::from_secrets(secrets.hf_token.clone()) {
        Ok(gen) => Some(gen),
        Err(e) => {
            warn!("Opening image generation disabled: {}", e);
            None
        }
    };
    let downloader = MediaDownloader::new();
    let planner = BrollPlanner::new(
        &footage,
        image_gen.as_ref().map(|g| g as &dyn ImageGenPort),
        &downloader,
        config.assets_dir.clone(),
        work_dir.join("broll"),
    );
    let plans = planner.plan(&scenes).await?;

    let runner = FfmpegRunner::new();
    let base_path = work_dir.join("tmp_base.mp4");
    runner
        .run(&build_base_args(
            &plans,
            &args.audio,
            &base_path,
            &config.render,
        ))
        .await
        .context("Base video render failed")?;

    let mut current = base_path;
    if args.no_music {
        info!("Skipping music pass");
    } else {
        match fetch_music(&secrets, &config, work_dir).await {
            Ok(music_path) => {
                let mixed = work_dir.join("tmp_with_music.mp4");
                runner
                    .run(&build_music_mix_args(
                        &current,
                        &music_path,
                        &mixed,
                        &config.music,
                        &config.render,
                    ))
                    .await
                    .context("Music mix failed")?;
                current = mixed;
            }
            Err(e) => warn!("Continuing without music: {}", e),
        }
    }

    let cues = chunk_uniform(&segments, config.cues.min_duration, config.cues.words_per_chunk);
    let wrapped = wrap_cues(&cues, config.cues.max_line_chars);
    let srt_path = work_dir.join("voz_words.srt");
    std::fs::write(&srt_path, serialize_cues(&wrapped))
        .with_context(|| format!("Failed to write {}", srt_path.display()))?;
    info!("Burning {} cues", wrapped.len());

    let output = args.output.unwrap_or_else(default_output_name);
    runner
        .run(&build_burn_args(&current, &srt_path, &output, &config.style))
        .await
        .context("Subtitle burn failed")?;

    info!("Short written to {}", output.display());
    Ok(())
}

/// Pick and download a background track, surfacing missing credentials
/// as a soft failure the caller can downgrade.
async fn fetch_music(
    secrets: &ProviderSecrets,
    config: &ShortsConfig,
    work_dir: &Path,
) -> Result<PathBuf> {
    let auth = OpenverseAuth::from_secrets(
        secrets.openverse_client_id.clone(),
        secrets.openverse_client_secret.clone(),
    )?;
    let client = OpenverseClient::new(
        auth,
        config.music.min_track_secs,
        config.music.max_track_secs,
    );
    let dest = work_dir.join("music.mp3");
    let track = client.pick_and_download(&config.music.queries, &dest).await?;
    info!(
        "Music: {} by {} ({})",
        track.title.as_deref().unwrap_or("?"),
        track.creator.as_deref().unwrap_or("?"),
        track.license.as_deref().unwrap_or("?")
    );
    Ok(dest)
}

fn segments_to_cues(segments: &[Segment]) -> Vec<Cue> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| Cue {
            index: (i + 1) as u32,
            start: segment.start,
            end: segment.end,
            text: segment.text.clone(),
        })
        .collect()
}

fn default_output_name() -> PathBuf {
    PathBuf::from(format!("short-{}.mp4", Local::now().format("%Y-%m-%d%H%M%S")))
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ShortForgeError::InputFileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(dest: Option<&Path>, content: &str) -> Result<()> {
    match dest {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
