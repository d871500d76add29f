//! ffmpeg execution adapter
//!
//! All rendering shells out to the `ffmpeg` binary. The argv builders
//! are pure functions so the generated invocations stay testable; the
//! runner only spawns and reports.

use crate::compose::{ScenePlan, SceneSource};
use crate::config::{MusicConfig, RenderConfig, SubtitleStyle};
use crate::error::{ShortForgeError, ShortForgeResult};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Spawns ffmpeg invocations
pub struct FfmpegRunner {
    program: String,
}

impl FfmpegRunner {
    pub fn new() -> Self {
        Self {
            program: "ffmpeg".to_string(),
        }
    }

    /// Run one ffmpeg invocation to completion, surfacing stderr on
    /// failure.
    pub async fn run(&self, args: &[String]) -> ShortForgeResult<()> {
        debug!("ffmpeg {}", args.join(" "));
        let output = Command::new(&self.program).args(args).output().await?;
        if !output.status.success() {
            return Err(ShortForgeError::FfmpegError {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        info!("ffmpeg invocation complete");
        Ok(())
    }
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape a path for use inside an ffmpeg filtergraph, where `:`
/// separates options and quotes delimit values.
pub fn escape_filter_path(path: &str) -> String {
    path.replace(':', r"\:").replace('\'', r"\'")
}

/// force_style clause for the subtitles filter
pub fn style_clause(style: &SubtitleStyle) -> String {
    format!(
        "Fontsize={},Outline={},Shadow={},MarginV={}",
        style.font_size, style.outline, style.shadow, style.margin_v
    )
}

/// Build the argv assembling the base video: every scene becomes one
/// input fitted to the output geometry (looped/trimmed to its scene
/// duration, Ken Burns zoom for stills), concatenated and muxed with
/// the narration audio under a short fade in/out.
pub fn build_base_args(
    plans: &[ScenePlan],
    audio: &Path,
    out: &Path,
    render: &RenderConfig,
) -> Vec<String> {
    let (w, h, fps) = (render.width, render.height, render.fps);
    let mut args: Vec<String> = vec!["-y".into()];

    for plan in plans {
        let dur = format!("{:.3}", plan.duration);
        match &plan.source {
            SceneSource::Video(path) => {
                // -stream_loop repeats short clips; -t trims long ones
                args.extend([
                    "-stream_loop".into(),
                    "-1".into(),
                    "-t".into(),
                    dur,
                    "-i".into(),
                    path.display().to_string(),
                ]);
            }
            SceneSource::Still(path) => {
                args.extend([
                    "-loop".into(),
                    "1".into(),
                    "-t".into(),
                    dur,
                    "-i".into(),
                    path.display().to_string(),
                ]);
            }
            SceneSource::Color => {
                args.extend([
                    "-f".into(),
                    "lavfi".into(),
                    "-t".into(),
                    dur,
                    "-i".into(),
                    format!("color=c=black:s={}x{}:r={}", w, h, fps),
                ]);
            }
        }
    }
    args.extend(["-i".into(), audio.display().to_string()]);

    let mut filters: Vec<String> = Vec::new();
    for (i, plan) in plans.iter().enumerate() {
        let chain = match &plan.source {
            SceneSource::Video(_) => format!(
                "[{i}:v]scale={w}:{h}:force_original_aspect_ratio=increase,\
                 crop={w}:{h},fps={fps},setpts=PTS-STARTPTS[v{i}]"
            ),
            SceneSource::Still(_) => {
                let frames = (plan.duration * fps as f64).ceil().max(1.0);
                format!(
                    "[{i}:v]scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},\
                     zoompan=z='1+0.08*on/{frames}':d=1:\
                     x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':s={w}x{h}:fps={fps}[v{i}]"
                )
            }
            SceneSource::Color => format!("[{i}:v]fps={fps},setpts=PTS-STARTPTS[v{i}]"),
        };
        filters.push(chain);
    }

    let labels: String = (0..plans.len()).map(|i| format!("[v{i}]")).collect();
    let total: f64 = plans.iter().map(|p| p.duration).sum();
    filters.push(format!(
        "{}concat=n={}:v=1:a=0,fade=t=in:st=0:d=0.1,fade=t=out:st={:.3}:d=0.1[vout]",
        labels,
        plans.len(),
        (total - 0.1).max(0.0)
    ));

    args.extend([
        "-filter_complex".into(),
        filters.join(";"),
        "-map".into(),
        "[vout]".into(),
        "-map".into(),
        format!("{}:a", plans.len()),
        "-c:v".into(),
        "libx264".into(),
        "-b:v".into(),
        render.video_bitrate.clone(),
        "-r".into(),
        fps.to_string(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-c:a".into(),
        "aac".into(),
        "-shortest".into(),
        out.display().to_string(),
    ]);
    args
}

/// Build the argv mixing a looping music bed under the narration:
/// loudness-normalize the music, drop it by the ducking offset, then
/// amix against the voice with the video stream copied through.
pub fn build_music_mix_args(
    video_in: &Path,
    music: &Path,
    out: &Path,
    music_cfg: &MusicConfig,
    render: &RenderConfig,
) -> Vec<String> {
    let filter = format!(
        "[1:a]loudnorm=I={}:TP=-1.5:LRA=11,volume={}dB[bg];\
         [0:a][bg]amix=inputs=2:duration=first:dropout_transition=0[outa]",
        music_cfg.music_db, music_cfg.ducking_db
    );
    vec![
        "-y".into(),
        "-i".into(),
        video_in.display().to_string(),
        "-stream_loop".into(),
        "-1".into(),
        "-i".into(),
        music.display().to_string(),
        "-filter_complex".into(),
        filter,
        "-map".into(),
        "0:v".into(),
        "-map".into(),
        "[outa]".into(),
        "-c:v".into(),
        "copy".into(),
        "-c:a".into(),
        "aac".into(),
        "-b:a".into(),
        render.audio_bitrate.clone(),
        "-shortest".into(),
        out.display().to_string(),
    ]
}

/// Build the argv burning a subtitle track over the video with the
/// configured ASS style overrides.
pub fn build_burn_args(
    video_in: &Path,
    srt: &Path,
    out: &Path,
    style: &SubtitleStyle,
) -> Vec<String> {
    let vf = format!(
        "subtitles='{}':force_style='{}'",
        escape_filter_path(&srt.display().to_string()),
        style_clause(style)
    );
    vec![
        "-y".into(),
        "-i".into(),
        video_in.display().to_string(),
        "-vf".into(),
        vf,
        "-c:a".into(),
        "copy".into(),
        out.display().to_string(),
    ]
}
