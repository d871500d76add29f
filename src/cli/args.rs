//! Command-line argument definitions

use clap::Args;
use std::path::PathBuf;

/// Arguments for the scenes command
#[derive(Args, Debug)]
pub struct ScenesArgs {
    /// Input SRT transcript path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Minimum scene duration in seconds
    #[arg(long, default_value_t = 2.0)]
    pub min_scene: f64,

    /// Maximum scene duration in seconds
    #[arg(long, default_value_t = 5.0)]
    pub max_scene: f64,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the cues command
#[derive(Args, Debug)]
pub struct CuesArgs {
    /// Input SRT transcript path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output SRT path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum cue duration in seconds
    #[arg(long, default_value_t = 0.12)]
    pub min_duration: f64,

    /// Words per cue before the duration floor forces larger groups
    #[arg(long, default_value_t = 1)]
    pub words_per_chunk: usize,
}

/// Arguments for the wrap command
#[derive(Args, Debug)]
pub struct WrapArgs {
    /// Input SRT path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output SRT path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum characters per subtitle line
    #[arg(long, default_value_t = 30)]
    pub max_chars: usize,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Narration audio file
    #[arg(short, long)]
    pub audio: PathBuf,

    /// SRT transcript aligned with the narration
    #[arg(short, long)]
    pub srt: PathBuf,

    /// Output video path (default: auto-generated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the background music pass
    #[arg(long)]
    pub no_music: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
