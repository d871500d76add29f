//! CLI module for ShortForge
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{BuildArgs, CuesArgs, ScenesArgs, WrapArgs};

/// ShortForge
///
/// Assembles short vertical videos from a narration track: merges the
/// transcript into b-roll scenes, fetches matching footage and music,
/// and burns word-level subtitles over the result.
#[derive(Parser)]
#[command(name = "shortforge")]
#[command(about = "ShortForge - vertical shorts from narration audio")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Merge a transcript into b-roll scenes
    Scenes(args::ScenesArgs),
    /// Re-chunk a transcript into short subtitle cues
    Cues(args::CuesArgs),
    /// Re-wrap subtitle text to short lines
    Wrap(args::WrapArgs),
    /// Build the final short from narration audio and its transcript
    Build(args::BuildArgs),
}
