//! ShortForge CLI
//!
//! Builds short vertical videos from a narration track and its SRT
//! transcript.
//!
//! # Usage
//!
//! ```bash
//! shortforge scenes --input voz.srt
//! shortforge cues --input voz.srt --output voz_words.srt
//! shortforge wrap --input voz.srt --output voz_wrapped.srt --max-chars 30
//! shortforge build --audio voz.mp3 --srt voz.srt
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use shortforge::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scenes(args) => commands::scenes(args)?,
        Commands::Cues(args) => commands::cues(args)?,
        Commands::Wrap(args) => commands::wrap(args)?,
        Commands::Build(args) => commands::build(args).await?,
    }

    info!("Done");
    Ok(())
}
