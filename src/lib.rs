//! ShortForge
//!
//! Assembles short vertical videos from narration audio: the transcript
//! is merged into b-roll scenes, each scene is matched to stock footage,
//! a photo, or a generated still, a commercially licensed music bed is
//! mixed under the voice, and word-level subtitles are burned on top.
//!
//! The library splits into pure transcript processing ([`subtitle`]),
//! provider contracts ([`ports`]) with their HTTP and process adapters
//! ([`adapters`]), and the b-roll planner ([`compose`]). The [`cli`]
//! module wires them together.

pub mod adapters;
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod ports;
pub mod subtitle;

pub use error::{ShortForgeError, ShortForgeResult};
pub use subtitle::{Cue, Scene, Segment};
