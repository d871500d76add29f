//! Transcript and subtitle track processing
//!
//! Converts raw time-aligned transcripts into merged scenes for b-roll
//! selection and into fine-grained caption cues for burn-in. All
//! functions here are pure and operate on in-memory lists; file and
//! network I/O belongs to the callers.

pub mod chunker;
pub mod parser;
pub mod scenes;
pub mod serializer;
pub mod timestamp;

use serde::Serialize;

/// One time-aligned transcript unit as produced by the parser or a
/// transcription provider. Ordered by non-decreasing `start` and assumed
/// non-overlapping; that invariant is inherited from the upstream
/// source, not recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A single word with its real start/end timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// A segment enriched with per-word timestamps from a transcription
/// provider. `words` may be empty when the provider could not align
/// individual words.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscribedSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub words: Vec<WordTiming>,
}

/// A merged group of segments sized for b-roll assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Scene {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One subtitle display unit. `text` holds one or two display lines
/// separated by a single `\n`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    /// 1-based sequential index within the track
    pub index: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
}
