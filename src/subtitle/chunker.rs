//! Subtitle cue chunking
//!
//! Three strategies for re-segmenting transcript text into display
//! cues: word-timed (real per-word timestamps), uniform (equal-length
//! slices of a segment) and line-wrap (re-flow of an existing track
//! into at most two display lines).

use crate::subtitle::{Cue, Segment, TranscribedSegment, WordTiming};

/// Punctuation stripped from token ends before chunking
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '¡', '¿', '(', ')', '[', ']', '«', '»', '"', '\'',
];

/// Guard against a zero word duration when a segment has no measurable span
const EPSILON: f64 = 1e-6;

/// Split text on whitespace and strip leading/trailing punctuation from
/// each token, discarding tokens that become empty.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|tok| tok.trim_matches(PUNCTUATION))
        .filter(|tok| !tok.is_empty())
        .collect()
}

fn push_cue(cues: &mut Vec<Cue>, start: f64, end: f64, text: String) {
    let index = cues.len() as u32 + 1;
    cues.push(Cue {
        index,
        start,
        end,
        text,
    });
}

/// Chunk segments with real per-word timestamps into cues of at least
/// `min_dur` seconds.
///
/// Words accumulate into a buffer that flushes as soon as the buffered
/// span reaches `min_dur`; the trailing buffer flushes as a final,
/// possibly shorter cue. Segments without word timings fall back to a
/// single cue spanning the whole segment.
pub fn chunk_by_words(segments: &[TranscribedSegment], min_dur: f64) -> Vec<Cue> {
    let mut cues = Vec::new();

    for seg in segments {
        if seg.words.is_empty() {
            push_cue(&mut cues, seg.start, seg.end, seg.text.trim().to_string());
            continue;
        }

        let mut buf: Vec<&WordTiming> = Vec::new();
        for word in &seg.words {
            buf.push(word);
            let span = buf[buf.len() - 1].end - buf[0].start;
            if span >= min_dur {
                let text = buf
                    .iter()
                    .map(|w| w.word.trim())
                    .collect::<Vec<_>>()
                    .join(" ");
                push_cue(&mut cues, buf[0].start, buf[buf.len() - 1].end, text);
                buf.clear();
            }
        }
        if !buf.is_empty() {
            let text = buf
                .iter()
                .map(|w| w.word.trim())
                .collect::<Vec<_>>()
                .join(" ");
            push_cue(&mut cues, buf[0].start, buf[buf.len() - 1].end, text);
        }
    }
    cues
}

/// Chunk segments into equal-duration cues when only segment-level
/// timestamps are available.
///
/// The group size grows automatically when the per-word duration is so
/// short that `words_per_chunk` words would flash by in under `min_dur`.
/// Cues inside one segment are exactly equal-length, not proportional
/// to word length.
pub fn chunk_uniform(segments: &[Segment], min_dur: f64, words_per_chunk: usize) -> Vec<Cue> {
    let mut cues = Vec::new();

    for seg in segments {
        let tokens = tokenize(&seg.text);
        if tokens.is_empty() {
            continue;
        }

        // Degenerate spans clamp to a minimal positive duration so no
        // cue comes out zero-length or negative
        let dur = (seg.end - seg.start).max(0.01);
        let base_word_dur = dur / tokens.len() as f64;
        let auto_group = (min_dur / base_word_dur.max(EPSILON)).ceil() as usize;
        let group = words_per_chunk.max(auto_group).max(1);

        let n_cues = tokens.len().div_ceil(group);
        let cue_dur = dur / n_cues as f64;
        let end_bound = seg.start + dur;

        for (k, chunk) in tokens.chunks(group).enumerate() {
            let start = seg.start + k as f64 * cue_dur;
            let end = (start + cue_dur).min(end_bound);
            push_cue(&mut cues, start, end, chunk.join(" "));
        }
    }
    cues
}

/// Re-wrap cue text into at most two display lines of roughly
/// `max_chars` characters, passing timing through untouched.
///
/// Wrapping is greedy on word boundaries and never splits a word; when
/// more than two lines result, everything past the first line collapses
/// into one second line.
pub fn wrap_cues(cues: &[Cue], max_chars: usize) -> Vec<Cue> {
    cues.iter()
        .map(|cue| {
            let joined = cue.text.split_whitespace().collect::<Vec<_>>().join(" ");
            let lines = fill(&joined, max_chars);
            let text = match lines.len() {
                0 => String::new(),
                1 => lines[0].clone(),
                _ => format!("{}\n{}", lines[0], lines[1..].join(" ")),
            };
            Cue {
                index: cue.index,
                start: cue.start,
                end: cue.end,
                text,
            }
        })
        .collect()
}

/// Greedy word-boundary wrap into lines of at most `width` characters.
/// A single word longer than `width` gets its own overlong line.
fn fill(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if line.is_empty() {
            line.push_str(word);
            line_chars = word_chars;
        } else if line_chars + 1 + word_chars <= width {
            line.push(' ');
            line.push_str(word);
            line_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_chars = word_chars;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
