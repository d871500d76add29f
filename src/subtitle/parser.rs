//! Permissive SRT-style transcript parser
//!
//! Transcription output is noisy, so the parser never fails: blocks
//! missing a usable time-range line are dropped and only counted for
//! diagnostics.

use crate::subtitle::timestamp::parse_time_range;
use crate::subtitle::Segment;
use tracing::debug;

/// Parse a timestamped-block transcript into ordered segments.
///
/// Blocks are separated by blank lines. A valid block carries at least
/// an index line (content ignored) and a time-range line; remaining
/// lines are joined with single spaces into the segment text. The final
/// block is flushed even without a trailing blank line.
pub fn parse_track(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut skipped = 0usize;
    let mut block: Vec<&str> = Vec::new();

    for line in input.lines() {
        if line.trim().is_empty() {
            flush_block(&block, &mut segments, &mut skipped);
            block.clear();
        } else {
            block.push(line);
        }
    }
    flush_block(&block, &mut segments, &mut skipped);

    if skipped > 0 {
        debug!(skipped, "dropped malformed transcript blocks");
    }
    segments
}

fn flush_block(block: &[&str], out: &mut Vec<Segment>, skipped: &mut usize) {
    if block.is_empty() {
        return;
    }
    if block.len() >= 2 {
        if let Some((start, end)) = parse_time_range(block[1]) {
            let text = block[2..]
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            out.push(Segment::new(start, end, text));
            return;
        }
    }
    *skipped += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\n00:00:00,000 --> 00:00:01,500\nHola mundo\n\n2\n00:00:01,500 --> 00:00:04,000\nesto es\nuna prueba\n";

    #[test]
    fn test_parse_blocks() {
        let segments = parse_track(SAMPLE);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Hola mundo");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 1.5);
        // Multi-line text joins with single spaces
        assert_eq!(segments[1].text, "esto es una prueba");
    }

    #[test]
    fn test_final_block_flushed_without_trailing_blank() {
        let input = "1\n00:00:00,000 --> 00:00:01,000\nlast block";
        let segments = parse_track(input);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "last block");
    }

    #[test]
    fn test_malformed_blocks_dropped_silently() {
        let input = "garbage without timing\n\n1\n00:00:00,000 --> 00:00:01,000\nok\n\nonly one line\n";
        let segments = parse_track(input);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "ok");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_track("").is_empty());
        assert!(parse_track("\n\n\n").is_empty());
    }
}
