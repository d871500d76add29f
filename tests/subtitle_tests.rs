//! End-to-end tests over the transcript processing pipeline

use shortforge::subtitle::chunker::{chunk_uniform, wrap_cues};
use shortforge::subtitle::parser::parse_track;
use shortforge::subtitle::scenes::merge_scenes;
use shortforge::subtitle::serializer::serialize_cues;
use shortforge::subtitle::timestamp::{format_timestamp, parse_timestamp};

const SAMPLE_TRACK: &str = "\
1
00:00:00,000 --> 00:00:01,000
Hola mundo

2
00:00:01,000 --> 00:00:01,500
esto es

3
00:00:01,500 --> 00:00:04,000
una prueba completa
";

#[test]
fn parse_then_merge_produces_single_scene() {
    let segments = parse_track(SAMPLE_TRACK);
    assert_eq!(segments.len(), 3);

    let scenes = merge_scenes(&segments, 2.0, 5.0);
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].start, 0.0);
    assert_eq!(scenes[0].end, 4.0);
    assert_eq!(scenes[0].text, "Hola mundo esto es una prueba completa");
}

#[test]
fn merged_scenes_cover_the_original_span() {
    let segments = parse_track(SAMPLE_TRACK);
    let scenes = merge_scenes(&segments, 2.0, 5.0);

    assert_eq!(scenes.first().map(|s| s.start), Some(0.0));
    assert_eq!(scenes.last().map(|s| s.end), Some(4.0));
    for pair in scenes.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn uniform_cues_tile_each_segment_without_gaps() {
    let segments = parse_track(SAMPLE_TRACK);
    let cues = chunk_uniform(&segments, 0.12, 1);

    // One cue per word across the three blocks
    assert_eq!(cues.len(), 7);
    assert_eq!(cues[0].text, "Hola");
    assert_eq!(cues[0].start, 0.0);
    assert!((cues[0].end - 0.5).abs() < 1e-9);

    for (i, cue) in cues.iter().enumerate() {
        assert_eq!(cue.index, (i + 1) as u32);
        assert!(cue.end > cue.start);
    }
    for pair in cues.windows(2) {
        assert!(pair[0].end <= pair[1].start + 1e-9);
    }
    assert!((cues[6].end - 4.0).abs() < 1e-9);
}

#[test]
fn serialized_cues_reparse_to_the_same_track() {
    let segments = parse_track(SAMPLE_TRACK);
    let cues = chunk_uniform(&segments, 0.12, 2);
    let rendered = serialize_cues(&cues);

    let reparsed = parse_track(&rendered);
    assert_eq!(reparsed.len(), cues.len());
    for (cue, segment) in cues.iter().zip(&reparsed) {
        // SRT carries millisecond precision
        assert!((cue.start - segment.start).abs() <= 0.001);
        assert!((cue.end - segment.end).abs() <= 0.001);
        assert_eq!(cue.text, segment.text);
    }
}

#[test]
fn wrapped_cues_respect_the_two_line_cap() {
    let segments = parse_track(
        "1
00:00:00,000 --> 00:00:05,000
una frase bastante larga que no cabe en una sola linea corta
",
    );
    let cues = chunk_uniform(&segments, 0.12, 12);
    let wrapped = wrap_cues(&cues, 30);

    for cue in &wrapped {
        let lines: Vec<&str> = cue.text.lines().collect();
        assert!(lines.len() <= 2);
        assert!(lines[0].chars().count() <= 30);
    }
}

#[test]
fn timestamp_codec_is_stable_at_millisecond_precision() {
    for &t in &[0.0, 0.001, 1.9996, 65.4321, 3599.999, 359_999.999] {
        let rendered = format_timestamp(t);
        let parsed = parse_timestamp(&rendered).unwrap();
        assert!(
            (parsed - t).abs() <= 0.001,
            "t={t} rendered={rendered} parsed={parsed}"
        );
    }
}

#[test]
fn malformed_blocks_do_not_poison_the_pipeline() {
    let track = "\
garbage without timing

1
00:00:00,000 --> 00:00:02,000
valida

not-a-time --> also-not-a-time
perdida
";
    let segments = parse_track(track);
    assert_eq!(segments.len(), 1);

    let scenes = merge_scenes(&segments, 2.0, 5.0);
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].text, "valida");
}
