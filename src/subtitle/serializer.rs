//! Cue track serialization back to the timestamped-block format

use crate::subtitle::timestamp::format_timestamp;
use crate::subtitle::Cue;

/// Render cues as `index`, `start --> end`, text, blank-line blocks.
/// Exact inverse of the parser for well-formed tracks.
pub fn serialize_cues(cues: &[Cue]) -> String {
    let mut output = String::new();
    for cue in cues {
        output.push_str(&format!("{}\n", cue.index));
        output.push_str(&format!(
            "{} --> {}\n",
            format_timestamp(cue.start),
            format_timestamp(cue.end)
        ));
        output.push_str(&cue.text);
        output.push('\n');
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitle::parser::parse_track;

    #[test]
    fn test_serialize_block_shape() {
        let cues = vec![Cue {
            index: 1,
            start: 1.0,
            end: 4.0,
            text: "Hola mundo".into(),
        }];
        let output = serialize_cues(&cues);
        assert_eq!(output, "1\n00:00:01,000 --> 00:00:04,000\nHola mundo\n\n");
    }

    #[test]
    fn test_serialize_multiline_text() {
        let cues = vec![Cue {
            index: 1,
            start: 0.0,
            end: 2.0,
            text: "linea uno\nlinea dos".into(),
        }];
        let output = serialize_cues(&cues);
        assert!(output.contains("linea uno\nlinea dos\n\n"));
    }

    #[test]
    fn test_roundtrip_through_parser() {
        let cues = vec![
            Cue {
                index: 1,
                start: 0.12,
                end: 1.5,
                text: "uno".into(),
            },
            Cue {
                index: 2,
                start: 1.5,
                end: 3.033,
                text: "dos tres".into(),
            },
        ];
        let segments = parse_track(&serialize_cues(&cues));
        assert_eq!(segments.len(), cues.len());
        for (cue, seg) in cues.iter().zip(&segments) {
            assert!((cue.start - seg.start).abs() <= 0.001);
            assert!((cue.end - seg.end).abs() <= 0.001);
            assert_eq!(cue.text, seg.text);
        }
    }

    #[test]
    fn test_empty_track() {
        assert_eq!(serialize_cues(&[]), "");
    }
}
