//! Greedy merge of transcript segments into b-roll scenes

use crate::subtitle::{Scene, Segment};

/// Coalesce adjacent segments into scenes of roughly `min_scene` to
/// `max_scene` seconds.
///
/// Single greedy pass: while the accumulator is still shorter than
/// `min_scene` and absorbing the next segment would not push it past
/// `max_scene`, the segment is merged in. The merge decision is always
/// evaluated against the running accumulator start, never the original
/// segment boundaries, and a closed scene is never reopened. The final
/// scene may come out shorter than `min_scene` when no segments remain
/// to merge.
pub fn merge_scenes(segments: &[Segment], min_scene: f64, max_scene: f64) -> Vec<Scene> {
    let mut iter = segments.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut scenes = Vec::new();
    let mut acc = Scene {
        start: first.start,
        end: first.end,
        text: first.text.clone(),
    };

    for seg in iter {
        let cur_dur = acc.end - acc.start;
        let prospective_dur = seg.end - acc.start;
        if cur_dur < min_scene && prospective_dur <= max_scene {
            acc.end = seg.end;
            acc.text = format!("{} {}", acc.text, seg.text).trim().to_string();
        } else {
            scenes.push(acc);
            acc = Scene {
                start: seg.start,
                end: seg.end,
                text: seg.text.clone(),
            };
        }
    }
    scenes.push(acc);
    scenes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64, text: &str) -> Segment {
        Segment::new(start, end, text)
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_scenes(&[], 2.0, 5.0).is_empty());
    }

    #[test]
    fn test_single_segment_passes_through() {
        let scenes = merge_scenes(&[seg(0.0, 1.0, "solo")], 2.0, 5.0);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0], Scene { start: 0.0, end: 1.0, text: "solo".into() });
    }

    #[test]
    fn test_short_segments_merge_into_one_scene() {
        let segments = [
            seg(0.0, 1.0, "Hola"),
            seg(1.0, 1.5, "mundo"),
            seg(1.5, 4.0, "esto es una prueba"),
        ];
        let scenes = merge_scenes(&segments, 2.0, 5.0);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].start, 0.0);
        assert_eq!(scenes[0].end, 4.0);
        assert_eq!(scenes[0].text, "Hola mundo esto es una prueba");
    }

    #[test]
    fn test_scene_closes_when_max_would_be_exceeded() {
        let segments = [
            seg(0.0, 1.0, "a"),
            seg(1.0, 6.0, "b"), // prospective 6.0 > max_scene
            seg(6.0, 6.5, "c"),
        ];
        let scenes = merge_scenes(&segments, 2.0, 5.0);
        assert_eq!(scenes.len(), 3);
        assert_eq!(scenes[0].text, "a");
        assert_eq!(scenes[1].text, "b");
        // Final scene may be shorter than min_scene
        assert_eq!(scenes[2].text, "c");
        assert!(scenes[2].duration() < 2.0);
    }

    #[test]
    fn test_scene_closes_once_min_reached() {
        let segments = [
            seg(0.0, 2.5, "a"),
            seg(2.5, 3.0, "b"), // cur_dur 2.5 >= min, closes
        ];
        let scenes = merge_scenes(&segments, 2.0, 5.0);
        assert_eq!(scenes.len(), 2);
    }

    #[test]
    fn test_no_scene_exceeds_max_except_oversized_input() {
        let segments = [
            seg(0.0, 0.5, "a"),
            seg(0.5, 1.2, "b"),
            seg(1.2, 1.8, "c"),
            seg(1.8, 3.4, "d"),
            seg(3.4, 4.9, "e"),
            seg(4.9, 6.1, "f"),
        ];
        let scenes = merge_scenes(&segments, 2.0, 5.0);
        for scene in &scenes[..scenes.len() - 1] {
            assert!(scene.duration() <= 5.0, "scene too long: {:?}", scene);
        }
        // Greedy exhaustion: any scene under min_scene that is not last
        // must have been blocked by max_scene
        for (i, scene) in scenes.iter().enumerate() {
            if i + 1 < scenes.len() && scene.duration() < 2.0 {
                let next_end = segments
                    .iter()
                    .find(|s| s.start >= scene.end)
                    .map(|s| s.end)
                    .unwrap();
                assert!(next_end - scene.start > 5.0);
            }
        }
    }
}
