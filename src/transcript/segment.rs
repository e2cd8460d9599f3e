//! Segmentation strategies for cue sequences.
//!
//! Splits a flat cue sequence into time-bounded segments, either by equal
//! time windows or at natural pauses. Strategies sit behind a trait so a
//! smarter scorer can slot in without touching the pipeline.

use super::format::format_timestamp;
use crate::captions::Cue;
use serde::{Deserialize, Serialize};

/// Minimum pause that can ever start a new segment, in milliseconds.
const MIN_PAUSE_MS: f64 = 1000.0;

/// A time-bounded group of cues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the first cue, in milliseconds.
    pub start_ms: u64,
    /// End of the last cue, in milliseconds.
    pub end_ms: u64,
    /// Cues in this segment, chronological.
    pub cues: Vec<Cue>,
}

impl Segment {
    /// Build a segment spanning a non-empty run of cues.
    fn from_cues(cues: Vec<Cue>) -> Self {
        let start_ms = cues.first().map(|c| c.offset_ms).unwrap_or(0);
        let end_ms = cues.last().map(|c| c.end_ms()).unwrap_or(start_ms);
        Self {
            start_ms,
            end_ms,
            cues,
        }
    }

    /// Formatted start boundary.
    pub fn start_label(&self) -> String {
        format_timestamp(self.start_ms as f64 / 1000.0)
    }

    /// Formatted end boundary.
    pub fn end_label(&self) -> String {
        format_timestamp(self.end_ms as f64 / 1000.0)
    }
}

/// Segmentation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMethod {
    /// Equal-duration time windows.
    #[default]
    Equal,
    /// Boundaries at natural pauses.
    Smart,
}

impl std::str::FromStr for SegmentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equal" => Ok(SegmentMethod::Equal),
            "smart" => Ok(SegmentMethod::Smart),
            _ => Err(format!("Unknown segmentation method: {}", s)),
        }
    }
}

/// Trait for segmentation implementations.
pub trait Segmenter: Send + Sync {
    /// Split cues into at most `count` segments. Every input cue appears in
    /// exactly one output segment; order is preserved.
    fn segment(&self, cues: &[Cue], count: usize) -> Vec<Segment>;
}

/// Create a segmenter for the method.
pub fn create_segmenter(method: SegmentMethod) -> Box<dyn Segmenter> {
    match method {
        SegmentMethod::Equal => Box::new(EqualSegmenter),
        SegmentMethod::Smart => Box::new(PauseSegmenter),
    }
}

/// Splits the total time span into equal-duration windows.
///
/// Each cue is assigned to the window containing its start offset; windows
/// that end up with no cues are omitted.
pub struct EqualSegmenter;

impl Segmenter for EqualSegmenter {
    fn segment(&self, cues: &[Cue], count: usize) -> Vec<Segment> {
        if cues.is_empty() {
            return Vec::new();
        }

        let first = cues[0].offset_ms;
        let span = cues
            .last()
            .map(|c| c.end_ms().saturating_sub(first))
            .unwrap_or(0);

        if count <= 1 || span == 0 {
            return vec![Segment::from_cues(cues.to_vec())];
        }

        let window = span as f64 / count as f64;
        let mut buckets: Vec<Vec<Cue>> = vec![Vec::new(); count];
        for cue in cues {
            let idx = (((cue.offset_ms - first) as f64 / window) as usize).min(count - 1);
            buckets[idx].push(cue.clone());
        }

        buckets
            .into_iter()
            .filter(|bucket| !bucket.is_empty())
            .map(Segment::from_cues)
            .collect()
    }
}

/// Breaks at natural pauses in the caption flow.
///
/// The pause threshold is three times the average positive gap between
/// consecutive cues, floored at one second. Breaking stops after `count - 1`
/// boundaries so the final segment absorbs the remainder. This is a
/// statistical heuristic over cue timing, not content analysis.
pub struct PauseSegmenter;

impl PauseSegmenter {
    /// Gap between two consecutive cues, in milliseconds. Negative when cues
    /// overlap.
    fn gap(prev: &Cue, next: &Cue) -> i64 {
        next.offset_ms as i64 - prev.end_ms() as i64
    }

    /// Pause threshold over the positive gaps, or `None` when the cues never
    /// pause at all.
    fn pause_threshold(cues: &[Cue]) -> Option<f64> {
        let gaps: Vec<i64> = cues
            .windows(2)
            .map(|pair| Self::gap(&pair[0], &pair[1]))
            .filter(|gap| *gap > 0)
            .collect();

        if gaps.is_empty() {
            return None;
        }

        let average = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
        Some((3.0 * average).max(MIN_PAUSE_MS))
    }
}

impl Segmenter for PauseSegmenter {
    fn segment(&self, cues: &[Cue], count: usize) -> Vec<Segment> {
        if cues.is_empty() {
            return Vec::new();
        }

        let threshold = match Self::pause_threshold(cues) {
            Some(threshold) if count > 1 => threshold,
            _ => return vec![Segment::from_cues(cues.to_vec())],
        };

        let mut segments = Vec::new();
        let mut current = vec![cues[0].clone()];
        let mut breaks = 0;

        for pair in cues.windows(2) {
            let next = &pair[1];
            if breaks < count - 1 && Self::gap(&pair[0], next) as f64 > threshold {
                segments.push(Segment::from_cues(std::mem::take(&mut current)));
                breaks += 1;
            }
            current.push(next.clone());
        }
        segments.push(Segment::from_cues(current));

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(offset_ms: u64, duration_ms: u64) -> Cue {
        Cue::new(format!("cue at {}", offset_ms), offset_ms, duration_ms)
    }

    fn total_cues(segments: &[Segment]) -> usize {
        segments.iter().map(|s| s.cues.len()).sum()
    }

    #[test]
    fn test_equal_partitions_by_time() {
        // 0-60s of cues, unevenly distributed: most in the first half.
        let cues = vec![
            cue(0, 1000),
            cue(5_000, 1000),
            cue(10_000, 1000),
            cue(25_000, 1000),
            cue(55_000, 5000),
        ];

        let segments = EqualSegmenter.segment(&cues, 2);

        assert_eq!(segments.len(), 2);
        assert_eq!(total_cues(&segments), cues.len());
        // Windows are duration-based: the 30s midpoint splits 4 / 1.
        assert_eq!(segments[0].cues.len(), 4);
        assert_eq!(segments[1].cues.len(), 1);
        assert!(segments[0].start_ms <= segments[1].start_ms);
    }

    #[test]
    fn test_equal_count_one_spans_input() {
        let cues = vec![cue(2_000, 1000), cue(8_000, 2000)];
        let segments = EqualSegmenter.segment(&cues, 1);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_ms, 2_000);
        assert_eq!(segments[0].end_ms, 10_000);
        assert_eq!(segments[0].cues.len(), 2);
    }

    #[test]
    fn test_equal_omits_empty_windows() {
        // All cues in the first tenth of the span.
        let cues = vec![cue(0, 500), cue(1_000, 500), cue(100_000, 1000)];
        let segments = EqualSegmenter.segment(&cues, 10);

        assert!(segments.len() <= 10);
        assert_eq!(total_cues(&segments), 3);
        for pair in segments.windows(2) {
            assert!(pair[0].start_ms <= pair[1].start_ms);
        }
    }

    #[test]
    fn test_equal_empty_input() {
        assert!(EqualSegmenter.segment(&[], 4).is_empty());
    }

    /// Cues of 1s duration separated by the given gaps.
    fn cues_with_gaps(gaps: &[u64]) -> Vec<Cue> {
        let mut cues = vec![cue(0, 1000)];
        let mut offset = 0;
        for gap in gaps {
            offset += 1000 + gap;
            cues.push(cue(offset, 1000));
        }
        cues
    }

    #[test]
    fn test_smart_breaks_at_pauses() {
        // Mostly tight 200ms gaps with two 10s pauses. The average positive
        // gap is 2160ms, so the threshold lands at 6480ms: only the pauses
        // break.
        let cues = cues_with_gaps(&[200, 200, 200, 200, 10_000, 200, 200, 200, 10_000, 200]);

        let segments = PauseSegmenter.segment(&cues, 5);

        assert_eq!(segments.len(), 3);
        assert_eq!(total_cues(&segments), cues.len());
        assert_eq!(segments[0].cues.len(), 5);
        assert_eq!(segments[1].cues.len(), 4);
        assert_eq!(segments[2].cues.len(), 2);
    }

    #[test]
    fn test_smart_respects_count_limit() {
        // Two qualifying pauses, but count = 2 allows a single break; the
        // final segment absorbs everything after it, second pause included.
        let cues = cues_with_gaps(&[200, 200, 200, 200, 10_000, 200, 200, 200, 10_000, 200]);

        let segments = PauseSegmenter.segment(&cues, 2);

        assert_eq!(segments.len(), 2);
        assert_eq!(total_cues(&segments), cues.len());
        assert_eq!(segments[0].cues.len(), 5);
        assert_eq!(segments[1].cues.len(), 6);
    }

    #[test]
    fn test_smart_no_pauses_single_segment() {
        // Back-to-back cues, no positive gaps.
        let cues: Vec<Cue> = (0..4).map(|i| cue(i * 1000, 1000)).collect();

        let segments = PauseSegmenter.segment(&cues, 4);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].cues.len(), 4);
    }

    #[test]
    fn test_smart_threshold_floor() {
        // Uniform tiny 100ms gaps: average * 3 = 300ms, floored to 1s, so
        // nothing breaks.
        let cues: Vec<Cue> = (0..5).map(|i| cue(i * 1100, 1000)).collect();

        let segments = PauseSegmenter.segment(&cues, 5);
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_segment_labels() {
        let segment = Segment::from_cues(vec![cue(65_000, 5_000)]);
        assert_eq!(segment.start_label(), "01:05");
        assert_eq!(segment.end_label(), "01:10");
    }

    #[test]
    fn test_factory() {
        let cues = vec![cue(0, 1000), cue(30_000, 1000)];
        assert_eq!(create_segmenter(SegmentMethod::Equal).segment(&cues, 2).len(), 2);
        assert_eq!(
            "smart".parse::<SegmentMethod>().unwrap(),
            SegmentMethod::Smart
        );
        assert!("other".parse::<SegmentMethod>().is_err());
    }
}
