//! Time-range and search filters over cue sequences.
//!
//! Filters are pure functions from one cue sequence to a new one; the input
//! is never mutated.

use super::{SearchSpec, TimeRange, TranscriptOptions};
use crate::captions::Cue;

/// Keep cues that lie entirely within the range.
///
/// A cue straddling a boundary is excluded, not truncated.
pub fn filter_time_range(cues: &[Cue], range: &TimeRange) -> Vec<Cue> {
    cues.iter()
        .filter(|cue| {
            if let Some(start) = range.start {
                if cue.start_seconds() < start {
                    return false;
                }
            }
            if let Some(end) = range.end {
                if cue.end_seconds() > end {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Keep cues whose text contains the query, plus surrounding context.
///
/// Context windows around separate matches are unioned, so overlapping
/// windows contribute each cue once and order is preserved. Zero matches
/// yield an empty sequence, never the unfiltered input.
pub fn filter_search(cues: &[Cue], spec: &SearchSpec) -> Vec<Cue> {
    if cues.is_empty() {
        return Vec::new();
    }

    let query = if spec.case_sensitive {
        spec.query.clone()
    } else {
        spec.query.to_lowercase()
    };

    let mut include = vec![false; cues.len()];
    for (i, cue) in cues.iter().enumerate() {
        let matched = if spec.case_sensitive {
            cue.text.contains(&query)
        } else {
            cue.text.to_lowercase().contains(&query)
        };

        if matched {
            let lo = i.saturating_sub(spec.context_lines);
            let hi = (i + spec.context_lines).min(cues.len() - 1);
            for flag in &mut include[lo..=hi] {
                *flag = true;
            }
        }
    }

    cues.iter()
        .zip(include)
        .filter(|(_, keep)| *keep)
        .map(|(cue, _)| cue.clone())
        .collect()
}

/// Run the flat filters in their fixed order: time range, then search.
///
/// Segmentation, which restructures the sequence into buckets, is applied by
/// the formatter stage and intentionally not here.
pub fn apply_filters(cues: Vec<Cue>, options: &TranscriptOptions) -> Vec<Cue> {
    let mut cues = cues;

    if let Some(range) = &options.range {
        cues = filter_time_range(&cues, range);
    }

    if let Some(search) = &options.search {
        cues = filter_search(&cues, search);
    }

    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(text: &str, offset_ms: u64, duration_ms: u64) -> Cue {
        Cue::new(text, offset_ms, duration_ms)
    }

    fn sample_cues() -> Vec<Cue> {
        vec![
            cue("hello", 0, 1000),
            cue("world", 5000, 1000),
        ]
    }

    #[test]
    fn test_time_range_start_only() {
        let filtered = filter_time_range(
            &sample_cues(),
            &TimeRange {
                start: Some(4.0),
                end: None,
            },
        );

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text, "world");
    }

    #[test]
    fn test_time_range_excludes_straddling_cue() {
        let cues = vec![cue("straddles", 9_500, 2000), cue("inside", 12_000, 1000)];
        let filtered = filter_time_range(
            &cues,
            &TimeRange {
                start: Some(10.0),
                end: Some(15.0),
            },
        );

        // The first cue starts before the window, so it is dropped whole.
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text, "inside");
    }

    #[test]
    fn test_time_range_end_boundary() {
        let cues = vec![cue("fits", 0, 1000), cue("too long", 500, 1000)];
        let filtered = filter_time_range(
            &cues,
            &TimeRange {
                start: None,
                end: Some(1.0),
            },
        );

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text, "fits");
    }

    #[test]
    fn test_search_matches() {
        let filtered = filter_search(
            &sample_cues(),
            &SearchSpec {
                query: "hello".to_string(),
                case_sensitive: false,
                context_lines: 0,
            },
        );

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text, "hello");
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let filtered = filter_search(&sample_cues(), &SearchSpec::new("xyz"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_search_case_folding() {
        let cues = vec![cue("Hello World", 0, 1000)];

        let insensitive = filter_search(&cues, &SearchSpec::new("hello"));
        assert_eq!(insensitive.len(), 1);

        let sensitive = filter_search(
            &cues,
            &SearchSpec {
                query: "hello".to_string(),
                case_sensitive: true,
                context_lines: 0,
            },
        );
        assert!(sensitive.is_empty());
    }

    #[test]
    fn test_search_context_union() {
        let cues: Vec<Cue> = (0..6)
            .map(|i| cue(if i == 2 || i == 3 { "match" } else { "filler" }, i * 1000, 900))
            .collect();

        let filtered = filter_search(
            &cues,
            &SearchSpec {
                query: "match".to_string(),
                case_sensitive: false,
                context_lines: 1,
            },
        );

        // Windows [1..=3] and [2..=4] union to [1..=4]; each cue once, in order.
        assert_eq!(filtered.len(), 4);
        assert_eq!(filtered[0].offset_ms, 1000);
        assert_eq!(filtered[3].offset_ms, 4000);
    }

    #[test]
    fn test_search_context_clamped_at_bounds() {
        let cues = vec![cue("match", 0, 1000), cue("after", 1000, 1000)];
        let filtered = filter_search(
            &cues,
            &SearchSpec {
                query: "match".to_string(),
                case_sensitive: false,
                context_lines: 5,
            },
        );

        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filters_compose_in_order() {
        let cues = vec![
            cue("early match", 0, 1000),
            cue("late match", 10_000, 1000),
        ];
        let options = TranscriptOptions {
            range: Some(TimeRange {
                start: Some(5.0),
                end: None,
            }),
            search: Some(SearchSpec {
                query: "match".to_string(),
                case_sensitive: false,
                context_lines: 0,
            }),
            ..Default::default()
        };

        // The time range scopes what the search can match.
        let filtered = apply_filters(cues, &options);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text, "late match");
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let options = TranscriptOptions {
            search: Some(SearchSpec::new("anything")),
            ..Default::default()
        };
        assert!(apply_filters(Vec::new(), &options).is_empty());
    }
}
