//! Time-range windowing.
//!
//! A requested range `[start, end)` is split into fixed-size sub-windows of
//! `step` minutes, the last one clipped to `end`. Windows tile the range
//! exactly: increasing time order, contiguous, non-overlapping.

use serde::{Deserialize, Serialize};

/// One query window, `[start, end)` in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: i64,
    pub end: i64,
}

impl Window {
    pub fn duration_secs(&self) -> i64 {
        self.end - self.start
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Partition `[start, end)` into windows of at most `step_minutes`.
///
/// A non-positive step or an empty range yields no windows. The guard is
/// load-bearing: without it the cursor never advances and the loop would not
/// terminate.
pub fn plan_windows(start: i64, end: i64, step_minutes: i64) -> Vec<Window> {
    if step_minutes <= 0 || start >= end {
        return Vec::new();
    }

    // Saturating arithmetic: a huge step near i64::MAX must clip, not wrap.
    let step = step_minutes.saturating_mul(60);
    let mut windows = Vec::new();
    let mut cursor = start;
    while cursor < end {
        windows.push(Window {
            start: cursor,
            end: end.min(cursor.saturating_add(step)),
        });
        cursor = cursor.saturating_add(step);
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_window_when_range_fits_step() {
        let windows = plan_windows(0, 120, 5);
        assert_eq!(windows, [Window { start: 0, end: 120 }]);
    }

    #[test]
    fn last_window_clipped_to_end() {
        let windows = plan_windows(0, 700, 5);
        assert_eq!(
            windows,
            [
                Window { start: 0, end: 300 },
                Window {
                    start: 300,
                    end: 600
                },
                Window {
                    start: 600,
                    end: 700
                },
            ]
        );
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        let windows = plan_windows(0, 600, 5);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1].end, 600);
    }

    #[test]
    fn non_positive_step_yields_no_windows() {
        assert!(plan_windows(0, 600, 0).is_empty());
        assert!(plan_windows(0, 600, -5).is_empty());
    }

    #[test]
    fn empty_or_inverted_range_yields_no_windows() {
        assert!(plan_windows(100, 100, 5).is_empty());
        assert!(plan_windows(200, 100, 5).is_empty());
    }

    #[test]
    fn range_near_i64_max_does_not_overflow() {
        let windows = plan_windows(i64::MAX - 700, i64::MAX, 5);
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start, i64::MAX - 700);
        assert_eq!(windows.last().unwrap().end, i64::MAX);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn huge_step_clips_to_single_window() {
        let windows = plan_windows(0, 1_000, i64::MAX);
        assert_eq!(windows, [Window { start: 0, end: 1_000 }]);
    }
}
