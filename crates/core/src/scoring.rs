//! Scoring module - the line-clear reward schedule
//!
//! Score only moves on line clears. Each lock is scored once, keyed by how
//! many rows that single lock cleared.

use crate::types::LINE_SCORES;

/// Points awarded for clearing `lines` rows in one lock.
///
/// Four rows is the most a single tetromino can complete. Larger counts can
/// only come from seeded grids and extend the schedule linearly from the
/// four-row value, so the schedule stays strictly increasing.
pub fn line_clear_points(lines: usize) -> u32 {
    match lines {
        0..=4 => LINE_SCORES[lines],
        _ => (LINE_SCORES[4] as usize * lines / 4) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 40);
        assert_eq!(line_clear_points(2), 100);
        assert_eq!(line_clear_points(3), 300);
        assert_eq!(line_clear_points(4), 1200);
    }

    #[test]
    fn test_schedule_is_strictly_increasing() {
        for k in 0..12 {
            assert!(line_clear_points(k) < line_clear_points(k + 1), "k = {k}");
        }
    }

    #[test]
    fn test_multi_line_clears_are_superlinear() {
        for k in 2..=4 {
            assert!(line_clear_points(k) > k as u32 * line_clear_points(1));
        }
    }
}
