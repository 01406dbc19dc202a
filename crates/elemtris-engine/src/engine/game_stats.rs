use std::time::Duration;

use serde::Serialize;

/// Score values for line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

const LINES_PER_LEVEL: usize = 10;

const BASE_FALL_INTERVAL_MS: u64 = 500;
const FALL_INTERVAL_STEP_MS: u64 = 40;
const MIN_FALL_INTERVAL_MS: u64 = 100;

/// Points awarded for clearing `cleared_lines` rows with a single lock.
///
/// # Panics
///
/// Panics if `cleared_lines` is greater than 4, which a single piece cannot produce.
#[must_use]
pub const fn line_clear_score(cleared_lines: usize) -> usize {
    SCORE_TABLE[cleared_lines]
}

/// Level reached after `total_cleared_lines` lines: one level per 10 lines, starting at 1.
#[must_use]
pub const fn level_for_lines(total_cleared_lines: usize) -> usize {
    1 + total_cleared_lines / LINES_PER_LEVEL
}

/// Gravity interval for `level`: 500 ms at level 1, 40 ms faster per level, never below 100 ms.
#[must_use]
pub fn fall_interval_for_level(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let millis = BASE_FALL_INTERVAL_MS
        .saturating_sub(steps.saturating_mul(FALL_INTERVAL_STEP_MS))
        .max(MIN_FALL_INTERVAL_MS);
    Duration::from_millis(millis)
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: Points earned from line clears
/// - **Level**: Derived from total lines cleared (1 level per 10 lines, starting at 1)
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of locks by number of lines they cleared
///
/// # Example
///
/// ```
/// use elemtris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// assert_eq!(stats.level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    /// Returns the current score (sum of all line clear points).
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level based on total lines cleared.
    #[must_use]
    pub const fn level(&self) -> usize {
        level_for_lines(self.total_cleared_lines)
    }

    /// Returns the gravity interval for the current level.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        fall_interval_for_level(self.level())
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns the total number of lines cleared across all line clears.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// Index `n` counts the locks that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock and returns the points gained.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines cleared by this lock (0-4)
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        let gained = line_clear_score(cleared_lines);
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines] += 1;
        self.score += gained;
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        let expected = [0, 100, 300, 500, 800];
        for (lines, points) in expected.into_iter().enumerate() {
            let mut stats = GameStats::new();
            assert_eq!(stats.complete_piece_drop(lines), points);
            assert_eq!(stats.score(), points, "{lines} lines");
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_more_than_four_lines_panics() {
        let _ = line_clear_score(std::hint::black_box(5));
    }

    #[test]
    fn test_level_starts_at_one() {
        let stats = GameStats::new();
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.fall_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_level_after_25_lines() {
        let mut stats = GameStats::new();
        for lines in [4, 4, 4, 4, 4, 4, 1] {
            stats.complete_piece_drop(lines);
        }
        assert_eq!(stats.total_cleared_lines(), 25);
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.fall_interval(), Duration::from_millis(420));
    }

    #[test]
    fn test_fall_interval_floor() {
        assert_eq!(fall_interval_for_level(10), Duration::from_millis(140));
        assert_eq!(fall_interval_for_level(11), Duration::from_millis(100));
        assert_eq!(fall_interval_for_level(12), Duration::from_millis(100));
        assert_eq!(fall_interval_for_level(1000), Duration::from_millis(100));
    }

    #[test]
    fn test_counters_accumulate() {
        let mut stats = GameStats::new();
        for lines in [0, 1, 0, 2, 4] {
            stats.complete_piece_drop(lines);
        }
        assert_eq!(stats.completed_pieces(), 5);
        assert_eq!(stats.total_cleared_lines(), 7);
        assert_eq!(stats.line_cleared_counter(), &[2, 1, 1, 0, 1]);
        assert_eq!(stats.score(), 100 + 300 + 800);
    }
}
