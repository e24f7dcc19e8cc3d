//! Scoring module - line-clear points, level and gravity derivation

use crate::types::{
    ALL_CLEAR_BONUS, BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL,
    LINE_SCORES,
};

/// Points for clearing `lines` rows at `level` (counts above 4 score as 4)
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(4)].saturating_mul(level)
}

/// Bonus for emptying the board
pub fn all_clear_bonus(level: u32) -> u32 {
    ALL_CLEAR_BONUS.saturating_mul(level)
}

/// Level for a total line count (starts at 1)
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, floored at [`DROP_INTERVAL_MIN_MS`]
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Result of completing a row clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearAward {
    pub lines: u32,
    pub line_score: u32,
    pub all_clear_bonus: u32,
}

impl ClearAward {
    /// Score a clear of `lines` rows at `level`; `all_clear` adds the bonus.
    pub fn new(lines: usize, level: u32, all_clear: bool) -> Self {
        Self {
            lines: lines as u32,
            line_score: line_clear_score(lines, level),
            all_clear_bonus: if all_clear { all_clear_bonus(level) } else { 0 },
        }
    }

    pub fn total(&self) -> u32 {
        self.line_score.saturating_add(self.all_clear_bonus)
    }
}
