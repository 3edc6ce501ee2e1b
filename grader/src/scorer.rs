//! Score, pass/fail, and lateness arithmetic shared by the grading engines
//! and the statistics endpoints.

use chrono::{DateTime, Utc};

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `max` represented by `earned`, rounded to two decimal
/// places. Returns 0.0 when `max` is not positive.
pub fn percentage(earned: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    round2(earned / max * 100.0)
}

/// Whether a score meets the assignment's passing threshold.
pub fn passed(score_percentage: f64, passing_score_percent: f64) -> bool {
    score_percentage >= passing_score_percent
}

/// Whether a finalization at `now` counts as late. Assignments without a due
/// date are never late.
pub fn is_late(now: DateTime<Utc>, due_date: Option<DateTime<Utc>>) -> bool {
    matches!(due_date, Some(due) if now > due)
}
