//! Custody percentage: the share of the school week spent at one kindergarten.

use crate::resolver::SchedulePair;
use crate::schedule::{DAYS_PER_WEEK, WeeklySchedule};

/// Percentage of the week the schedule assigns to its kindergarten.
///
/// `round(active_days / 5 * 100)`, so always a multiple of 20 in `0..=100`.
pub fn compute_custody_percentage(schedule: &WeeklySchedule) -> u8 {
    percentage_of(schedule.active_days(), DAYS_PER_WEEK)
}

/// Custody percentages for `(primary, secondary)`.
pub fn custody_split(pair: &SchedulePair) -> (u8, u8) {
    (
        compute_custody_percentage(&pair.primary),
        compute_custody_percentage(&pair.secondary),
    )
}

/// Whole-number percentage of `part` in `total`, rounding half away from zero.
///
/// `part` is clamped to `total`; a zero `total` yields 0.
pub(crate) fn percentage_of(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total);
    (part as f64 / total as f64 * 100.0).round() as u8
}
