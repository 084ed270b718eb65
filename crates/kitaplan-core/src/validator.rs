//! Split validation gating wizard progression and request submission.

use serde::Serialize;
use tracing::debug;

use crate::custody::compute_custody_percentage;
use crate::resolver::SchedulePair;
use crate::schedule::{Weekday, WeeklySchedule};

/// `true` iff the two schedules together cover exactly 100% of the week.
///
/// For a pair kept mutually exclusive by the resolver this means every
/// weekday is assigned to exactly one kindergarten.
pub fn is_valid_split(primary: &WeeklySchedule, secondary: &WeeklySchedule) -> bool {
    combined_percentage(primary, secondary) == 100
}

fn combined_percentage(primary: &WeeklySchedule, secondary: &WeeklySchedule) -> u16 {
    u16::from(compute_custody_percentage(primary)) + u16::from(compute_custody_percentage(secondary))
}

/// Current state of a pair as shown to the user while editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitReport {
    pub primary_percentage: u8,
    pub secondary_percentage: u8,
    pub combined: u16,
    pub unassigned_days: Vec<Weekday>,
    pub conflicting_days: Vec<Weekday>,
}

impl SplitReport {
    pub fn is_valid(&self) -> bool {
        self.combined == 100
    }
}

pub fn split_report(pair: &SchedulePair) -> SplitReport {
    let report = SplitReport {
        primary_percentage: compute_custody_percentage(&pair.primary),
        secondary_percentage: compute_custody_percentage(&pair.secondary),
        combined: combined_percentage(&pair.primary, &pair.secondary),
        unassigned_days: pair.unassigned_days(),
        conflicting_days: pair.conflicting_days(),
    };
    debug!(combined = report.combined, valid = report.is_valid(), "split evaluated");
    report
}
