//! Conflict resolution between the primary and secondary schedules.
//!
//! Every single-day edit goes through [`resolve_conflict`], which keeps the
//! pair mutually exclusive: a child is never scheduled at both kindergartens
//! on the same day. Clearing a day does not assign it to the other side.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schedule::{Weekday, WeeklySchedule};

/// Which schedule of a [`SchedulePair`] an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Primary,
    Secondary,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Primary => Side::Secondary,
            Side::Secondary => Side::Primary,
        }
    }
}

/// The two schedules edited together during one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePair {
    pub primary: WeeklySchedule,
    pub secondary: WeeklySchedule,
}

impl SchedulePair {
    pub fn new(primary: WeeklySchedule, secondary: WeeklySchedule) -> Self {
        Self { primary, secondary }
    }

    pub fn side(&self, side: Side) -> &WeeklySchedule {
        match side {
            Side::Primary => &self.primary,
            Side::Secondary => &self.secondary,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut WeeklySchedule {
        match side {
            Side::Primary => &mut self.primary,
            Side::Secondary => &mut self.secondary,
        }
    }

    /// Apply one edit in place. See [`resolve_conflict`].
    pub fn apply(&mut self, side: Side, day: Weekday, value: bool) {
        *self = resolve_conflict(self, side, day, value);
    }

    /// Flip `day` on `side`, clearing the other side if it becomes assigned.
    pub fn toggle(&mut self, side: Side, day: Weekday) {
        let current = self.side(side).get(day);
        self.apply(side, day, !current);
    }

    /// Assign `day` to `side`.
    pub fn assign(&mut self, day: Weekday, side: Side) {
        self.apply(side, day, true);
    }

    /// Which side a day is assigned to, if any.
    ///
    /// For a pair with a conflicting day the primary side wins.
    pub fn owner(&self, day: Weekday) -> Option<Side> {
        if self.primary.get(day) {
            Some(Side::Primary)
        } else if self.secondary.get(day) {
            Some(Side::Secondary)
        } else {
            None
        }
    }

    /// Days assigned to both sides. Empty for any pair built through the resolver.
    pub fn conflicting_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|&d| self.primary.get(d) && self.secondary.get(d))
            .collect()
    }

    /// Days assigned to neither side.
    pub fn unassigned_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|&d| !self.primary.get(d) && !self.secondary.get(d))
            .collect()
    }

    /// Drop conflicting days from the secondary side.
    ///
    /// Used to bring an externally supplied pair under the resolver invariant.
    pub fn normalized(&self) -> SchedulePair {
        let mut pair = SchedulePair::new(self.primary, WeeklySchedule::empty());
        for day in self.secondary.days() {
            if !pair.primary.get(day) {
                pair.secondary.set(day, true);
            }
        }
        pair
    }
}

/// Set `day` on `side` to `value`, keeping the pair mutually exclusive.
///
/// - `value == true`: the other side's `day` is forced to `false`
/// - `value == false`: the other side is left unchanged
pub fn resolve_conflict(
    pair: &SchedulePair,
    side: Side,
    day: Weekday,
    value: bool,
) -> SchedulePair {
    let mut next = *pair;
    next.side_mut(side).set(day, value);
    if value && next.side(side.other()).get(day) {
        next.side_mut(side.other()).set(day, false);
        debug!(?side, %day, "cleared day on opposite schedule");
    }
    next
}
