//! Five-day weekly attendance schedules.
//!
//! A [`WeeklySchedule`] records, for one kindergarten, which weekdays the
//! child attends. Weekends are never scheduled.
//!
//! # Text forms
//!
//! - Positional pattern: `"MT--F"`, one character per weekday, `-` or `.`
//!   for a free day
//! - Day list: `"mon,tue,fri"` (full names accepted, case-insensitive)
//! - Keywords: `"none"` and `"all"`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Number of schedulable days in a week.
pub const DAYS_PER_WEEK: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in week order.
    pub const ALL: [Weekday; DAYS_PER_WEEK] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        }
    }

    pub fn abbrev(self) -> &'static str {
        &self.name()[..3]
    }

    /// Single-letter column header used by the positional pattern.
    pub fn letter(self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday | Weekday::Thursday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Friday => 'F',
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|d| lower == d.name() || lower == d.abbrev())
            .ok_or_else(|| ParseError::UnknownWeekday(s.trim().to_string()))
    }
}

/// Attendance flags for one kindergarten, Monday through Friday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
}

impl WeeklySchedule {
    /// No days assigned.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every weekday assigned.
    pub fn full() -> Self {
        Self::from_days(&Weekday::ALL)
    }

    pub fn from_days(days: &[Weekday]) -> Self {
        let mut schedule = Self::empty();
        for &day in days {
            schedule.set(day, true);
        }
        schedule
    }

    pub fn get(&self, day: Weekday) -> bool {
        match day {
            Weekday::Monday => self.monday,
            Weekday::Tuesday => self.tuesday,
            Weekday::Wednesday => self.wednesday,
            Weekday::Thursday => self.thursday,
            Weekday::Friday => self.friday,
        }
    }

    pub fn set(&mut self, day: Weekday, attends: bool) {
        let slot = match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
        };
        *slot = attends;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, day: Weekday, attends: bool) -> Self {
        self.set(day, attends);
        self
    }

    /// Assigned weekdays in week order.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|&d| self.get(d))
    }

    pub fn active_days(&self) -> usize {
        self.days().count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_days() == 0
    }
}

/// Positional pattern, e.g. `MT--F`.
impl fmt::Display for WeeklySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in Weekday::ALL {
            let c = if self.get(day) { day.letter() } else { '-' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for WeeklySchedule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => return Ok(Self::empty()),
            "all" => return Ok(Self::full()),
            _ => {}
        }

        if !s.contains(',') && s.chars().count() == DAYS_PER_WEEK {
            if let Some(schedule) = parse_pattern(s) {
                return Ok(schedule);
            }
            if s.parse::<Weekday>().is_err() {
                return Err(ParseError::InvalidPattern(s.to_string()));
            }
        }

        let mut schedule = Self::empty();
        for part in s.split(',').filter(|p| !p.trim().is_empty()) {
            schedule.set(part.parse()?, true);
        }
        Ok(schedule)
    }
}

fn parse_pattern(s: &str) -> Option<WeeklySchedule> {
    let mut schedule = WeeklySchedule::empty();
    for (day, c) in Weekday::ALL.into_iter().zip(s.chars()) {
        match c {
            '-' | '.' => {}
            c if c.to_ascii_uppercase() == day.letter() => schedule.set(day, true),
            _ => return None,
        }
    }
    Some(schedule)
}
