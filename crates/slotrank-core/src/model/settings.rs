//! Scoring weights, schedule anchoring and global blocker rules.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::slot::AvailScores;
use crate::error::ValidationError;

/// Minutes in a day; also the largest representable [`ClockTime`] ("24:00").
pub const MINUTES_PER_DAY: u32 = 24 * 60;

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_UNPREFERRED_PENALTY: f64 = 0.0;
pub const DEFAULT_HARD_BLOCK: bool = true;
pub const DEFAULT_DISTINCT_TOP_PRIORITY_ONLY: bool = true;

/// A wall-clock time of day, stored as minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime(u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Parse `HH:MM` in `00:00..=23:59`.
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        let time = Self::parse_bound(field, value)?;
        if time == Self::END_OF_DAY {
            return Err(ValidationError::InvalidClockTime {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        Ok(time)
    }

    /// Parse `HH:MM` in `00:00..=24:00`; "24:00" is only meaningful as an
    /// exclusive end.
    pub fn parse_bound(field: &str, value: &str) -> Result<Self, ValidationError> {
        let bad = || ValidationError::InvalidClockTime {
            field: field.to_string(),
            value: value.to_string(),
        };
        let (h, m) = value.trim().split_once(':').ok_or_else(bad)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(bad());
        }
        let hours: u32 = h.parse().map_err(|_| bad())?;
        let minutes: u32 = m.parse().map_err(|_| bad())?;
        if minutes >= 60 {
            return Err(bad());
        }
        let total = hours * 60 + minutes;
        if total > MINUTES_PER_DAY {
            return Err(bad());
        }
        Ok(ClockTime(total))
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(ClockTime(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A half-open clock interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockRange {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl ClockRange {
    pub fn new(field: &str, start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = ClockTime::parse(&format!("{field}.start"), start)?;
        let end = ClockTime::parse_bound(&format!("{field}.end"), end)?;
        if start >= end {
            return Err(ValidationError::invalid(
                field,
                format!("start ({start}) must be before end ({end})"),
            ));
        }
        Ok(Self { start, end })
    }

    /// True when `[start_min, end_min)` lies entirely inside this range.
    pub fn contains_span(&self, start_min: i64, end_min: i64) -> bool {
        start_min >= i64::from(self.start.minutes()) && end_min <= i64::from(self.end.minutes())
    }

    /// True when `[start_min, end_min)` shares any minute with this range.
    pub fn overlaps_span(&self, start_min: i64, end_min: i64) -> bool {
        !(end_min <= i64::from(self.start.minutes()) || start_min >= i64::from(self.end.minutes()))
    }
}

/// Calendar and clock admissibility rules independent of attendee availability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalBlockers {
    /// Window must lie fully inside this range.
    pub hours: Option<ClockRange>,
    /// Window must not overlap this range at all.
    pub lunch: Option<ClockRange>,
    /// Weekdays on which dated windows are rejected.
    pub weekdays_disallowed: Vec<Weekday>,
    /// Minimum number of fully available attendees.
    pub min_attendees: Option<usize>,
}

impl GlobalBlockers {
    pub fn has_clock_rules(&self) -> bool {
        self.hours.is_some() || self.lunch.is_some() || !self.weekdays_disallowed.is_empty()
    }
}

/// Where slot 0 of every day sits on the clock, and in which zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSettings {
    pub day_start: ClockTime,
    pub timezone: String,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            day_start: ClockTime::MIDNIGHT,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

/// Scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default)]
    pub avail_scores: AvailScores,
    #[serde(default = "default_penalty")]
    pub unpreferred_penalty_per_person: f64,
    #[serde(default = "default_hard_block")]
    pub hard_block_for_high_priority: bool,
    #[serde(default = "default_distinct_top")]
    pub distinct_top_priority_only: bool,
}

fn default_penalty() -> f64 {
    DEFAULT_UNPREFERRED_PENALTY
}
fn default_hard_block() -> bool {
    DEFAULT_HARD_BLOCK
}
fn default_distinct_top() -> bool {
    DEFAULT_DISTINCT_TOP_PRIORITY_ONLY
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            avail_scores: AvailScores::default(),
            unpreferred_penalty_per_person: DEFAULT_UNPREFERRED_PENALTY,
            hard_block_for_high_priority: DEFAULT_HARD_BLOCK,
            distinct_top_priority_only: DEFAULT_DISTINCT_TOP_PRIORITY_ONLY,
        }
    }
}

/// Map `0 = Monday .. 6 = Sunday` to a weekday.
pub fn weekday_from_index(index: i64) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}
