//! Mapping of slot indices to wall-clock placements and ISO timestamps.
//!
//! Placement is naive local clock arithmetic: the day's date (or a fixed
//! reference date for opaque labels) plus `day_start` plus
//! `start * slot_minutes`. The time zone only affects how timestamps are
//! rendered; an unknown zone degrades to naive timestamps with no zone.

use chrono::{Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::model::{DayLabel, ScheduleSettings};

/// Outcome of looking up the configured time-zone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneResolution {
    Resolved(Tz),
    Unresolved,
}

impl ZoneResolution {
    pub fn lookup(identifier: &str) -> Self {
        match identifier.parse::<Tz>() {
            Ok(tz) => ZoneResolution::Resolved(tz),
            Err(_) => ZoneResolution::Unresolved,
        }
    }
}

/// Local clock position of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlacement {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Whether `start` is anchored on a real calendar date.
    pub dated: bool,
}

impl WindowPlacement {
    /// Minutes from midnight of the start's date to the start.
    pub fn start_minute_of_day(&self) -> i64 {
        i64::from(self.start.time().num_seconds_from_midnight() / 60)
    }

    /// End measured from the same midnight as [`start_minute_of_day`](Self::start_minute_of_day);
    /// may exceed a day when the window runs past midnight.
    pub fn end_minute_of_day(&self) -> i64 {
        self.start_minute_of_day() + (self.end - self.start).num_minutes()
    }
}

/// ISO timestamps for a suggestion; all `None` for undated days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTimes {
    pub start_iso: Option<String>,
    pub end_iso: Option<String>,
    pub timezone: Option<String>,
}

/// Anchor date for labels that are not calendar dates.
fn reference_date() -> NaiveDate {
    NaiveDate::default()
}

#[derive(Debug, Clone)]
pub struct TimeResolver {
    day_start_minutes: i64,
    slot_minutes: i64,
    zone: ZoneResolution,
    zone_name: String,
}

impl TimeResolver {
    pub fn new(schedule: &ScheduleSettings, slot_minutes: u32) -> Self {
        let zone = ZoneResolution::lookup(&schedule.timezone);
        if zone == ZoneResolution::Unresolved {
            tracing::warn!(
                timezone = %schedule.timezone,
                "unknown time zone, falling back to naive timestamps"
            );
        }
        Self {
            day_start_minutes: i64::from(schedule.day_start.minutes()),
            slot_minutes: i64::from(slot_minutes),
            zone,
            zone_name: schedule.timezone.clone(),
        }
    }

    pub fn zone(&self) -> ZoneResolution {
        self.zone
    }

    /// Local placement of `length` slots starting at `start` on `day`.
    ///
    /// Returns `None` only if the arithmetic leaves chrono's date range.
    pub fn placement(&self, day: &DayLabel, start: usize, length: usize) -> Option<WindowPlacement> {
        let date = day.date().unwrap_or_else(reference_date);
        let offset = i64::try_from(start).ok()?.checked_mul(self.slot_minutes)?;
        let span = i64::try_from(length).ok()?.checked_mul(self.slot_minutes)?;
        let start_at = date
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(Duration::try_minutes(self.day_start_minutes.checked_add(offset)?)?)?;
        let end_at = start_at.checked_add_signed(Duration::try_minutes(span)?)?;
        Some(WindowPlacement {
            start: start_at,
            end: end_at,
            dated: day.is_dated(),
        })
    }

    /// ISO-8601 timestamps for a placement. Undated placements resolve to
    /// nothing; a local time that does not exist in the zone (DST gap) is
    /// rendered naive without a zone.
    pub fn resolve(&self, placement: &WindowPlacement) -> ResolvedTimes {
        if !placement.dated {
            return ResolvedTimes::default();
        }
        if let ZoneResolution::Resolved(tz) = self.zone {
            if let (Some(start), Some(end)) = (
                tz.from_local_datetime(&placement.start).earliest(),
                tz.from_local_datetime(&placement.end).earliest(),
            ) {
                return ResolvedTimes {
                    start_iso: Some(start.to_rfc3339_opts(SecondsFormat::Secs, false)),
                    end_iso: Some(end.to_rfc3339_opts(SecondsFormat::Secs, false)),
                    timezone: Some(self.zone_name.clone()),
                };
            }
        }
        ResolvedTimes {
            start_iso: Some(naive_iso(&placement.start)),
            end_iso: Some(naive_iso(&placement.end)),
            timezone: None,
        }
    }
}

fn naive_iso(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}
