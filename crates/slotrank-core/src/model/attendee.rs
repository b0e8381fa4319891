//! Attendees, day labels and candidate windows.

use chrono::NaiveDate;

use super::slot::SlotState;

/// A validated attendee. Immutable once the request has been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    pub name: String,
    /// Non-negative weight.
    pub priority: f64,
    /// One row per day; all attendees agree on each row's length.
    pub availability: Vec<Vec<SlotState>>,
}

impl Attendee {
    pub fn new(name: impl Into<String>, priority: f64, availability: Vec<Vec<SlotState>>) -> Self {
        Self {
            name: name.into(),
            priority,
            availability,
        }
    }

    /// Slot states for one day.
    pub fn row(&self, day_index: usize) -> &[SlotState] {
        self.availability
            .get(day_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Slot states covered by a window.
    pub fn window_cells(&self, window: &Window) -> &[SlotState] {
        let row = self.row(window.day_index);
        let end = (window.start + window.length).min(row.len());
        row.get(window.start..end).unwrap_or(&[])
    }
}

/// A day label. Labels in `YYYY-MM-DD` form carry a calendar date; anything
/// else ("day-1", "Monday") is opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLabel {
    label: String,
    date: Option<NaiveDate>,
}

impl DayLabel {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let date = NaiveDate::parse_from_str(label.trim(), "%Y-%m-%d").ok();
        Self { label, date }
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn is_dated(&self) -> bool {
        self.date.is_some()
    }
}

/// Candidate meeting placement: `length` slots starting at `start` on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub day_index: usize,
    pub start: usize,
    pub length: usize,
}

impl Window {
    pub fn new(day_index: usize, start: usize, length: usize) -> Self {
        Self {
            day_index,
            start,
            length,
        }
    }

    /// Window length in slots for a meeting: `ceil(meeting / slot)`, at least 1.
    pub fn length_for(meeting_length_minutes: u32, slot_minutes: u32) -> usize {
        if slot_minutes == 0 {
            return 1;
        }
        (meeting_length_minutes.div_ceil(slot_minutes) as usize).max(1)
    }

    /// Start indices `0..=slots - length`; empty when the day is too short.
    pub fn starts(slot_count: usize, length: usize) -> std::ops::Range<usize> {
        if length == 0 || slot_count < length {
            return 0..0;
        }
        0..slot_count - length + 1
    }
}
