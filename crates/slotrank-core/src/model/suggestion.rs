//! Output records.

use serde::{Deserialize, Serialize};

/// One recommended meeting placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub day: String,
    pub start_slot_index: usize,
    pub slot_minutes: u32,
    pub meeting_length_minutes: u32,
    /// Rounded to 4 decimal places.
    pub score: f64,
    /// Fraction of attendee-slot cells that are available, rounded to 4 places.
    pub coverage: f64,
    /// Attendees with a busy cell in the window, in attendee order.
    pub conflicts: Vec<String>,
    pub fully_available_attendees: usize,
    pub start_iso: Option<String>,
    pub end_iso: Option<String>,
    pub timezone: Option<String>,
}

/// Response body: suggestions in rank order, at most `top_k` of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub suggestions: Vec<Suggestion>,
}

impl SuggestionSet {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }
}

/// Round half away from zero to 4 decimal places, normalising `-0.0`.
pub fn round4(value: f64) -> f64 {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
