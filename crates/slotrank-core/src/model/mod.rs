//! Data model for meeting slot recommendation.
//!
//! This module provides:
//! - Slot states and per-state preference scores
//! - Attendees, day labels and candidate windows
//! - Scoring weights, schedule anchoring and global blocker rules
//! - Output suggestion records

mod attendee;
mod settings;
mod slot;
mod suggestion;

pub use attendee::{Attendee, DayLabel, Window};
pub use settings::{
    weekday_from_index, ClockRange, ClockTime, GlobalBlockers, ScheduleSettings, Weights,
    DEFAULT_DISTINCT_TOP_PRIORITY_ONLY, DEFAULT_HARD_BLOCK, DEFAULT_TIMEZONE,
    DEFAULT_UNPREFERRED_PENALTY, MINUTES_PER_DAY,
};
pub use slot::{AvailScores, SlotState, DEFAULT_AVAIL_SCORES};
pub use suggestion::{round4, Suggestion, SuggestionSet};
