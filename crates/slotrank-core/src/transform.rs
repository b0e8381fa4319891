//! Conversion of per-user busy/tentative time ranges into the fixed slot grid.
//!
//! The front end describes each user as a list of weekday-tagged minute
//! ranges marked busy or tentative; every minute not listed is available.
//! [`AvailabilityTransformer`] validates that payload and expands it into a
//! canonical [`MeetingRequest`] with one availability row per weekday.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::TransformError;
use crate::model::{ClockTime, SlotState, MINUTES_PER_DAY};
use crate::request::{
    AttendeeInput, ConstraintsInput, MeetingRequest, ScheduleInput, WeightsInput,
    DEFAULT_PRIORITY, DEFAULT_TOP_K,
};

pub const DEFAULT_GRID_SLOT_MINUTES: u32 = 15;
pub const DEFAULT_MEETING_LENGTH_MINUTES: i64 = 60;
/// Front-end payloads penalise tentative cells unless told otherwise.
pub const DEFAULT_FRONTEND_PENALTY: f64 = 0.1;
/// Front-end payloads do not hard-block unless told otherwise.
pub const DEFAULT_FRONTEND_HARD_BLOCK: bool = false;

/// Weekday labels used for grid rows.
pub const WEEKDAY_LABELS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Marking carried by a listed time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityKind {
    Busy,
    Tentative,
}

impl From<AvailabilityKind> for SlotState {
    fn from(kind: AvailabilityKind) -> Self {
        match kind {
            AvailabilityKind::Busy => SlotState::Busy,
            AvailabilityKind::Tentative => SlotState::Tentative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Row index into the weekday labels (0 = first label).
    pub day: usize,
    #[serde(alias = "startMinute")]
    pub start_minute: u32,
    #[serde(alias = "endMinute")]
    pub end_minute: u32,
    #[serde(alias = "availabilityType")]
    pub availability_type: AvailabilityKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityUser {
    pub name: String,
    #[serde(default, alias = "timeSlots")]
    pub time_slots: Vec<TimeRange>,
    #[serde(default = "default_priority")]
    pub priority: f64,
}

fn default_priority() -> f64 {
    DEFAULT_PRIORITY
}
fn default_meeting_length() -> i64 {
    DEFAULT_MEETING_LENGTH_MINUTES
}
fn default_top_k() -> i64 {
    DEFAULT_TOP_K as i64
}

/// Payload posted by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityPayload {
    pub availability: Vec<AvailabilityUser>,
    #[serde(default = "default_meeting_length", alias = "meetingLengthMinutes")]
    pub meeting_length_minutes: i64,
    #[serde(default = "default_top_k", alias = "topK")]
    pub top_k: i64,
    #[serde(default)]
    pub weights: Option<WeightsInput>,
    #[serde(default)]
    pub schedule: Option<ScheduleInput>,
    #[serde(default)]
    pub constraints: Option<ConstraintsInput>,
    #[serde(default, alias = "activeAttendees")]
    pub active_attendees: Option<Vec<String>>,
}

/// Shape of the slot grid produced by the transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSettings {
    pub slot_minutes: u32,
    pub day_start_minute: u32,
    pub day_end_minute: u32,
    pub day_labels: Vec<String>,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            slot_minutes: DEFAULT_GRID_SLOT_MINUTES,
            day_start_minute: 0,
            day_end_minute: MINUTES_PER_DAY,
            day_labels: WEEKDAY_LABELS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl TransformSettings {
    pub fn slots_per_day(&self) -> usize {
        ((self.day_end_minute - self.day_start_minute) / self.slot_minutes) as usize
    }

    fn check(&self) -> Result<(), TransformError> {
        let bad = |message: &str| TransformError::InvalidValue {
            field: "transform".into(),
            message: message.into(),
        };
        if self.slot_minutes == 0 {
            return Err(bad("slot_minutes must be > 0"));
        }
        if self.day_start_minute >= self.day_end_minute || self.day_end_minute > MINUTES_PER_DAY {
            return Err(bad("day bounds must satisfy start < end <= 1440"));
        }
        if (self.day_end_minute - self.day_start_minute) % self.slot_minutes != 0 {
            return Err(bad("day length must be a multiple of slot_minutes"));
        }
        if self.day_labels.is_empty() {
            return Err(bad("at least one day label is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityTransformer {
    settings: TransformSettings,
}

impl AvailabilityTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: TransformSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TransformSettings {
        &self.settings
    }

    /// Validate a front-end payload and expand it into a canonical request.
    pub fn transform(&self, payload: AvailabilityPayload) -> Result<MeetingRequest, TransformError> {
        self.settings.check()?;
        self.validate(&payload)?;
        let schedule = self.grid_schedule(payload.schedule.clone())?;

        let attendees = payload
            .availability
            .iter()
            .map(|user| AttendeeInput {
                name: Some(user.name.trim().to_string()),
                priority: Some(user.priority),
                availability_matrix: Some(self.user_matrix(user)),
            })
            .collect();

        let weights = payload.weights.unwrap_or_default();
        let weights = WeightsInput {
            unpreferred_penalty_per_person: weights
                .unpreferred_penalty_per_person
                .or(Some(DEFAULT_FRONTEND_PENALTY)),
            hard_block_for_high_priority: weights
                .hard_block_for_high_priority
                .or(Some(DEFAULT_FRONTEND_HARD_BLOCK)),
            ..weights
        };

        tracing::debug!(
            users = payload.availability.len(),
            days = self.settings.day_labels.len(),
            slots_per_day = self.settings.slots_per_day(),
            "transformed availability payload"
        );

        Ok(MeetingRequest {
            slot_minutes: Some(i64::from(self.settings.slot_minutes)),
            meeting_length_minutes: Some(payload.meeting_length_minutes),
            days: Some(self.settings.day_labels.clone()),
            attendees: Some(attendees),
            active_attendees: payload.active_attendees,
            schedule: Some(schedule),
            constraints: payload.constraints,
            weights: Some(weights),
            top_k: Some(payload.top_k),
        })
    }

    /// Anchor slot 0 at the grid's first minute. A payload `day_start` must
    /// agree with the grid.
    fn grid_schedule(&self, schedule: Option<ScheduleInput>) -> Result<ScheduleInput, TransformError> {
        let field = "schedule.day_start";
        let grid_start = ClockTime::from_minutes(self.settings.day_start_minute)
            .ok_or_else(|| TransformError::InvalidValue {
                field: "transform.day_start_minute".into(),
                message: "must be within the day".into(),
            })?;
        let schedule = schedule.unwrap_or_default();

        if let Some(given) = &schedule.day_start {
            let parsed = ClockTime::parse(field, given).map_err(|e| TransformError::InvalidValue {
                field: field.into(),
                message: e.to_string(),
            })?;
            if parsed != grid_start {
                return Err(TransformError::InvalidValue {
                    field: field.into(),
                    message: format!("{parsed} does not match the grid start {grid_start}"),
                });
            }
        }

        Ok(ScheduleInput {
            day_start: Some(grid_start.to_string()),
            ..schedule
        })
    }

    fn validate(&self, payload: &AvailabilityPayload) -> Result<(), TransformError> {
        let s = &self.settings;
        if payload.availability.is_empty() {
            return Err(TransformError::NoUsers);
        }

        let day_length = i64::from(s.day_end_minute - s.day_start_minute);
        if payload.meeting_length_minutes <= 0 || payload.meeting_length_minutes > day_length {
            return Err(TransformError::InvalidValue {
                field: "meeting_length_minutes".into(),
                message: format!("must be in 1..={day_length}"),
            });
        }
        if payload.top_k <= 0 {
            return Err(TransformError::InvalidValue {
                field: "top_k".into(),
                message: "must be > 0".into(),
            });
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (i, user) in payload.availability.iter().enumerate() {
            let name = user.name.trim();
            if name.is_empty() {
                return Err(TransformError::BlankName { index: i });
            }
            if !user.priority.is_finite() || user.priority < 0.0 {
                return Err(TransformError::InvalidValue {
                    field: format!("availability[{i}].priority"),
                    message: "must be a non-negative number".into(),
                });
            }
            *seen.entry(name.to_lowercase()).or_default() += 1;

            for (j, range) in user.time_slots.iter().enumerate() {
                self.validate_range(&format!("availability[{i}].time_slots[{j}]"), range)?;
            }
        }

        let mut duplicates: Vec<String> = seen
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();
        if !duplicates.is_empty() {
            duplicates.sort();
            return Err(TransformError::DuplicateNames(duplicates));
        }
        Ok(())
    }

    fn validate_range(&self, field: &str, range: &TimeRange) -> Result<(), TransformError> {
        let s = &self.settings;
        if range.day >= s.day_labels.len() {
            return Err(TransformError::DayOutOfRange {
                field: field.into(),
                day: range.day,
                max: s.day_labels.len() - 1,
            });
        }
        for minute in [range.start_minute, range.end_minute] {
            if minute < s.day_start_minute || minute > s.day_end_minute {
                return Err(TransformError::MinuteOutOfRange {
                    field: field.into(),
                    minute,
                    min: s.day_start_minute,
                    max: s.day_end_minute,
                });
            }
        }
        if range.start_minute >= range.end_minute {
            return Err(TransformError::EmptyRange { field: field.into() });
        }
        let aligned = |m: u32| (m - s.day_start_minute) % s.slot_minutes == 0;
        if !aligned(range.start_minute) || !aligned(range.end_minute) {
            return Err(TransformError::Misaligned {
                field: field.into(),
                slot_minutes: s.slot_minutes,
            });
        }
        Ok(())
    }

    fn row_of(&self, minute: u32) -> usize {
        ((minute - self.settings.day_start_minute) / self.settings.slot_minutes) as usize
    }

    /// Every cell starts available; listed ranges overwrite in order.
    fn user_matrix(&self, user: &AvailabilityUser) -> Vec<Vec<SlotState>> {
        let mut matrix =
            vec![vec![SlotState::Available; self.settings.slots_per_day()]; self.settings.day_labels.len()];
        for range in &user.time_slots {
            let state = SlotState::from(range.availability_type);
            for cell in &mut matrix[range.day][self.row_of(range.start_minute)..self.row_of(range.end_minute)] {
                *cell = state;
            }
        }
        matrix
    }
}
