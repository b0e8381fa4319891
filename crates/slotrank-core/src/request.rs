//! Canonical request shape and its validation.
//!
//! [`MeetingRequest`] mirrors the JSON payload accepted at the boundary; all
//! fields are optional so that a missing field can be reported by name.
//! [`ValidatedRequest::from_request`] turns it into the strongly typed record
//! the engine consumes, or fails with a [`ValidationError`] naming the field.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::ValidationError;
use crate::model::{
    weekday_from_index, Attendee, AvailScores, ClockRange, ClockTime, DayLabel, GlobalBlockers,
    ScheduleSettings, SlotState, Weights, Window,
};

/// Default number of suggestions returned.
pub const DEFAULT_TOP_K: usize = 5;

/// Default attendee priority.
pub const DEFAULT_PRIORITY: f64 = 1.0;

/// Meeting recommendation request as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeetingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_length_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<AttendeeInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_attendees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ConstraintsInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightsInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttendeeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_matrix: Option<Vec<Vec<SlotState>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleInput {
    #[serde(default, alias = "dayStart", skip_serializing_if = "Option::is_none")]
    pub day_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintsInput {
    #[serde(default, alias = "globalBlockers", skip_serializing_if = "Option::is_none")]
    pub global_blockers: Option<GlobalBlockersInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalBlockersInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<ClockRangeInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<ClockRangeInput>,
    #[serde(default, alias = "weekdaysDisallowed", skip_serializing_if = "Option::is_none")]
    pub weekdays_disallowed: Option<Vec<i64>>,
    #[serde(default, alias = "minAttendees", skip_serializing_if = "Option::is_none")]
    pub min_attendees: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClockRangeInput {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightsInput {
    /// Keys are stringified slot codes ("0", "1", "2").
    #[serde(default, alias = "availScores", skip_serializing_if = "Option::is_none")]
    pub avail_scores: Option<BTreeMap<String, f64>>,
    #[serde(default, alias = "unpreferredPenaltyPerPerson", skip_serializing_if = "Option::is_none")]
    pub unpreferred_penalty_per_person: Option<f64>,
    #[serde(default, alias = "hardBlockForHighPriority", skip_serializing_if = "Option::is_none")]
    pub hard_block_for_high_priority: Option<bool>,
    #[serde(default, alias = "distinctTopPriorityOnly", skip_serializing_if = "Option::is_none")]
    pub distinct_top_priority_only: Option<bool>,
}

/// Values applied when a request leaves a field out.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineDefaults {
    pub top_k: usize,
    pub schedule: ScheduleSettings,
    pub weights: Weights,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            schedule: ScheduleSettings::default(),
            weights: Weights::default(),
        }
    }
}

/// A request that passed validation. Attendees are already narrowed to
/// `active_attendees` when that restriction was supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub slot_minutes: u32,
    pub meeting_length_minutes: u32,
    /// Window length `L` in slots.
    pub window_length: usize,
    pub days: Vec<DayLabel>,
    pub attendees: Vec<Attendee>,
    pub schedule: ScheduleSettings,
    pub blockers: GlobalBlockers,
    pub weights: Weights,
    pub top_k: usize,
}

impl ValidatedRequest {
    /// Validate a raw request, filling absent optional fields from `defaults`.
    pub fn from_request(
        request: MeetingRequest,
        defaults: &EngineDefaults,
    ) -> Result<Self, ValidationError> {
        let slot_minutes = positive_minutes("slot_minutes", request.slot_minutes)?;
        let meeting_length_minutes =
            positive_minutes("meeting_length_minutes", request.meeting_length_minutes)?;

        let raw_attendees = request
            .attendees
            .ok_or_else(|| ValidationError::MissingField("attendees".into()))?;
        if raw_attendees.is_empty() {
            return Err(ValidationError::EmptyCollection("attendees".into()));
        }

        let mut attendees = raw_attendees
            .into_iter()
            .enumerate()
            .map(|(i, input)| validate_attendee(i, input))
            .collect::<Result<Vec<_>, _>>()?;
        check_unique_names(&attendees)?;

        let days = match request.days {
            Some(days) => {
                if days.is_empty() {
                    return Err(ValidationError::EmptyCollection("days".into()));
                }
                days
            }
            None => synthesize_day_labels(attendees[0].availability.len())?,
        };
        check_matrix_shape(&attendees, days.len())?;

        if let Some(active) = request.active_attendees {
            let wanted: HashSet<String> = active.iter().map(|n| n.trim().to_lowercase()).collect();
            attendees.retain(|a| wanted.contains(&a.name.to_lowercase()));
        }

        let top_k = match request.top_k {
            None => defaults.top_k,
            Some(k) if k > 0 => k as usize,
            Some(k) => {
                return Err(ValidationError::invalid("top_k", format!("must be > 0, got {k}")))
            }
        };

        Ok(Self {
            slot_minutes,
            meeting_length_minutes,
            window_length: Window::length_for(meeting_length_minutes, slot_minutes),
            days: days.into_iter().map(DayLabel::new).collect(),
            attendees,
            schedule: validate_schedule(request.schedule, &defaults.schedule)?,
            blockers: validate_blockers(request.constraints.and_then(|c| c.global_blockers))?,
            weights: validate_weights(request.weights, &defaults.weights)?,
            top_k,
        })
    }
}

fn positive_minutes(field: &str, value: Option<i64>) -> Result<u32, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::MissingField(field.into()))?;
    if value <= 0 {
        return Err(ValidationError::invalid(field, format!("must be > 0, got {value}")));
    }
    u32::try_from(value)
        .map_err(|_| ValidationError::invalid(field, format!("{value} is too large")))
}

fn validate_attendee(index: usize, input: AttendeeInput) -> Result<Attendee, ValidationError> {
    let field = format!("attendees[{index}]");
    let name = input
        .name
        .map(|n| n.trim().to_string())
        .ok_or_else(|| ValidationError::MissingField(format!("{field}.name")))?;
    if name.is_empty() {
        return Err(ValidationError::invalid(format!("{field}.name"), "must not be empty"));
    }

    let priority = input.priority.unwrap_or(DEFAULT_PRIORITY);
    if !priority.is_finite() || priority < 0.0 {
        return Err(ValidationError::invalid(
            format!("{field}.priority"),
            format!("must be a non-negative number, got {priority}"),
        ));
    }

    let availability = input
        .availability_matrix
        .ok_or_else(|| ValidationError::MissingField(format!("{field}.availability_matrix")))?;

    Ok(Attendee::new(name, priority, availability))
}

fn check_unique_names(attendees: &[Attendee]) -> Result<(), ValidationError> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for a in attendees {
        *counts.entry(a.name.to_lowercase()).or_default() += 1;
    }
    let mut duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name)
        .collect();
    if duplicates.is_empty() {
        return Ok(());
    }
    duplicates.sort();
    Err(ValidationError::DuplicateName(duplicates.join(", ")))
}

fn synthesize_day_labels(count: usize) -> Result<Vec<String>, ValidationError> {
    if count == 0 {
        return Err(ValidationError::EmptyCollection("days".into()));
    }
    Ok((1..=count).map(|i| format!("day-{i}")).collect())
}

fn check_matrix_shape(attendees: &[Attendee], day_count: usize) -> Result<(), ValidationError> {
    for (i, a) in attendees.iter().enumerate() {
        if a.availability.len() != day_count {
            return Err(ValidationError::RowCountMismatch {
                field: format!("attendees[{i}].availability_matrix"),
                expected: day_count,
                found: a.availability.len(),
            });
        }
    }
    for day in 0..day_count {
        let expected = attendees[0].availability[day].len();
        for (i, a) in attendees.iter().enumerate().skip(1) {
            let found = a.availability[day].len();
            if found != expected {
                return Err(ValidationError::RowLengthMismatch {
                    field: format!("attendees[{i}].availability_matrix[{day}]"),
                    day,
                    expected,
                    found,
                });
            }
        }
    }
    Ok(())
}

fn validate_schedule(
    input: Option<ScheduleInput>,
    defaults: &ScheduleSettings,
) -> Result<ScheduleSettings, ValidationError> {
    let Some(input) = input else {
        return Ok(defaults.clone());
    };
    let day_start = match input.day_start {
        Some(s) => ClockTime::parse("schedule.day_start", &s)?,
        None => defaults.day_start,
    };
    let timezone = match input.timezone {
        Some(tz) if tz.trim().is_empty() => {
            return Err(ValidationError::invalid("schedule.timezone", "must not be empty"))
        }
        Some(tz) => tz.trim().to_string(),
        None => defaults.timezone.clone(),
    };
    Ok(ScheduleSettings {
        day_start,
        timezone,
    })
}

fn validate_blockers(input: Option<GlobalBlockersInput>) -> Result<GlobalBlockers, ValidationError> {
    let Some(input) = input else {
        return Ok(GlobalBlockers::default());
    };
    let field = "constraints.global_blockers";

    let hours = input
        .hours
        .map(|r| ClockRange::new(&format!("{field}.hours"), &r.start, &r.end))
        .transpose()?;
    let lunch = input
        .lunch
        .map(|r| ClockRange::new(&format!("{field}.lunch"), &r.start, &r.end))
        .transpose()?;

    let mut weekdays_disallowed = Vec::new();
    for (i, idx) in input.weekdays_disallowed.unwrap_or_default().into_iter().enumerate() {
        let day = weekday_from_index(idx).ok_or_else(|| {
            ValidationError::invalid(
                format!("{field}.weekdays_disallowed[{i}]"),
                format!("weekday must be in 0..=6, got {idx}"),
            )
        })?;
        if !weekdays_disallowed.contains(&day) {
            weekdays_disallowed.push(day);
        }
    }

    let min_attendees = match input.min_attendees {
        None => None,
        Some(n) if n >= 0 => Some(n as usize),
        Some(n) => {
            return Err(ValidationError::invalid(
                format!("{field}.min_attendees"),
                format!("must be >= 0, got {n}"),
            ))
        }
    };

    Ok(GlobalBlockers {
        hours,
        lunch,
        weekdays_disallowed,
        min_attendees,
    })
}

fn validate_weights(
    input: Option<WeightsInput>,
    defaults: &Weights,
) -> Result<Weights, ValidationError> {
    let Some(input) = input else {
        return Ok(*defaults);
    };
    let avail_scores = match &input.avail_scores {
        Some(map) => AvailScores::from_code_map(map)?,
        None => defaults.avail_scores,
    };
    let unpreferred_penalty_per_person = input
        .unpreferred_penalty_per_person
        .unwrap_or(defaults.unpreferred_penalty_per_person);
    if !unpreferred_penalty_per_person.is_finite() || unpreferred_penalty_per_person < 0.0 {
        return Err(ValidationError::invalid(
            "weights.unpreferred_penalty_per_person",
            format!("must be a non-negative number, got {unpreferred_penalty_per_person}"),
        ));
    }
    Ok(Weights {
        avail_scores,
        unpreferred_penalty_per_person,
        hard_block_for_high_priority: input
            .hard_block_for_high_priority
            .unwrap_or(defaults.hard_block_for_high_priority),
        distinct_top_priority_only: input
            .distinct_top_priority_only
            .unwrap_or(defaults.distinct_top_priority_only),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> serde_json::Value {
        json!({
            "slot_minutes": 30,
            "meeting_length_minutes": 60,
            "days": ["2025-10-20"],
            "attendees": [
                {"name": "Alice", "priority": 2, "availability_matrix": [[2, 2, 0, 2]]},
                {"name": "Bob", "availability_matrix": [[2, 1, 2, 2]]}
            ]
        })
    }

    fn validate(value: serde_json::Value) -> Result<ValidatedRequest, ValidationError> {
        let request: MeetingRequest = serde_json::from_value(value).unwrap();
        ValidatedRequest::from_request(request, &EngineDefaults::default())
    }

    #[test]
    fn test_valid_request_uses_defaults() {
        let v = validate(base()).unwrap();
        assert_eq!(v.window_length, 2);
        assert_eq!(v.top_k, DEFAULT_TOP_K);
        assert_eq!(v.attendees[1].priority, 1.0);
        assert!(v.weights.hard_block_for_high_priority);
        assert_eq!(v.schedule.timezone, "UTC");
    }

    #[test]
    fn test_missing_fields_are_named() {
        let mut value = base();
        value.as_object_mut().unwrap().remove("slot_minutes");
        assert_eq!(
            validate(value),
            Err(ValidationError::MissingField("slot_minutes".into()))
        );

        let mut value = base();
        value["attendees"][1].as_object_mut().unwrap().remove("availability_matrix");
        assert_eq!(
            validate(value),
            Err(ValidationError::MissingField("attendees[1].availability_matrix".into()))
        );
    }

    #[test]
    fn test_non_positive_numbers_rejected() {
        let mut value = base();
        value["meeting_length_minutes"] = json!(0);
        assert!(matches!(validate(value), Err(ValidationError::InvalidValue { field, .. }) if field == "meeting_length_minutes"));

        let mut value = base();
        value["top_k"] = json!(0);
        assert!(matches!(validate(value), Err(ValidationError::InvalidValue { field, .. }) if field == "top_k"));
    }

    #[test]
    fn test_row_count_mismatch() {
        let mut value = base();
        value["days"] = json!(["2025-10-20", "2025-10-21"]);
        assert!(matches!(
            validate(value),
            Err(ValidationError::RowCountMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_row_length_mismatch_names_the_attendee() {
        let mut value = base();
        value["attendees"][1]["availability_matrix"] = json!([[2, 2, 2]]);
        match validate(value) {
            Err(ValidationError::RowLengthMismatch { field, day, .. }) => {
                assert_eq!(field, "attendees[1].availability_matrix[0]");
                assert_eq!(day, 0);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_names_case_insensitive() {
        let mut value = base();
        value["attendees"][1]["name"] = json!("ALICE");
        assert_eq!(
            validate(value),
            Err(ValidationError::DuplicateName("alice".into()))
        );
    }

    #[test]
    fn test_missing_days_are_synthesized() {
        let mut value = base();
        value.as_object_mut().unwrap().remove("days");
        let v = validate(value).unwrap();
        assert_eq!(v.days.len(), 1);
        assert_eq!(v.days[0].as_str(), "day-1");
        assert!(!v.days[0].is_dated());
    }

    #[test]
    fn test_active_attendees_filter() {
        let mut value = base();
        value["active_attendees"] = json!(["bob"]);
        let v = validate(value).unwrap();
        assert_eq!(v.attendees.len(), 1);
        assert_eq!(v.attendees[0].name, "Bob");

        let mut value = base();
        value["active_attendees"] = json!(["Carol"]);
        assert!(validate(value).unwrap().attendees.is_empty());
    }

    #[test]
    fn test_blockers_validation() {
        let mut value = base();
        value["constraints"] = json!({"global_blockers": {
            "hours": {"start": "09:00", "end": "24:00"},
            "lunch": {"start": "12:00", "end": "13:00"},
            "weekdays_disallowed": [5, 6, 6],
            "min_attendees": 2
        }});
        let v = validate(value).unwrap();
        assert_eq!(v.blockers.weekdays_disallowed.len(), 2);
        assert_eq!(v.blockers.min_attendees, Some(2));
        assert_eq!(v.blockers.hours.unwrap().end, ClockTime::END_OF_DAY);

        let mut value = base();
        value["constraints"] = json!({"global_blockers": {"weekdays_disallowed": [7]}});
        assert!(validate(value).is_err());

        let mut value = base();
        value["constraints"] = json!({"global_blockers": {"lunch": {"start": "13:00", "end": "12:00"}}});
        assert!(validate(value).is_err());
    }

    #[test]
    fn test_malformed_avail_scores_key() {
        let mut value = base();
        value["weights"] = json!({"avail_scores": {"x": 1.0}});
        assert_eq!(
            validate(value),
            Err(ValidationError::InvalidAvailScoreKey("x".into()))
        );
    }

    #[test]
    fn test_unknown_fields_rejected_at_parse() {
        let mut value = base();
        value["weights"] = json!({"penalty": 1.0});
        assert!(serde_json::from_value::<MeetingRequest>(value).is_err());
    }

    #[test]
    fn test_schedule_overrides() {
        let mut value = base();
        value["schedule"] = json!({"day_start": "09:00", "timezone": "Europe/Oslo"});
        let v = validate(value).unwrap();
        assert_eq!(v.schedule.day_start.minutes(), 540);
        assert_eq!(v.schedule.timezone, "Europe/Oslo");

        let mut value = base();
        value["schedule"] = json!({"day_start": "9am"});
        assert!(matches!(validate(value), Err(ValidationError::InvalidClockTime { .. })));
    }
}
