//! End-to-end recommendation tests through the public `suggest` entry point.
//!
//! Requests are written as JSON so the tests exercise the same shape that
//! callers send.

use serde_json::{json, Value};
use slotrank_core::{suggest, CoreError, EngineDefaults, MeetingRequest, SuggestionSet, ValidationError};

fn run(value: Value) -> Result<SuggestionSet, CoreError> {
    let request: MeetingRequest = serde_json::from_value(value).expect("request shape");
    suggest(request, &EngineDefaults::default())
}

fn scenario_a() -> Value {
    json!({
        "slot_minutes": 30,
        "meeting_length_minutes": 60,
        "days": ["2025-10-20"],
        "attendees": [
            {"name": "Alice", "priority": 2, "availability_matrix": [[2, 2, 0, 2]]},
            {"name": "Bob", "priority": 1, "availability_matrix": [[2, 1, 2, 2]]}
        ],
        "weights": {
            "avail_scores": {"0": 0.0, "1": 0.5, "2": 1.0},
            "unpreferred_penalty_per_person": 0.1,
            "hard_block_for_high_priority": true
        }
    })
}

#[test]
fn test_top_priority_busy_cell_blocks_windows() {
    let result = run(scenario_a()).unwrap();
    assert_eq!(result.len(), 1);

    let best = &result.suggestions[0];
    assert_eq!(best.start_slot_index, 0);
    assert_eq!(best.score, 5.4);
    assert_eq!(best.coverage, 0.75);
    assert!(best.conflicts.is_empty());
    assert_eq!(best.fully_available_attendees, 1);
    assert_eq!(best.slot_minutes, 30);
    assert_eq!(best.meeting_length_minutes, 60);
    assert_eq!(best.start_iso.as_deref(), Some("2025-10-20T00:00:00+00:00"));
    assert_eq!(best.end_iso.as_deref(), Some("2025-10-20T01:00:00+00:00"));
    assert_eq!(best.timezone.as_deref(), Some("UTC"));
}

#[test]
fn test_lunch_blackout_removes_window() {
    let mut request = scenario_a();
    request["schedule"] = json!({"day_start": "12:00"});
    request["constraints"] = json!({"global_blockers": {"lunch": {"start": "12:00", "end": "13:00"}}});
    let result = run(request).unwrap();
    assert!(result.is_empty());
    assert_eq!(serde_json::to_value(&result).unwrap(), json!({"suggestions": []}));
}

#[test]
fn test_min_attendees_filters_partial_windows() {
    let mut request = scenario_a();
    request["constraints"] = json!({"global_blockers": {"min_attendees": 2}});
    assert!(run(request).unwrap().is_empty());
}

#[test]
fn test_opaque_day_labels_skip_weekday_rules() {
    let request = json!({
        "slot_minutes": 60,
        "meeting_length_minutes": 60,
        "days": ["offsite", "2025-10-25"],
        "attendees": [{"name": "A", "availability_matrix": [[2, 2], [2, 2]]}],
        "constraints": {"global_blockers": {"weekdays_disallowed": [5, 6]}},
        "top_k": 10
    });
    let result = run(request).unwrap();
    assert_eq!(result.len(), 2);
    for s in &result.suggestions {
        assert_eq!(s.day, "offsite");
        assert!(s.start_iso.is_none());
        assert!(s.end_iso.is_none());
        assert!(s.timezone.is_none());
    }
}

#[test]
fn test_hours_window_and_named_zone() {
    let request = json!({
        "slot_minutes": 60,
        "meeting_length_minutes": 60,
        "days": ["2025-10-20"],
        "attendees": [{"name": "A", "availability_matrix": [[2, 2, 2, 2]]}],
        "schedule": {"day_start": "08:00", "timezone": "America/New_York"},
        "constraints": {"global_blockers": {"hours": {"start": "09:00", "end": "11:00"}}},
        "top_k": 10
    });
    let result = run(request).unwrap();
    let starts: Vec<usize> = result.suggestions.iter().map(|s| s.start_slot_index).collect();
    assert_eq!(starts, vec![1, 2]);
    assert_eq!(
        result.suggestions[0].start_iso.as_deref(),
        Some("2025-10-20T09:00:00-04:00")
    );
    assert_eq!(result.suggestions[0].timezone.as_deref(), Some("America/New_York"));
}

#[test]
fn test_unknown_zone_degrades_to_naive_times() {
    let mut request = scenario_a();
    request["schedule"] = json!({"day_start": "09:00", "timezone": "Mars/Olympus"});
    let result = run(request).unwrap();
    let best = &result.suggestions[0];
    assert_eq!(best.start_iso.as_deref(), Some("2025-10-20T09:00:00"));
    assert_eq!(best.end_iso.as_deref(), Some("2025-10-20T10:00:00"));
    assert!(best.timezone.is_none());
}

#[test]
fn test_tied_top_priority_disables_hard_block() {
    let request = json!({
        "slot_minutes": 30,
        "meeting_length_minutes": 30,
        "days": ["d1"],
        "attendees": [
            {"name": "A", "priority": 2, "availability_matrix": [[0, 2]]},
            {"name": "B", "priority": 2, "availability_matrix": [[2, 0]]}
        ],
        "top_k": 10
    });
    let result = run(request).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result.suggestions[0].conflicts, vec!["A".to_string()]);
    assert_eq!(result.suggestions[1].conflicts, vec!["B".to_string()]);
}

#[test]
fn test_tied_top_priority_blocks_when_not_distinct() {
    let request = json!({
        "slot_minutes": 30,
        "meeting_length_minutes": 30,
        "days": ["d1"],
        "attendees": [
            {"name": "A", "priority": 2, "availability_matrix": [[0, 2, 2]]},
            {"name": "B", "priority": 2, "availability_matrix": [[2, 0, 2]]}
        ],
        "weights": {"distinct_top_priority_only": false},
        "top_k": 10
    });
    let result = run(request).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.suggestions[0].start_slot_index, 2);
}

#[test]
fn test_active_attendees_restrict_and_disjoint_set_is_empty() {
    let mut request = scenario_a();
    request["active_attendees"] = json!(["bob"]);
    let result = run(request.clone()).unwrap();
    // Bob alone: windows 0, 1, 2 all admissible, no one busy.
    assert_eq!(result.len(), 3);
    assert!(result.suggestions.iter().all(|s| s.conflicts.is_empty()));

    request["active_attendees"] = json!(["Carol"]);
    let result = run(request).unwrap();
    assert_eq!(serde_json::to_value(&result).unwrap(), json!({"suggestions": []}));
}

#[test]
fn test_validation_rejects_before_scoring() {
    let mut request = scenario_a();
    request["attendees"][1]["name"] = json!("alice");
    let err = run(request).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::DuplicateName(_))
    ));
    assert!(err.is_client_fault());

    let mut request = scenario_a();
    request["attendees"][1]["availability_matrix"] = json!([[2, 1, 2]]);
    assert!(matches!(
        run(request).unwrap_err(),
        CoreError::Validation(ValidationError::RowLengthMismatch { .. })
    ));

    let mut request = scenario_a();
    request["weights"]["avail_scores"] = json!({"3": 1.0});
    assert!(matches!(
        run(request).unwrap_err(),
        CoreError::Validation(ValidationError::InvalidAvailScoreKey(_))
    ));
}

#[test]
fn test_unknown_fields_rejected_at_the_boundary() {
    let mut request = scenario_a();
    request["colour"] = json!("blue");
    assert!(serde_json::from_value::<MeetingRequest>(request).is_err());
}

#[test]
fn test_repeat_runs_are_identical() {
    let request = json!({
        "slot_minutes": 15,
        "meeting_length_minutes": 45,
        "days": ["2025-10-20", "2025-10-21", "2025-10-22"],
        "attendees": [
            {"name": "A", "priority": 3, "availability_matrix": [[2,2,2,1,2,2], [2,1,1,2,2,2], [2,2,2,2,2,2]]},
            {"name": "B", "availability_matrix": [[1,2,2,2,0,2], [2,2,2,2,2,2], [0,2,1,2,2,2]]}
        ],
        "weights": {"unpreferred_penalty_per_person": 0.05},
        "top_k": 20
    });
    let first = run(request.clone()).unwrap();
    for _ in 0..5 {
        assert_eq!(run(request.clone()).unwrap(), first);
    }
}
