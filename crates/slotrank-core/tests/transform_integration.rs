//! Time-range payloads converted to grid requests and ranked.

use serde_json::json;
use slotrank_core::{
    suggest, AvailabilityPayload, AvailabilityTransformer, EngineDefaults, TransformError,
    TransformSettings,
};

fn morning_grid() -> AvailabilityTransformer {
    AvailabilityTransformer::with_settings(TransformSettings {
        slot_minutes: 60,
        day_start_minute: 540,
        day_end_minute: 720,
        day_labels: vec!["Monday".into()],
    })
}

#[test]
fn test_transformed_payload_ranks_with_frontend_weights() {
    let payload: AvailabilityPayload = serde_json::from_value(json!({
        "availability": [
            {"name": "Alice", "priority": 2, "time_slots": [
                {"day": 0, "start_minute": 600, "end_minute": 660, "availability_type": "busy"}
            ]},
            {"name": "Bob", "timeSlots": [
                {"day": 0, "startMinute": 540, "endMinute": 600, "availabilityType": "tentative"}
            ]}
        ],
        "meeting_length_minutes": 60
    }))
    .unwrap();

    let request = morning_grid().transform(payload).unwrap();
    let attendees = request.attendees.clone().unwrap();
    assert_eq!(
        serde_json::to_value(&attendees[0].availability_matrix).unwrap(),
        json!([[2, 0, 2]])
    );
    assert_eq!(
        serde_json::to_value(&attendees[1].availability_matrix).unwrap(),
        json!([[1, 2, 2]])
    );

    let result = suggest(request, &EngineDefaults::default()).unwrap();
    let order: Vec<(usize, f64)> = result
        .suggestions
        .iter()
        .map(|s| (s.start_slot_index, s.score))
        .collect();
    assert_eq!(order, vec![(2, 3.0), (0, 2.4), (1, 1.0)]);
    assert_eq!(result.suggestions[2].conflicts, vec!["Alice".to_string()]);
}

#[test]
fn test_invalid_payload_never_reaches_engine() {
    let payload: AvailabilityPayload = serde_json::from_value(json!({
        "availability": [
            {"name": "Alice", "time_slots": [
                {"day": 0, "start_minute": 610, "end_minute": 660, "availability_type": "busy"}
            ]}
        ]
    }))
    .unwrap();
    assert!(matches!(
        morning_grid().transform(payload),
        Err(TransformError::Misaligned { .. })
    ));

    let payload: AvailabilityPayload = serde_json::from_value(json!({
        "availability": [{"name": "Ann"}, {"name": " ann "}]
    }))
    .unwrap();
    assert_eq!(
        morning_grid().transform(payload),
        Err(TransformError::DuplicateNames(vec!["ann".to_string()]))
    );
}

#[test]
fn test_clock_blockers_follow_grid_start() {
    let payload: AvailabilityPayload = serde_json::from_value(json!({
        "availability": [{"name": "Alice"}],
        "meeting_length_minutes": 60,
        "constraints": {"globalBlockers": {"lunch": {"start": "09:00", "end": "10:00"}}}
    }))
    .unwrap();

    let request = morning_grid().transform(payload).unwrap();
    let result = suggest(request, &EngineDefaults::default()).unwrap();
    let starts: Vec<usize> = result.suggestions.iter().map(|s| s.start_slot_index).collect();
    assert_eq!(starts, vec![1, 2]);
}

#[test]
fn test_camel_case_weights_reach_the_engine() {
    let payload: AvailabilityPayload = serde_json::from_value(json!({
        "availability": [
            {"name": "Alice", "priority": 2, "timeSlots": [
                {"day": 0, "startMinute": 540, "endMinute": 600, "availabilityType": "busy"}
            ]},
            {"name": "Bob"}
        ],
        "meetingLengthMinutes": 60,
        "weights": {"hardBlockForHighPriority": true, "unpreferredPenaltyPerPerson": 0.0}
    }))
    .unwrap();

    let request = morning_grid().transform(payload).unwrap();
    let result = suggest(request, &EngineDefaults::default()).unwrap();
    let starts: Vec<usize> = result.suggestions.iter().map(|s| s.start_slot_index).collect();
    assert_eq!(starts, vec![1, 2]);
}
