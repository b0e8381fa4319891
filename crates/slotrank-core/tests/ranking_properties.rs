//! Property checks over randomly generated availability grids.

use std::cmp::Ordering;

use proptest::prelude::*;
use serde_json::json;
use slotrank_core::{suggest, EngineDefaults, MeetingRequest, Suggestion, SuggestionSet};

#[derive(Debug, Clone)]
struct Grid {
    priorities: Vec<u8>,
    /// attendee -> day -> cells
    cells: Vec<Vec<Vec<u8>>>,
    length_slots: usize,
    top_k: usize,
}

fn grid() -> impl Strategy<Value = Grid> {
    (1usize..4, 1usize..4, 1usize..10).prop_flat_map(|(attendees, days, slots)| {
        (
            prop::collection::vec(1u8..4, attendees),
            prop::collection::vec(
                prop::collection::vec(prop::collection::vec(0u8..4, slots), days),
                attendees,
            ),
            1usize..5,
            1usize..8,
        )
            .prop_map(|(priorities, cells, length_slots, top_k)| Grid {
                priorities,
                cells,
                length_slots,
                top_k,
            })
    })
}

fn day_label(day: usize) -> String {
    format!("d{day}")
}

fn day_index(s: &Suggestion) -> usize {
    s.day[1..].parse().unwrap()
}

/// Score desc, conflicts asc, fully available desc, coverage desc, start asc, day asc.
fn rank_order(a: &Suggestion, b: &Suggestion) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap()
        .then(a.conflicts.len().cmp(&b.conflicts.len()))
        .then(b.fully_available_attendees.cmp(&a.fully_available_attendees))
        .then(b.coverage.partial_cmp(&a.coverage).unwrap())
        .then(a.start_slot_index.cmp(&b.start_slot_index))
        .then(day_index(a).cmp(&day_index(b)))
}

fn run(grid: &Grid) -> SuggestionSet {
    let days: Vec<String> = (0..grid.cells[0].len()).map(day_label).collect();
    let attendees: Vec<_> = grid
        .priorities
        .iter()
        .zip(&grid.cells)
        .enumerate()
        .map(|(i, (p, rows))| json!({"name": format!("p{i}"), "priority": p, "availability_matrix": rows}))
        .collect();
    let request: MeetingRequest = serde_json::from_value(json!({
        "slot_minutes": 15,
        "meeting_length_minutes": grid.length_slots * 15,
        "days": days,
        "attendees": attendees,
        "weights": {"unpreferred_penalty_per_person": 0.1},
        "top_k": grid.top_k
    }))
    .unwrap();
    suggest(request, &EngineDefaults::default()).unwrap()
}

proptest! {
    #[test]
    fn test_output_is_bounded_and_sorted(grid in grid()) {
        let result = run(&grid);
        prop_assert!(result.len() <= grid.top_k);
        for pair in result.suggestions.windows(2) {
            prop_assert_ne!(rank_order(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn test_fields_stay_in_range(grid in grid()) {
        let result = run(&grid);
        let attendees = grid.priorities.len();
        for s in &result.suggestions {
            prop_assert!((0.0..=1.0).contains(&s.coverage));
            prop_assert!(s.fully_available_attendees <= attendees);
            prop_assert!(s.conflicts.len() + s.fully_available_attendees <= attendees);
            prop_assert_eq!(s.meeting_length_minutes as usize, grid.length_slots * 15);
            prop_assert!(s.start_iso.is_none());
        }
    }

    #[test]
    fn test_distinct_top_priority_is_never_busy(grid in grid()) {
        let top = *grid.priorities.iter().max().unwrap();
        let holders: Vec<usize> = (0..grid.priorities.len())
            .filter(|&i| grid.priorities[i] == top)
            .collect();
        let result = run(&grid);
        if holders.len() == 1 {
            let rows = &grid.cells[holders[0]];
            for s in &result.suggestions {
                let day = day_index(s);
                let window = &rows[day][s.start_slot_index..s.start_slot_index + grid.length_slots];
                prop_assert!(window.iter().all(|&c| c != 0));
            }
        }
    }

    #[test]
    fn test_repeated_runs_agree(grid in grid()) {
        prop_assert_eq!(run(&grid), run(&grid));
    }
}
