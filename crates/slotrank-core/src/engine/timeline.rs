//! Per-day weighted preference timeline.

use crate::model::{Attendee, AvailScores};

/// Build the preference timeline for one day.
///
/// `timeline[t]` is the priority-weighted sum of every attendee's score for
/// slot `t`. The length is the day's slot count (taken from the first
/// attendee; validation guarantees all attendees agree).
pub fn build_day_timeline(attendees: &[Attendee], day_index: usize, scores: &AvailScores) -> Vec<f64> {
    let Some(first) = attendees.first() else {
        return Vec::new();
    };
    let mut timeline = vec![0.0; first.row(day_index).len()];
    for attendee in attendees {
        for (slot, state) in timeline.iter_mut().zip(attendee.row(day_index)) {
            *slot += attendee.priority * scores.score(*state);
        }
    }
    timeline
}
