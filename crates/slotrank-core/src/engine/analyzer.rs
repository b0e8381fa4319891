//! Per-window conflict and coverage inspection, including the hard-block rule.

use crate::model::{Attendee, SlotState, Weights, Window};

/// Decides whether a top-priority attendee's busy cell rejects a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardBlockPolicy {
    top_priority: f64,
    enforced: bool,
}

impl HardBlockPolicy {
    /// Derive the policy for a set of attendees.
    ///
    /// Blocking is enforced when `hard_block_for_high_priority` is set and,
    /// if `distinct_top_priority_only` is set, exactly one attendee holds the
    /// maximum priority. With a tie under that flag nobody blocks.
    pub fn new(attendees: &[Attendee], weights: &Weights) -> Self {
        let top_priority = attendees
            .iter()
            .map(|a| a.priority)
            .fold(f64::NEG_INFINITY, f64::max);
        let holders = attendees.iter().filter(|a| a.priority == top_priority).count();
        let top_ok = !weights.distinct_top_priority_only || holders == 1;
        Self {
            top_priority,
            enforced: weights.hard_block_for_high_priority && top_ok && !attendees.is_empty(),
        }
    }

    pub fn is_enforced(&self) -> bool {
        self.enforced
    }

    fn blocks(&self, attendee: &Attendee) -> bool {
        self.enforced && attendee.priority == self.top_priority
    }
}

/// Bookkeeping for a window that was not hard-blocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowAnalysis {
    /// Attendees with at least one busy cell, in attendee order.
    pub conflicts: Vec<String>,
    /// Tentative cells summed over attendees.
    pub unpreferred_cells: usize,
    /// Attendees with neither busy nor tentative cells.
    pub fully_available_attendees: usize,
    /// Available cells summed over attendees.
    pub total_full_avails: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowVerdict {
    /// A top-priority attendee is busy; the window must not be offered.
    Blocked { attendee: String },
    Open(WindowAnalysis),
}

/// Inspect the cells of `window` for every attendee.
///
/// Returns as soon as a blocking attendee is found.
pub fn analyze_window(attendees: &[Attendee], window: &Window, policy: &HardBlockPolicy) -> WindowVerdict {
    let mut analysis = WindowAnalysis::default();

    for attendee in attendees {
        let mut busy = false;
        let mut tentative = 0;
        let mut available = 0;
        for state in attendee.window_cells(window) {
            match state {
                SlotState::Busy => busy = true,
                SlotState::Tentative => tentative += 1,
                SlotState::Available => available += 1,
                SlotState::Other(_) => {}
            }
        }

        if busy && policy.blocks(attendee) {
            return WindowVerdict::Blocked {
                attendee: attendee.name.clone(),
            };
        }

        analysis.total_full_avails += available;
        analysis.unpreferred_cells += tentative;
        if busy {
            analysis.conflicts.push(attendee.name.clone());
        } else if tentative == 0 {
            analysis.fully_available_attendees += 1;
        }
    }

    WindowVerdict::Open(analysis)
}
