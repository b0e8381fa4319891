//! Global blocker rules: working hours, lunch, weekdays, minimum attendance.

use chrono::Datelike;

use super::resolver::WindowPlacement;
use crate::model::GlobalBlockers;

/// Why a window was rejected by a global blocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    Weekday,
    OutsideHours,
    Lunch,
    BelowMinAttendees,
    /// Placement could not be computed while clock rules are configured.
    Unplaceable,
}

#[derive(Debug, Clone, Copy)]
pub struct BlockerFilter<'a> {
    blockers: &'a GlobalBlockers,
}

impl<'a> BlockerFilter<'a> {
    pub fn new(blockers: &'a GlobalBlockers) -> Self {
        Self { blockers }
    }

    /// Clock and calendar rules. Weekday rules only apply to dated placements.
    pub fn check_clock(&self, placement: Option<&WindowPlacement>) -> Result<(), BlockReason> {
        if !self.blockers.has_clock_rules() {
            return Ok(());
        }
        let Some(placement) = placement else {
            return Err(BlockReason::Unplaceable);
        };

        if placement.dated
            && self
                .blockers
                .weekdays_disallowed
                .contains(&placement.start.weekday())
        {
            return Err(BlockReason::Weekday);
        }

        let start = placement.start_minute_of_day();
        let end = placement.end_minute_of_day();
        if let Some(hours) = &self.blockers.hours {
            if !hours.contains_span(start, end) {
                return Err(BlockReason::OutsideHours);
            }
        }
        if let Some(lunch) = &self.blockers.lunch {
            if lunch.overlaps_span(start, end) {
                return Err(BlockReason::Lunch);
            }
        }
        Ok(())
    }

    /// Minimum fully-available attendee threshold.
    pub fn check_attendance(&self, fully_available: usize) -> Result<(), BlockReason> {
        match self.blockers.min_attendees {
            Some(min) if fully_available < min => Err(BlockReason::BelowMinAttendees),
            _ => Ok(()),
        }
    }
}
