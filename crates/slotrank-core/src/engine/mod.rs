//! Slot scoring and ranking engine.
//!
//! Per request, each day is handled independently:
//! - build the weighted preference timeline and its prefix sums
//! - for every start index, apply clock blockers, inspect the window
//!   (hard block, conflicts, coverage), apply the attendance threshold
//! - score the survivors and resolve their timestamps
//!
//! Days run in parallel; the per-day results are concatenated in day order
//! and ranked once, so output does not depend on thread scheduling.

mod aggregator;
mod analyzer;
mod blockers;
mod ranker;
mod resolver;
mod timeline;

pub use aggregator::PrefixSums;
pub use analyzer::{analyze_window, HardBlockPolicy, WindowAnalysis, WindowVerdict};
pub use blockers::{BlockReason, BlockerFilter};
pub use ranker::{compare_candidates, rank, Candidate};
pub use resolver::{ResolvedTimes, TimeResolver, WindowPlacement, ZoneResolution};
pub use timeline::build_day_timeline;

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{round4, Suggestion, SuggestionSet, Window};
use crate::request::{EngineDefaults, MeetingRequest, ValidatedRequest};

/// Validate a raw request and rank its candidate windows.
pub fn suggest(request: MeetingRequest, defaults: &EngineDefaults) -> Result<SuggestionSet> {
    let validated = ValidatedRequest::from_request(request, defaults)?;
    Ok(recommend(&validated))
}

/// Rank every admissible window of a validated request.
pub fn recommend(request: &ValidatedRequest) -> SuggestionSet {
    if request.attendees.is_empty() {
        tracing::debug!("no active attendees, nothing to rank");
        return SuggestionSet::default();
    }

    let policy = HardBlockPolicy::new(&request.attendees, &request.weights);
    tracing::debug!(
        attendees = request.attendees.len(),
        days = request.days.len(),
        hard_block = policy.is_enforced(),
        "ranking request"
    );

    let ctx = DayContext {
        request,
        policy,
        resolver: TimeResolver::new(&request.schedule, request.slot_minutes),
        filter: BlockerFilter::new(&request.blockers),
    };

    let per_day: Vec<Vec<Candidate>> = (0..request.days.len())
        .into_par_iter()
        .map(|day_index| ctx.evaluate_day(day_index))
        .collect();
    let candidates: Vec<Candidate> = per_day.into_iter().flatten().collect();
    let total = candidates.len();

    let suggestions = rank(candidates, request.top_k);
    tracing::debug!(candidates = total, returned = suggestions.len(), "ranked suggestions");
    SuggestionSet { suggestions }
}

struct DayContext<'a> {
    request: &'a ValidatedRequest,
    policy: HardBlockPolicy,
    resolver: TimeResolver,
    filter: BlockerFilter<'a>,
}

impl DayContext<'_> {
    fn evaluate_day(&self, day_index: usize) -> Vec<Candidate> {
        let req = self.request;
        let length = req.window_length;
        let timeline = build_day_timeline(&req.attendees, day_index, &req.weights.avail_scores);
        let sums = PrefixSums::new(&timeline);

        let candidates: Vec<Candidate> = Window::starts(sums.slots(), length)
            .filter_map(|start| self.evaluate_window(Window::new(day_index, start, length), &sums))
            .collect();

        tracing::debug!(
            day = %req.days[day_index].as_str(),
            slots = sums.slots(),
            window_length = length,
            candidates = candidates.len(),
            "evaluated day"
        );
        candidates
    }

    fn evaluate_window(&self, window: Window, sums: &PrefixSums) -> Option<Candidate> {
        let req = self.request;
        let day = &req.days[window.day_index];

        let placement = self.resolver.placement(day, window.start, window.length);
        self.filter.check_clock(placement.as_ref()).ok()?;

        let analysis = match analyze_window(&req.attendees, &window, &self.policy) {
            WindowVerdict::Blocked { .. } => return None,
            WindowVerdict::Open(analysis) => analysis,
        };
        self.filter
            .check_attendance(analysis.fully_available_attendees)
            .ok()?;

        let raw = sums.window_sum(window.start, window.length);
        let score = raw - req.weights.unpreferred_penalty_per_person * analysis.unpreferred_cells as f64;
        let cells = req.attendees.len() * window.length;
        let coverage = if cells == 0 {
            0.0
        } else {
            analysis.total_full_avails as f64 / cells as f64
        };
        let times = placement
            .map(|p| self.resolver.resolve(&p))
            .unwrap_or_default();

        Some(Candidate {
            day_index: window.day_index,
            suggestion: Suggestion {
                day: day.as_str().to_string(),
                start_slot_index: window.start,
                slot_minutes: req.slot_minutes,
                meeting_length_minutes: req.meeting_length_minutes,
                score: round4(score),
                coverage: round4(coverage),
                conflicts: analysis.conflicts,
                fully_available_attendees: analysis.fully_available_attendees,
                start_iso: times.start_iso,
                end_iso: times.end_iso,
                timezone: times.timezone,
            },
        })
    }
}
