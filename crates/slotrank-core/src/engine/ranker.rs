//! Total ordering of candidate suggestions and top-K truncation.

use std::cmp::Ordering;

use crate::model::Suggestion;

/// A suggestion together with the index of the day it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub day_index: usize,
    pub suggestion: Suggestion,
}

/// Rank order: score desc, conflicts asc, fully available desc, coverage
/// desc, start slot asc, then day index asc.
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    let (x, y) = (&a.suggestion, &b.suggestion);
    y.score
        .total_cmp(&x.score)
        .then_with(|| x.conflicts.len().cmp(&y.conflicts.len()))
        .then_with(|| y.fully_available_attendees.cmp(&x.fully_available_attendees))
        .then_with(|| y.coverage.total_cmp(&x.coverage))
        .then_with(|| x.start_slot_index.cmp(&y.start_slot_index))
        .then_with(|| a.day_index.cmp(&b.day_index))
}

/// Sort candidates and keep the first `top_k`.
pub fn rank(mut candidates: Vec<Candidate>, top_k: usize) -> Vec<Suggestion> {
    candidates.sort_by(compare_candidates);
    candidates.truncate(top_k);
    candidates.into_iter().map(|c| c.suggestion).collect()
}
