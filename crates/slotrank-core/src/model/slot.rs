//! Slot states and their preference scores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;

/// State of one attendee in one slot.
///
/// Serialized as its wire code: 0 = busy, 1 = tentative, 2 = available.
/// Any other code is carried through as [`SlotState::Other`] and scores 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum SlotState {
    Busy,
    Tentative,
    Available,
    Other(u8),
}

impl SlotState {
    pub fn code(self) -> u8 {
        match self {
            SlotState::Busy => 0,
            SlotState::Tentative => 1,
            SlotState::Available => 2,
            SlotState::Other(code) => code,
        }
    }
}

impl From<u8> for SlotState {
    fn from(code: u8) -> Self {
        match code {
            0 => SlotState::Busy,
            1 => SlotState::Tentative,
            2 => SlotState::Available,
            other => SlotState::Other(other),
        }
    }
}

impl From<SlotState> for u8 {
    fn from(state: SlotState) -> Self {
        state.code()
    }
}

/// Preference score per slot state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailScores {
    #[serde(default)]
    pub busy: f64,
    #[serde(default)]
    pub tentative: f64,
    #[serde(default)]
    pub available: f64,
}

/// Canonical scores: busy 0.0, tentative 0.5, available 1.0.
pub const DEFAULT_AVAIL_SCORES: AvailScores = AvailScores {
    busy: 0.0,
    tentative: 0.5,
    available: 1.0,
};

impl Default for AvailScores {
    fn default() -> Self {
        DEFAULT_AVAIL_SCORES
    }
}

impl AvailScores {
    /// Score of a single cell. Unknown states score 0.
    pub fn score(&self, state: SlotState) -> f64 {
        match state {
            SlotState::Busy => self.busy,
            SlotState::Tentative => self.tentative,
            SlotState::Available => self.available,
            SlotState::Other(_) => 0.0,
        }
    }

    /// Build from a wire mapping keyed by stringified state codes.
    ///
    /// The mapping replaces the defaults wholesale: states it does not
    /// mention score 0.
    pub fn from_code_map(map: &BTreeMap<String, f64>) -> Result<Self, ValidationError> {
        let mut scores = AvailScores {
            busy: 0.0,
            tentative: 0.0,
            available: 0.0,
        };
        for (key, value) in map {
            if !value.is_finite() {
                return Err(ValidationError::invalid(
                    format!("weights.avail_scores.{key}"),
                    "score must be a finite number",
                ));
            }
            let code: u8 = key
                .trim()
                .parse()
                .map_err(|_| ValidationError::InvalidAvailScoreKey(key.clone()))?;
            match SlotState::from(code) {
                SlotState::Busy => scores.busy = *value,
                SlotState::Tentative => scores.tentative = *value,
                SlotState::Available => scores.available = *value,
                SlotState::Other(_) => return Err(ValidationError::InvalidAvailScoreKey(key.clone())),
            }
        }
        Ok(scores)
    }
}
