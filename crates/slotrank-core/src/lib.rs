//! # Slotrank Core Library
//!
//! Recommends meeting start times for a group of attendees. Each attendee
//! supplies a per-day grid of availability cells and a priority; the engine
//! scores every contiguous window of the requested length and returns the
//! best candidates in a deterministic order.
//!
//! ## Architecture
//!
//! - **Request**: JSON input types and validation into a [`ValidatedRequest`]
//! - **Engine**: weighted timelines, prefix sums, hard-block and blocker
//!   filtering, scoring, ranking and wall-clock resolution
//! - **Transform**: converts time-range availability payloads into the
//!   canonical grid request
//! - **Storage**: TOML configuration and a JSON preset store
//!
//! ## Key Components
//!
//! - [`suggest`]: validate and rank in one call
//! - [`recommend`]: rank an already validated request
//! - [`AvailabilityTransformer`]: time ranges to grid
//! - [`Config`]: application defaults
//! - [`PresetStore`]: named request payloads

pub mod engine;
pub mod error;
pub mod model;
pub mod request;
pub mod storage;
pub mod transform;

pub use engine::{recommend, suggest};
pub use error::{ConfigError, CoreError, PresetError, TransformError, ValidationError};
pub use model::{Suggestion, SuggestionSet};
pub use request::{EngineDefaults, MeetingRequest, ValidatedRequest};
pub use storage::{Config, PresetStore};
pub use transform::{AvailabilityPayload, AvailabilityTransformer, TransformSettings};
