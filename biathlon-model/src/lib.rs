//! Core domain types for the biathlon race event processor: the closed
//! status/event-kind sets, the event value, race configuration, and
//! per-competitor state. No parsing, no state-machine logic — just the data
//! the rest of the workspace operates on.

pub mod competitor;
pub mod config;
pub mod error;
pub mod event;
pub mod status;

pub use competitor::{CompetitorState, TimedInterval};
pub use config::Config;
pub use error::ModelError;
pub use event::{Event, EventPayload};
pub use status::{EventKind, Status};
