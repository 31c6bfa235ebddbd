use biathlon_model::{EventKind, Status};
use thiserror::Error;

/// Errors raised while running an event through the transition table. All
/// of these are recovered locally by the dispatcher — the engine never
/// aborts a run because of one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no transition from {status} on {kind}")]
    WrongSequence { status: Status, kind: EventKind },

    #[error("invalid firing line {line} (must be in 1..={firing_lines})")]
    InvalidFiringLine { line: u32, firing_lines: u32 },

    #[error("target {target} already hit this range visit")]
    DuplicateTargetHit { target: u32 },
}
