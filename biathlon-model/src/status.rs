//! Competitor status and event-kind enumerations — the two closed sets the
//! transition table in `biathlon-engine` is keyed on.

use std::fmt;

/// A competitor's position in the race lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Status {
    #[default]
    Unknown,
    Registered,
    Scheduled,
    OnStartLine,
    OnMainLap,
    OnRange,
    OnPenaltyLap,
    Finished,
    NotStarted,
    Disqualified,
    CannotContinue,
}

impl Status {
    /// Terminal statuses never accept another transition except, in the case
    /// of `Finished`, a late `Disqualify`.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Status::Finished | Status::NotStarted | Status::Disqualified | Status::CannotContinue
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Status::Unknown => "unknown",
            Status::Registered => "registered",
            Status::Scheduled => "scheduled",
            Status::OnStartLine => "on_start_line",
            Status::OnMainLap => "on_main_lap",
            Status::OnRange => "on_range",
            Status::OnPenaltyLap => "on_penalty_lap",
            Status::Finished => "finished",
            Status::NotStarted => "not_started",
            Status::Disqualified => "disqualified",
            Status::CannotContinue => "cannot_continue",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The closed set of event kinds. Ids 1–11 are supplied by the event-log
/// adapter; 32 and 33 are produced only by transition actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Register,
    Scheduled,
    ComeToStartLine,
    Start,
    ComeToFiringRange,
    HitTarget,
    LeaveFiringRange,
    EnterPenaltyLap,
    LeavePenaltyLap,
    EndMainLap,
    CannotContinue,
    Disqualify,
    Finish,
}

impl EventKind {
    pub const fn id(self) -> u16 {
        match self {
            EventKind::Register => 1,
            EventKind::Scheduled => 2,
            EventKind::ComeToStartLine => 3,
            EventKind::Start => 4,
            EventKind::ComeToFiringRange => 5,
            EventKind::HitTarget => 6,
            EventKind::LeaveFiringRange => 7,
            EventKind::EnterPenaltyLap => 8,
            EventKind::LeavePenaltyLap => 9,
            EventKind::EndMainLap => 10,
            EventKind::CannotContinue => 11,
            EventKind::Disqualify => 32,
            EventKind::Finish => 33,
        }
    }

    pub const fn from_id(id: u16) -> Option<Self> {
        match id {
            1 => Some(EventKind::Register),
            2 => Some(EventKind::Scheduled),
            3 => Some(EventKind::ComeToStartLine),
            4 => Some(EventKind::Start),
            5 => Some(EventKind::ComeToFiringRange),
            6 => Some(EventKind::HitTarget),
            7 => Some(EventKind::LeaveFiringRange),
            8 => Some(EventKind::EnterPenaltyLap),
            9 => Some(EventKind::LeavePenaltyLap),
            10 => Some(EventKind::EndMainLap),
            11 => Some(EventKind::CannotContinue),
            32 => Some(EventKind::Disqualify),
            33 => Some(EventKind::Finish),
            _ => None,
        }
    }

    /// `Disqualify` and `Finish` are synthesized by transition actions and
    /// must never be parsed out of the ingested event log.
    pub const fn is_derived_only(self) -> bool {
        matches!(self, EventKind::Disqualify | EventKind::Finish)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.id())
    }
}
