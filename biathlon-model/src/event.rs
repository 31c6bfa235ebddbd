//! The event value the engine operates on: a timestamp, a kind, a
//! competitor id, and a payload whose shape depends on the kind.

use chrono::NaiveTime;

use crate::status::EventKind;

/// The kind-dependent extra data carried by an event. Kinds not listed here
/// (`ComeToStartLine`, `Start`, `LeaveFiringRange`, `EnterPenaltyLap`,
/// `LeavePenaltyLap`, `EndMainLap`, `Disqualify`, `Finish`) carry `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// `Scheduled`: the start time-of-day assigned by the draw.
    ScheduledStart(NaiveTime),
    /// `EnterFiringRange`: the firing-line index, 1-based.
    FiringLine(u32),
    /// `HitTarget`: the target index, 1..=5.
    Target(u32),
    /// `CannotContinue`: a free-text reason.
    Comment(String),
}

/// A single line of the race log, already validated against its own shape
/// (but not yet against the state machine).
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub timestamp: NaiveTime,
    pub kind: EventKind,
    pub competitor_id: u32,
    pub payload: Option<EventPayload>,
}

impl Event {
    pub fn new(timestamp: NaiveTime, kind: EventKind, competitor_id: u32) -> Self {
        Self {
            timestamp,
            kind,
            competitor_id,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn scheduled_start(&self) -> Option<NaiveTime> {
        match &self.payload {
            Some(EventPayload::ScheduledStart(t)) => Some(*t),
            _ => None,
        }
    }

    pub fn firing_line(&self) -> Option<u32> {
        match &self.payload {
            Some(EventPayload::FiringLine(l)) => Some(*l),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<u32> {
        match &self.payload {
            Some(EventPayload::Target(t)) => Some(*t),
            _ => None,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match &self.payload {
            Some(EventPayload::Comment(c)) => Some(c.as_str()),
            _ => None,
        }
    }
}
