//! Per-competitor mutable race state, owned exclusively by the dispatcher
//! and mutated only by transition actions.
//!
//! This holds exactly the fields the state machine needs to make decisions
//! (status, the start-window timestamps, which ranges/targets have been
//! seen this race). Lap/penalty history, shot/hit counters, and the final
//! classification are a *separate* concern owned by the statistics
//! aggregator (`biathlon-stats`) — see the workspace `DESIGN.md` for why
//! this mirrors the reference implementation's two-struct split instead of
//! merging everything into one God struct.

use chrono::NaiveTime;

use crate::status::Status;

/// A closed or still-open timed interval: a lap or a penalty-loop visit.
/// Shared shape, owned by whichever component is tracking the interval
/// (the statistics aggregator, in this workspace).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimedInterval {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub duration_secs: Option<f64>,
    pub avg_speed: Option<f64>,
}

impl TimedInterval {
    pub fn opened(start: NaiveTime) -> Self {
        Self {
            start: Some(start),
            ..Default::default()
        }
    }

    pub fn close(&mut self, end: NaiveTime, course_length: f64) {
        self.end = Some(end);
        if let Some(start) = self.start {
            let duration = (end - start).num_milliseconds() as f64 / 1000.0;
            self.duration_secs = Some(duration);
            self.avg_speed = Some(course_length / duration);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }
}

/// Per-competitor mutable record, created on first `Register`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorState {
    pub id: u32,
    pub status: Status,
    pub scheduled_start: Option<NaiveTime>,
    pub actual_start: Option<NaiveTime>,
    /// 1-based; 0 before the competitor has started.
    pub current_lap: u32,
    /// `visited_ranges[i]` is true once `EnterFiringRange(i + 1)` has been seen.
    pub visited_ranges: Vec<bool>,
    /// Reset at the start of every new lap.
    pub hits_this_range: [bool; 5],
    /// The free-text reason carried by a `CannotContinue` event, recorded
    /// once the competitor can no longer continue.
    pub dnf_comment: Option<String>,
}

impl CompetitorState {
    pub fn new(id: u32, firing_lines: u32) -> Self {
        Self {
            id,
            status: Status::Unknown,
            scheduled_start: None,
            actual_start: None,
            current_lap: 0,
            visited_ranges: vec![false; firing_lines as usize],
            hits_this_range: [false; 5],
            dnf_comment: None,
        }
    }

    pub fn all_ranges_visited(&self) -> bool {
        self.visited_ranges.iter().all(|&v| v)
    }
}
