//! The per-edge behaviour bound into the transition table. Each action is a
//! plain function over `(&Event, &mut CompetitorState, &Config)`, matching
//! the shape SPEC_FULL.md §9 asks for: no closures capturing config, no
//! hidden global state.

use biathlon_model::{CompetitorState, Config, Event, EventKind};

use crate::error::EngineError;

pub type ActionResult = Result<Vec<Event>, EngineError>;
pub type Action = fn(&Event, &mut CompetitorState, &Config) -> ActionResult;

fn disqualify_at(event: &Event, competitor_id: u32) -> Event {
    Event::new(event.timestamp, EventKind::Disqualify, competitor_id)
}

/// `Registered --Scheduled--> Scheduled`: store the draw-assigned start time.
pub fn set_scheduled_start(event: &Event, state: &mut CompetitorState, _config: &Config) -> ActionResult {
    state.scheduled_start = event.scheduled_start();
    Ok(vec![])
}

/// `Scheduled --ComeToStartLine--> OnStartLine`: late arrivals are
/// disqualified, but the line crossing itself always commits.
pub fn check_start_line_lateness(
    event: &Event,
    state: &mut CompetitorState,
    config: &Config,
) -> ActionResult {
    match state.scheduled_start {
        Some(scheduled) if event.timestamp > config.start_deadline(scheduled) => {
            Ok(vec![disqualify_at(event, event.competitor_id)])
        }
        _ => Ok(vec![]),
    }
}

/// `OnStartLine --Start--> OnMainLap`: late starts are disqualified;
/// otherwise record the real start time and open lap 1.
pub fn start_main_lap(event: &Event, state: &mut CompetitorState, config: &Config) -> ActionResult {
    match state.scheduled_start {
        Some(scheduled) if event.timestamp > config.start_deadline(scheduled) => {
            Ok(vec![disqualify_at(event, event.competitor_id)])
        }
        _ => {
            state.actual_start = Some(event.timestamp);
            state.current_lap = 1;
            Ok(vec![])
        }
    }
}

/// `OnMainLap --ComeToFiringRange--> OnRange`: validate the line index, then
/// disqualify on a repeat visit instead of rejecting the event outright.
pub fn enter_firing_range(event: &Event, state: &mut CompetitorState, _config: &Config) -> ActionResult {
    let line = event.firing_line().expect("ComeToFiringRange event missing payload");
    let idx = line as usize;
    if idx == 0 || idx > state.visited_ranges.len() {
        return Err(EngineError::InvalidFiringLine {
            line,
            firing_lines: state.visited_ranges.len() as u32,
        });
    }
    if state.visited_ranges[idx - 1] {
        return Ok(vec![disqualify_at(event, event.competitor_id)]);
    }
    state.visited_ranges[idx - 1] = true;
    state.hits_this_range = [false; 5];
    Ok(vec![])
}

/// `OnRange --HitTarget--> OnRange`: a second hit on the same target this
/// visit is a genuine error, not grounds for disqualification. The target
/// index is already validated to `1..=5` by the parser.
pub fn hit_target(event: &Event, state: &mut CompetitorState, _config: &Config) -> ActionResult {
    let target = event.target().expect("HitTarget event missing payload");
    let idx = (target - 1) as usize;
    if state.hits_this_range[idx] {
        return Err(EngineError::DuplicateTargetHit { target });
    }
    state.hits_this_range[idx] = true;
    Ok(vec![])
}

/// `OnMainLap --EndMainLap--> OnMainLap`: advance the lap counter, or
/// synthesize `Finish` once the configured lap count is reached.
pub fn end_main_lap(event: &Event, state: &mut CompetitorState, config: &Config) -> ActionResult {
    if state.current_lap < config.laps {
        state.current_lap += 1;
        state.hits_this_range = [false; 5];
        Ok(vec![])
    } else {
        Ok(vec![Event::new(event.timestamp, EventKind::Finish, event.competitor_id)])
    }
}

/// `--CannotContinue--> CannotContinue`: record the competitor's own reason
/// for dropping out, from every status the edge fires from.
pub fn record_comment(event: &Event, state: &mut CompetitorState, _config: &Config) -> ActionResult {
    state.dnf_comment = event.comment().map(str::to_string);
    Ok(vec![])
}

/// `OnMainLap --Finish--> Finished`: disqualify instead if any range was
/// never visited.
pub fn finish(event: &Event, state: &mut CompetitorState, _config: &Config) -> ActionResult {
    if state.all_ranges_visited() {
        Ok(vec![])
    } else {
        Ok(vec![disqualify_at(event, event.competitor_id)])
    }
}
