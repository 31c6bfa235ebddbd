//! The FIFO event loop that drives every competitor through the transition
//! table, grounded on the reference `processor.go`'s `Start`/`processEvent`
//! queue-draining loop and on the teacher's `RaceEngine::process_passing`
//! for the "mutate state, collect derived events, broadcast" shape.

use std::collections::{HashMap, VecDeque};

use biathlon_model::{CompetitorState, Config, Event, EventKind};
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::messages::trace_line;
use crate::observer::ObserverRegistry;
use crate::sinks::{ErrorSink, TraceSink};
use crate::transitions::TransitionTable;

pub struct Dispatcher<'a> {
    config: Config,
    transitions: TransitionTable,
    observers: ObserverRegistry,
    competitors: HashMap<u32, CompetitorState>,
    queue: VecDeque<Event>,
    last_timestamp: Option<chrono::NaiveTime>,
    trace_sink: &'a mut dyn TraceSink,
    error_sink: &'a mut dyn ErrorSink,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        config: Config,
        observers: ObserverRegistry,
        trace_sink: &'a mut dyn TraceSink,
        error_sink: &'a mut dyn ErrorSink,
    ) -> Self {
        Self {
            config,
            transitions: TransitionTable::new(),
            observers,
            competitors: HashMap::new(),
            queue: VecDeque::new(),
            last_timestamp: None,
            trace_sink,
            error_sink,
        }
    }

    /// Drains `source` through the dispatcher, then finalizes every
    /// competitor still mid-race. Returns the final competitor map so the
    /// caller (the aggregator's owner) can inspect terminal statuses.
    pub fn run(mut self, source: impl IntoIterator<Item = Event>) -> HashMap<u32, CompetitorState> {
        let mut source = source.into_iter();
        loop {
            if self.queue.is_empty() {
                match source.next() {
                    Some(event) => self.queue.push_back(event),
                    None => break,
                }
            }
            let event = self.queue.pop_front().expect("queue checked non-empty above");
            self.dispatch(event);
        }
        self.finalize();
        self.competitors
    }

    fn dispatch(&mut self, event: Event) {
        self.last_timestamp = Some(event.timestamp);

        let firing_lines = self.config.firing_lines;
        // Look up the transition against the *current* status before
        // touching the map: a competitor id that has never produced a
        // successful transition must not gain a map entry just because some
        // invalid event mentioned it, or it would be stuck forever in
        // `Unknown` — a status finalization has no `Disqualify` edge out of.
        let existing_status = self
            .competitors
            .get(&event.competitor_id)
            .map(|c| c.status)
            .unwrap_or_default();

        let Some(row) = self.transitions.lookup(existing_status, event.kind) else {
            let err = EngineError::WrongSequence {
                status: existing_status,
                kind: event.kind,
            };
            warn!(competitor_id = event.competitor_id, %err, "dropping event");
            self.error_sink.error(&format!("[{}] {err}", event.timestamp));
            return;
        };
        let to = row.to;
        let action = row.action;

        let competitor = self
            .competitors
            .entry(event.competitor_id)
            .or_insert_with(|| CompetitorState::new(event.competitor_id, firing_lines));

        let derived = if let Some(action) = action {
            let mut working = competitor.clone();
            match action(&event, &mut working, &self.config) {
                Ok(derived) => {
                    *self.competitors.get_mut(&event.competitor_id).unwrap() = working;
                    derived
                }
                Err(err) => {
                    warn!(competitor_id = event.competitor_id, %err, "action rejected event");
                    self.error_sink.error(&format!("[{}] {err}", event.timestamp));
                    return;
                }
            }
        } else {
            Vec::new()
        };

        self.competitors.get_mut(&event.competitor_id).unwrap().status = to;
        for derived_event in derived {
            self.queue.push_back(derived_event);
        }

        self.trace_sink.trace(&trace_line(&event));
        debug!(competitor_id = event.competitor_id, kind = %event.kind, to = %to, "transitioned");
        let committed = &self.competitors[&event.competitor_id];
        self.observers.notify(&event, committed);
    }

    /// Disqualifies every competitor left mid-race once the source is
    /// drained, at the timestamp of the last event this run ever saw.
    fn finalize(&mut self) {
        let Some(timestamp) = self.last_timestamp else {
            return;
        };
        let stragglers: Vec<u32> = self
            .competitors
            .iter()
            .filter(|(_, c)| !c.status.is_terminal())
            .map(|(id, _)| *id)
            .collect();
        for id in stragglers {
            self.dispatch(Event::new(timestamp, EventKind::Disqualify, id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biathlon_model::{EventPayload, Status};
    use chrono::NaiveTime;

    fn config() -> Config {
        Config {
            laps: 2,
            lap_length: 3651.0,
            penalty_length: 50.0,
            firing_lines: 1,
            nominal_start: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            start_delta_secs: 30.0,
        }
    }

    fn t(h: u32, m: u32, s: u32, milli: u32) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(h, m, s, milli).unwrap()
    }

    #[test]
    fn happy_path_reaches_finished() {
        let mut trace = crate::sinks::NullSink;
        let mut errors = crate::sinks::NullSink;
        let dispatcher = Dispatcher::new(config(), ObserverRegistry::new(), &mut trace, &mut errors);

        let events = vec![
            Event::new(t(9, 5, 59, 867), EventKind::Register, 1),
            Event::new(t(9, 15, 0, 841), EventKind::Scheduled, 1)
                .with_payload(EventPayload::ScheduledStart(t(9, 30, 0, 0))),
            Event::new(t(9, 29, 45, 0), EventKind::ComeToStartLine, 1),
            Event::new(t(9, 30, 1, 5), EventKind::Start, 1),
            Event::new(t(9, 49, 31, 659), EventKind::ComeToFiringRange, 1)
                .with_payload(EventPayload::FiringLine(1)),
            Event::new(t(9, 49, 33, 123), EventKind::HitTarget, 1).with_payload(EventPayload::Target(1)),
            Event::new(t(9, 49, 34, 0), EventKind::LeaveFiringRange, 1),
            Event::new(t(9, 49, 35, 0), EventKind::EndMainLap, 1),
            Event::new(t(10, 8, 0, 0), EventKind::EndMainLap, 1),
        ];

        let result = dispatcher.run(events);
        assert_eq!(result[&1].status, Status::Finished);
    }

    #[test]
    fn late_start_disqualifies_before_any_lap_is_opened() {
        let mut trace = crate::sinks::NullSink;
        let mut errors = crate::sinks::NullSink;
        let dispatcher = Dispatcher::new(config(), ObserverRegistry::new(), &mut trace, &mut errors);

        let events = vec![
            Event::new(t(9, 0, 0, 0), EventKind::Register, 1),
            Event::new(t(9, 1, 0, 0), EventKind::Scheduled, 1)
                .with_payload(EventPayload::ScheduledStart(t(9, 30, 0, 0))),
            Event::new(t(9, 29, 45, 0), EventKind::ComeToStartLine, 1),
            Event::new(t(9, 30, 31, 0), EventKind::Start, 1),
        ];

        let result = dispatcher.run(events);
        assert_eq!(result[&1].status, Status::NotStarted);
    }

    #[test]
    fn finalization_disqualifies_competitors_still_mid_race() {
        let mut trace = crate::sinks::NullSink;
        let mut errors = crate::sinks::NullSink;
        let dispatcher = Dispatcher::new(config(), ObserverRegistry::new(), &mut trace, &mut errors);

        let events = vec![
            Event::new(t(9, 0, 0, 0), EventKind::Register, 2),
            Event::new(t(9, 1, 0, 0), EventKind::Scheduled, 2)
                .with_payload(EventPayload::ScheduledStart(t(9, 30, 0, 0))),
            Event::new(t(9, 29, 45, 0), EventKind::ComeToStartLine, 2),
            Event::new(t(9, 30, 1, 0), EventKind::Start, 2),
        ];

        let result = dispatcher.run(events);
        assert_eq!(result[&2].status, Status::Disqualified);
    }

    #[test]
    fn unknown_transition_is_dropped_without_panicking() {
        let mut trace = crate::sinks::NullSink;
        let mut errors = crate::sinks::NullSink;
        let dispatcher = Dispatcher::new(config(), ObserverRegistry::new(), &mut trace, &mut errors);

        let events = vec![Event::new(t(9, 0, 0, 0), EventKind::Start, 5)];
        let result = dispatcher.run(events);
        assert!(!result.contains_key(&5));
    }

    #[test]
    fn a_competitor_id_only_seen_in_invalid_events_never_enters_the_map() {
        let mut trace = crate::sinks::NullSink;
        let mut errors = crate::sinks::NullSink;
        let dispatcher = Dispatcher::new(config(), ObserverRegistry::new(), &mut trace, &mut errors);

        let events = vec![
            Event::new(t(9, 0, 0, 0), EventKind::HitTarget, 9)
                .with_payload(EventPayload::Target(1)),
            Event::new(t(9, 0, 1, 0), EventKind::EndMainLap, 9),
        ];
        let result = dispatcher.run(events);
        assert!(result.is_empty());
    }
}
