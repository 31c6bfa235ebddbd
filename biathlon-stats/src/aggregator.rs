//! The statistics aggregator: one `Observer` implementation registered for
//! every incoming and derived event kind, grounded on
//! `internal/statistics/statistics.go`'s `OnXxx` handlers (one method per
//! event kind, each reading-modifying-writing a per-competitor record) —
//! translated here into match arms over a single `on_event`, since Rust's
//! `Observer` trait has one entry point rather than Go's per-kind methods.

use std::collections::HashMap;

use biathlon_engine::Observer;
use biathlon_model::{CompetitorState, Config, Event, EventKind, TimedInterval};
use chrono::NaiveTime;

/// The terminal classification for a competitor who never finished. A
/// finished competitor's result is the rendered total time instead — see
/// [`CompetitorStats::finish_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NotStarted,
    NotFinished,
    Disqualified,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Classification::NotStarted => "NotStarted",
            Classification::NotFinished => "NotFinished",
            Classification::Disqualified => "Disqualified",
        }
    }
}

/// Per-competitor aggregate built from the validated event stream. Distinct
/// from `biathlon_model::CompetitorState`: that one holds only what the
/// state machine needs to make decisions, this one holds everything the
/// final report renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitorStats {
    pub id: u32,
    pub scheduled_start: Option<NaiveTime>,
    pub laps: Vec<TimedInterval>,
    pub penalties: Vec<TimedInterval>,
    pub total_hits: u32,
    pub total_shots: u32,
    pub finish_time: Option<NaiveTime>,
    pub classification: Option<Classification>,
    /// The free-text reason the competitor gave for dropping out, if any.
    pub dnf_comment: Option<String>,
}

impl CompetitorStats {
    fn new(id: u32) -> Self {
        Self {
            id,
            scheduled_start: None,
            laps: Vec::new(),
            penalties: Vec::new(),
            total_hits: 0,
            total_shots: 0,
            finish_time: None,
            classification: None,
            dnf_comment: None,
        }
    }

    /// The competitor's total race time: `finish_time - actual_start`,
    /// where `actual_start` is the opening timestamp of the first lap.
    /// `None` unless the competitor actually finished.
    pub fn total_time_secs(&self) -> Option<f64> {
        let finish = self.finish_time?;
        let start = self.laps.first()?.start?;
        Some((finish - start).num_milliseconds() as f64 / 1000.0)
    }
}

pub struct StatsAggregator {
    config: Config,
    competitors: HashMap<u32, CompetitorStats>,
}

impl StatsAggregator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            competitors: HashMap::new(),
        }
    }

    /// Consumes the aggregator, returning every competitor it ever saw, in
    /// no particular order (the report renderer is responsible for sorting).
    pub fn into_results(self) -> Vec<CompetitorStats> {
        self.competitors.into_values().collect()
    }
}

impl Observer for StatsAggregator {
    fn on_event(&mut self, event: &Event, state: &CompetitorState) {
        let stat = self
            .competitors
            .entry(event.competitor_id)
            .or_insert_with(|| CompetitorStats::new(event.competitor_id));

        match event.kind {
            EventKind::Register => {}
            EventKind::Scheduled => {
                stat.scheduled_start = event.scheduled_start();
            }
            EventKind::Start => {
                stat.laps.push(TimedInterval::opened(event.timestamp));
            }
            EventKind::ComeToFiringRange => {
                stat.total_shots += 5;
            }
            EventKind::HitTarget => {
                stat.total_hits += 1;
            }
            EventKind::EnterPenaltyLap => {
                stat.penalties.push(TimedInterval::opened(event.timestamp));
            }
            EventKind::LeavePenaltyLap => {
                if let Some(penalty) = stat.penalties.last_mut() {
                    penalty.close(event.timestamp, self.config.penalty_length);
                }
            }
            EventKind::EndMainLap => {
                if let Some(lap) = stat.laps.last_mut() {
                    lap.close(event.timestamp, self.config.lap_length);
                }
                if stat.laps.len() < self.config.laps as usize {
                    stat.laps.push(TimedInterval::opened(event.timestamp));
                }
            }
            EventKind::CannotContinue => {
                stat.classification = Some(Classification::NotFinished);
                stat.dnf_comment = state.dnf_comment.clone();
            }
            EventKind::Disqualify => {
                stat.classification = Some(if stat.laps.is_empty() {
                    Classification::NotStarted
                } else {
                    Classification::Disqualified
                });
            }
            EventKind::Finish => {
                stat.finish_time = Some(event.timestamp);
            }
            EventKind::ComeToStartLine | EventKind::LeaveFiringRange => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biathlon_model::{CompetitorState, EventPayload};

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

    fn fire(agg: &mut StatsAggregator, event: Event) {
        let dummy = CompetitorState::new(event.competitor_id, 1);
        agg.on_event(&event, &dummy);
    }

    fn fire_with_state(agg: &mut StatsAggregator, event: Event, state: &CompetitorState) {
        agg.on_event(&event, state);
    }

    fn t(h: u32, m: u32, s: u32, milli: u32) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(h, m, s, milli).unwrap()
    }

    #[test]
    fn happy_path_closes_exactly_configured_lap_count() {
        let mut agg = StatsAggregator::new(config());
        fire(&mut agg, Event::new(t(9, 30, 1, 5), EventKind::Start, 1));
        fire(&mut agg, Event::new(t(9, 49, 35, 0), EventKind::EndMainLap, 1));
        fire(&mut agg, Event::new(t(10, 8, 0, 0), EventKind::EndMainLap, 1));
        fire(&mut agg, Event::new(t(10, 8, 0, 0), EventKind::Finish, 1));

        let results = agg.into_results();
        let stat = &results[0];
        assert_eq!(stat.laps.len(), 2);
        assert!(stat.laps.iter().all(|l| l.is_closed()));
        assert_eq!(stat.finish_time, Some(t(10, 8, 0, 0)));
        assert!((stat.total_time_secs().unwrap() - 2278.995).abs() < 1e-6);
    }

    #[test]
    fn disqualify_before_any_lap_started_is_not_started() {
        let mut agg = StatsAggregator::new(config());
        fire(&mut agg, Event::new(t(9, 30, 31, 0), EventKind::Disqualify, 1));
        let results = agg.into_results();
        assert_eq!(results[0].classification, Some(Classification::NotStarted));
    }

    #[test]
    fn disqualify_after_a_lap_started_is_disqualified() {
        let mut agg = StatsAggregator::new(config());
        fire(&mut agg, Event::new(t(9, 30, 1, 0), EventKind::Start, 1));
        fire(&mut agg, Event::new(t(9, 45, 0, 0), EventKind::Disqualify, 1));
        let results = agg.into_results();
        assert_eq!(results[0].classification, Some(Classification::Disqualified));
    }

    #[test]
    fn cannot_continue_is_not_finished() {
        let mut agg = StatsAggregator::new(config());
        fire(&mut agg, Event::new(t(9, 30, 1, 0), EventKind::Start, 1));
        fire(
            &mut agg,
            Event::new(t(9, 45, 0, 0), EventKind::CannotContinue, 1)
                .with_payload(EventPayload::Comment("Injured knee".to_string())),
        );
        let results = agg.into_results();
        assert_eq!(results[0].classification, Some(Classification::NotFinished));
    }

    #[test]
    fn cannot_continue_captures_the_committed_dnf_comment() {
        let mut agg = StatsAggregator::new(config());
        let mut committed = CompetitorState::new(1, 1);
        committed.dnf_comment = Some("Injured knee".to_string());
        fire_with_state(
            &mut agg,
            Event::new(t(9, 45, 0, 0), EventKind::CannotContinue, 1)
                .with_payload(EventPayload::Comment("Injured knee".to_string())),
            &committed,
        );
        let results = agg.into_results();
        assert_eq!(results[0].dnf_comment.as_deref(), Some("Injured knee"));
    }

    #[test]
    fn penalty_lap_duration_and_avg_speed_use_entry_to_exit() {
        let mut agg = StatsAggregator::new(config());
        fire(&mut agg, Event::new(t(9, 50, 0, 0), EventKind::EnterPenaltyLap, 1));
        fire(&mut agg, Event::new(t(9, 50, 50, 0), EventKind::LeavePenaltyLap, 1));
        let results = agg.into_results();
        let penalty = &results[0].penalties[0];
        assert_eq!(penalty.duration_secs, Some(50.0));
        assert_eq!(penalty.avg_speed, Some(1.0));
    }

    #[test]
    fn shots_accumulate_five_per_range_visit() {
        let mut agg = StatsAggregator::new(config());
        fire(&mut agg, Event::new(t(9, 49, 31, 0), EventKind::ComeToFiringRange, 1));
        fire(&mut agg, Event::new(t(9, 58, 31, 0), EventKind::ComeToFiringRange, 1));
        let results = agg.into_results();
        assert_eq!(results[0].total_shots, 10);
    }
}
