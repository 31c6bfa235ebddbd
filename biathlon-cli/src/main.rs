//! CLI entry point (component H): `biathlon EVENTS_FILEPATH CONFIG_FILEPATH`.
//! Wires the event source adapter, dispatcher, and statistics aggregator
//! together, then renders the final report to stdout. Grounded on
//! `p3-parser/src/bin/p3-parser.rs` (`clap::Parser` derive, progress
//! messages on stderr) and `p3-server/src/main.rs`
//! (`tracing_subscriber::fmt::init()` at the top of `main`) — minus the
//! `#[tokio::main]` async runtime, since this tool has no I/O that benefits
//! from it.

mod sinks;
mod source;

use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;

use biathlon_engine::{Dispatcher, ObserverRegistry};
use biathlon_model::EventKind;
use biathlon_parser::parse_config;
use biathlon_stats::StatsAggregator;

use sinks::{WriterErrorSink, WriterTraceSink};
use source::EventSource;

/// Kinds the statistics aggregator observes. `ComeToStartLine` and
/// `LeaveFiringRange` carry no statistic of their own (per SPEC_FULL.md
/// §4.5) and are deliberately left unregistered.
const OBSERVED_KINDS: [EventKind; 11] = [
    EventKind::Register,
    EventKind::Scheduled,
    EventKind::Start,
    EventKind::ComeToFiringRange,
    EventKind::HitTarget,
    EventKind::EnterPenaltyLap,
    EventKind::LeavePenaltyLap,
    EventKind::EndMainLap,
    EventKind::CannotContinue,
    EventKind::Disqualify,
    EventKind::Finish,
];

#[derive(Parser)]
#[command(name = "biathlon")]
#[command(about = "Offline biathlon race event processor")]
struct Args {
    /// Path to the time-ordered event log.
    events: PathBuf,

    /// Path to the race configuration JSON file.
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config_bytes = std::fs::read(&args.config)
        .with_context(|| format!("failed to open config file {}", args.config.display()))?;
    let config = parse_config(&config_bytes).context("failed to parse race configuration")?;

    let events_file = File::open(&args.events)
        .with_context(|| format!("failed to open events file {}", args.events.display()))?;
    let mut source = EventSource::new(BufReader::new(events_file));

    let stdout = std::io::stdout();
    let mut trace_sink = WriterTraceSink::new(stdout.lock());
    let stderr = std::io::stderr();
    let mut error_sink = WriterErrorSink::new(stderr.lock());

    let aggregator = Rc::new(RefCell::new(StatsAggregator::new(config.clone())));
    let mut observers = ObserverRegistry::new();
    for kind in OBSERVED_KINDS {
        observers.register(kind, aggregator.clone());
    }

    let dispatcher = Dispatcher::new(config, observers, &mut trace_sink, &mut error_sink);
    let competitors = dispatcher.run(&mut source);
    tracing::info!(competitor_count = competitors.len(), "race processed");

    for err in &source.errors {
        error_sink.error(err);
    }

    let aggregator =
        Rc::try_unwrap(aggregator).unwrap_or_else(|_| panic!("aggregator outlived the run"));
    let stats = aggregator.into_inner().into_results();
    for row in biathlon_stats::build_report(&stats) {
        println!("{row}");
    }

    Ok(())
}
