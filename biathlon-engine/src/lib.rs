//! The per-competitor state machine and the single-threaded event
//! dispatcher that drives it: the static transition table, the actions
//! bound to each edge, the FIFO queue that interleaves ingested and derived
//! events, and the observer registry the statistics aggregator hooks into.

pub mod actions;
pub mod dispatcher;
pub mod error;
pub mod messages;
pub mod observer;
pub mod sinks;
pub mod transitions;

pub use dispatcher::Dispatcher;
pub use error::EngineError;
pub use observer::{Observer, ObserverRegistry};
pub use sinks::{ErrorSink, NullSink, TraceSink};
pub use transitions::{TransitionRow, TransitionTable};
