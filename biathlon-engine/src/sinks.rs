//! The two log-sink traits the dispatcher writes through. Defined here (not
//! in the CLI crate) because the dispatcher is the component that produces
//! both kinds of line; `biathlon-cli` only supplies the `Write`-backed
//! implementations, mirroring the reference `Logger` interface split from
//! its concrete `DefaultLogger`.

/// The user-facing domain transcript: one line per accepted event, in the
/// exact phrasing fixed by the external trace-log contract.
pub trait TraceSink {
    fn trace(&mut self, line: &str);
}

/// Processor-level anomalies: rejected transitions, parse errors forwarded
/// from the adapter.
pub trait ErrorSink {
    fn error(&mut self, line: &str);
}

/// A sink that discards everything. Useful in tests and as a default when a
/// caller only cares about one of the two streams.
#[derive(Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn trace(&mut self, _line: &str) {}
}

impl ErrorSink for NullSink {
    fn error(&mut self, _line: &str) {}
}
