//! `Write`-backed implementations of `biathlon_engine::{TraceSink,
//! ErrorSink}`, grounded on the reference `logger.go`'s `DefaultLogger`
//! (wraps an `io.Writer`, one method per stream).

use std::io::Write;

use biathlon_engine::{ErrorSink, TraceSink};

pub struct WriterTraceSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterTraceSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TraceSink for WriterTraceSink<W> {
    fn trace(&mut self, line: &str) {
        if let Err(err) = writeln!(self.writer, "{line}") {
            tracing::warn!(%err, "failed to write trace line");
        }
    }
}

pub struct WriterErrorSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterErrorSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ErrorSink for WriterErrorSink<W> {
    fn error(&mut self, line: &str) {
        if let Err(err) = writeln!(self.writer, "{line}") {
            tracing::warn!(%err, "failed to write error line");
        }
    }
}
