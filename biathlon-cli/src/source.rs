//! The event source adapter (component G): a lazy line-by-line reader over
//! the events file. Grounded on the reference `reader.go`'s line-oriented
//! scanner and the teacher's `p3-parser` file-to-iterator boundary — a
//! malformed line is recorded and skipped rather than aborting the run.

use std::io::BufRead;

use biathlon_model::Event;
use biathlon_parser::parse_event_line;

/// Yields one [`Event`] per well-formed non-blank line of the underlying
/// reader, in file order. Parse failures (and I/O errors reading a line)
/// are pushed onto `errors` and the offending line is skipped; they are not
/// surfaced through the iterator itself, since a single bad line must never
/// stop the run.
pub struct EventSource<R> {
    lines: std::io::Lines<R>,
    pub errors: Vec<String>,
}

impl<R: BufRead> EventSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            errors: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for EventSource<R> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    self.errors.push(format!("failed to read event line: {err}"));
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_event_line(&line) {
                Ok(event) => return Some(event),
                Err(err) => {
                    self.errors.push(format!("{err} (line: {line:?})"));
                    continue;
                }
            }
        }
    }
}
