//! Tokenizes one line of the event log:
//! `[HH:MM:SS.sss] KIND_ID COMPETITOR_ID [EXTRA]`.
//!
//! The wire format is whitespace-delimited text, not JSON, so this is a hand
//! tokenizer rather than a `serde` deserializer — grounded on the same
//! "split, validate each field, build the struct" shape as a TLV decoder.

use biathlon_model::{Event, EventKind, EventPayload};

use crate::error::{ParseError, ParseResult};
use crate::time::{parse_bracketed_time, parse_time_of_day};

pub fn parse_event_line(line: &str) -> ParseResult<Event> {
    let mut fields = line.split_whitespace();

    let raw_time = fields.next().ok_or(ParseError::MissingField("timestamp"))?;
    let timestamp = parse_bracketed_time(raw_time)?;

    let raw_kind = fields.next().ok_or(ParseError::MissingField("kind"))?;
    let kind_id: u16 = raw_kind.parse()?;
    let kind = EventKind::from_id(kind_id).ok_or(ParseError::UnknownEventKind(kind_id))?;
    if kind.is_derived_only() {
        return Err(ParseError::DerivedOnlyKind(kind_id));
    }

    let raw_competitor = fields
        .next()
        .ok_or(ParseError::MissingField("competitor_id"))?;
    let competitor_id: u32 = raw_competitor.parse()?;

    let mut event = Event::new(timestamp, kind, competitor_id);

    match kind {
        EventKind::Scheduled => {
            let raw_start = fields
                .next()
                .ok_or(ParseError::MissingField("scheduled_start"))?;
            let start = parse_time_of_day(raw_start)?;
            event = event.with_payload(EventPayload::ScheduledStart(start));
        }
        EventKind::ComeToFiringRange => {
            let raw_line = fields.next().ok_or(ParseError::MissingField("firing_line"))?;
            let line: u32 = raw_line.parse()?;
            event = event.with_payload(EventPayload::FiringLine(line));
        }
        EventKind::HitTarget => {
            let raw_target = fields.next().ok_or(ParseError::MissingField("target"))?;
            let target: u32 = raw_target.parse()?;
            if !(1..=5).contains(&target) {
                return Err(ParseError::BadEventLine(format!(
                    "target {target} out of range 1..=5"
                )));
            }
            event = event.with_payload(EventPayload::Target(target));
        }
        EventKind::CannotContinue => {
            let comment: Vec<&str> = fields.collect();
            if comment.is_empty() {
                return Err(ParseError::MissingField("comment"));
            }
            event = event.with_payload(EventPayload::Comment(comment.join(" ")));
        }
        _ => {}
    }

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn parses_register() {
        let e = parse_event_line("[09:05:59.867] 1 1").unwrap();
        assert_eq!(e.kind, EventKind::Register);
        assert_eq!(e.competitor_id, 1);
        assert_eq!(
            e.timestamp,
            NaiveTime::from_hms_milli_opt(9, 5, 59, 867).unwrap()
        );
    }

    #[test]
    fn parses_scheduled_with_time_payload() {
        let e = parse_event_line("[09:15:00.841] 2 1 09:30:00.000").unwrap();
        assert_eq!(e.kind, EventKind::Scheduled);
        assert_eq!(
            e.scheduled_start(),
            Some(NaiveTime::from_hms_milli_opt(9, 30, 0, 0).unwrap())
        );
    }

    #[test]
    fn parses_firing_range_index() {
        let e = parse_event_line("[09:49:31.659] 5 1 1").unwrap();
        assert_eq!(e.firing_line(), Some(1));
    }

    #[test]
    fn parses_hit_target_and_rejects_out_of_range() {
        let e = parse_event_line("[09:49:33.123] 6 1 3").unwrap();
        assert_eq!(e.target(), Some(3));
        assert!(parse_event_line("[09:49:33.123] 6 1 6").is_err());
        assert!(parse_event_line("[09:49:33.123] 6 1 0").is_err());
    }

    #[test]
    fn parses_free_text_comment_with_spaces() {
        let e = parse_event_line("[09:49:35.000] 11 1 Injured knee, can't feel legs").unwrap();
        assert_eq!(e.comment(), Some("Injured knee, can't feel legs"));
    }

    #[test]
    fn rejects_derived_only_kinds_from_the_log() {
        assert!(matches!(
            parse_event_line("[09:49:35.000] 32 1"),
            Err(ParseError::DerivedOnlyKind(32))
        ));
        assert!(matches!(
            parse_event_line("[09:49:35.000] 33 1"),
            Err(ParseError::DerivedOnlyKind(33))
        ));
    }

    #[test]
    fn rejects_unknown_kind_id() {
        assert!(matches!(
            parse_event_line("[09:49:35.000] 99 1"),
            Err(ParseError::UnknownEventKind(99))
        ));
    }

    #[test]
    fn rejects_truncated_line() {
        assert!(parse_event_line("[09:49:35.000] 1").is_err());
        assert!(parse_event_line("").is_err());
    }
}
