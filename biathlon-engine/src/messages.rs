//! Renders the exact trace-log phrasing for each event kind. Wording is
//! taken verbatim from the reference implementation's message table,
//! including its backtick apostrophe in the `CannotContinue` line.

use biathlon_model::{Event, EventKind};

pub fn describe(event: &Event) -> String {
    let id = event.competitor_id;
    match event.kind {
        EventKind::Register => format!("The competitor({id}) registered"),
        EventKind::Scheduled => {
            let start = event.scheduled_start().expect("Scheduled event missing payload");
            format!(
                "The start time for the competitor({id}) was set by a draw to {}",
                start.format("%H:%M:%S%.3f")
            )
        }
        EventKind::ComeToStartLine => format!("The competitor({id}) is on the start line"),
        EventKind::Start => format!("The competitor({id}) has started"),
        EventKind::ComeToFiringRange => {
            let line = event.firing_line().expect("ComeToFiringRange event missing payload");
            format!("The competitor({id}) is on the firing range({line})")
        }
        EventKind::HitTarget => {
            let target = event.target().expect("HitTarget event missing payload");
            format!("The target({target}) has been hit by competitor({id})")
        }
        EventKind::LeaveFiringRange => format!("The competitor({id}) left the firing range"),
        EventKind::EnterPenaltyLap => format!("The competitor({id}) entered the penalty laps"),
        EventKind::LeavePenaltyLap => format!("The competitor({id}) left the penalty laps"),
        EventKind::EndMainLap => format!("The competitor({id}) ended the main lap"),
        EventKind::CannotContinue => {
            let comment = event.comment().unwrap_or_default();
            format!("The competitor({id}) can`t continue: {comment}")
        }
        EventKind::Disqualify => format!("The competitor({id}) is disqualified"),
        EventKind::Finish => format!("The competitor({id}) has finished"),
    }
}

/// The line written to the trace sink: `[HH:MM:SS.sss] <description>`.
pub fn trace_line(event: &Event) -> String {
    format!("[{}] {}", event.timestamp.format("%H:%M:%S%.3f"), describe(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use biathlon_model::EventPayload;
    use chrono::NaiveTime;

    #[test]
    fn register_message() {
        let e = Event::new(NaiveTime::MIN, EventKind::Register, 1);
        assert_eq!(describe(&e), "The competitor(1) registered");
    }

    #[test]
    fn cannot_continue_message_preserves_backtick_apostrophe() {
        let e = Event::new(NaiveTime::MIN, EventKind::CannotContinue, 1)
            .with_payload(EventPayload::Comment("Lost in the forest".to_string()));
        assert_eq!(describe(&e), "The competitor(1) can`t continue: Lost in the forest");
    }

    #[test]
    fn scheduled_message_keeps_millisecond_suffix_when_zero() {
        let e = Event::new(NaiveTime::MIN, EventKind::Scheduled, 1)
            .with_payload(EventPayload::ScheduledStart(NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
        assert_eq!(
            describe(&e),
            "The start time for the competitor(1) was set by a draw to 10:00:00.000"
        );
    }

    #[test]
    fn hit_target_message_orders_target_before_competitor() {
        let e = Event::new(NaiveTime::MIN, EventKind::HitTarget, 7).with_payload(EventPayload::Target(3));
        assert_eq!(describe(&e), "The target(3) has been hit by competitor(7)");
    }

    #[test]
    fn trace_line_formats_timestamp_with_milliseconds() {
        let e = Event::new(NaiveTime::from_hms_milli_opt(9, 5, 59, 867).unwrap(), EventKind::Register, 1);
        assert_eq!(trace_line(&e), "[09:05:59.867] The competitor(1) registered");
    }
}
