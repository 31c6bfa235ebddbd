//! The static transition table: `(Status, EventKind) -> (Status, Action?)`.
//! Sorted by construction (`BTreeMap` keyed on the pair) so lookup is
//! `O(log n)`, and built once via [`TransitionTable::new`], which panics on
//! a duplicate edge — a bug in this literal table, never in input data.

use std::collections::BTreeMap;

use biathlon_model::{EventKind, Status};

use crate::actions::{
    check_start_line_lateness, end_main_lap, enter_firing_range, finish, hit_target,
    record_comment, set_scheduled_start, start_main_lap, Action,
};

#[derive(Clone, Copy)]
pub struct TransitionRow {
    pub to: Status,
    pub action: Option<Action>,
}

pub struct TransitionTable {
    rows: BTreeMap<(Status, EventKind), TransitionRow>,
}

impl TransitionTable {
    pub fn new() -> Self {
        let mut rows = BTreeMap::new();
        let mut insert = |from: Status, kind: EventKind, to: Status, action: Option<Action>| {
            if rows
                .insert((from, kind), TransitionRow { to, action })
                .is_some()
            {
                panic!("duplicate transition table entry for ({from:?}, {kind:?})");
            }
        };

        use EventKind::*;
        use Status::*;

        insert(Unknown, Register, Registered, None);

        insert(Registered, Scheduled, Scheduled, Some(set_scheduled_start));
        insert(Registered, Disqualify, NotStarted, None);
        insert(Registered, CannotContinue, CannotContinue, Some(record_comment));

        insert(Scheduled, ComeToStartLine, OnStartLine, Some(check_start_line_lateness));
        insert(Scheduled, Disqualify, NotStarted, None);

        insert(OnStartLine, Start, OnMainLap, Some(start_main_lap));
        insert(OnStartLine, Disqualify, NotStarted, None);

        insert(OnMainLap, ComeToFiringRange, OnRange, Some(enter_firing_range));
        insert(OnMainLap, EnterPenaltyLap, OnPenaltyLap, None);
        insert(OnMainLap, EndMainLap, OnMainLap, Some(end_main_lap));
        insert(OnMainLap, Finish, Finished, Some(finish));
        insert(OnMainLap, Disqualify, Disqualified, None);
        insert(OnMainLap, CannotContinue, CannotContinue, Some(record_comment));

        insert(OnRange, HitTarget, OnRange, Some(hit_target));
        insert(OnRange, LeaveFiringRange, OnMainLap, None);
        insert(OnRange, Disqualify, Disqualified, None);
        insert(OnRange, CannotContinue, CannotContinue, Some(record_comment));

        insert(OnPenaltyLap, LeavePenaltyLap, OnMainLap, None);
        insert(OnPenaltyLap, Disqualify, Disqualified, None);
        insert(OnPenaltyLap, CannotContinue, CannotContinue, Some(record_comment));

        insert(Finished, Disqualify, Disqualified, None);

        Self { rows }
    }

    pub fn lookup(&self, from: Status, kind: EventKind) -> Option<&TransitionRow> {
        self.rows.get(&(from, kind))
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new()
    }
}
