//! The dispatcher's observer registry: at most one observer per event kind,
//! invoked synchronously after a transition commits. Grounded on the
//! `processor.Handle(...)` registration calls in the reference `main`
//! wiring, adapted from the teacher's broadcast-channel fan-out to a plain
//! at-most-one-per-kind map since there is exactly one downstream consumer
//! (the statistics aggregator) and no need for a second subscriber.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use biathlon_model::{CompetitorState, Event, EventKind};

/// Receives every event after its transition has committed. Observers must
/// not mutate dispatcher state; they only see the competitor record as it
/// stands once the transition has already been applied.
pub trait Observer {
    fn on_event(&mut self, event: &Event, state: &CompetitorState);
}

/// Maps each event kind to its single registered observer.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: HashMap<EventKind, Rc<RefCell<dyn Observer>>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer` for `kind`. Panics if `kind` already has an
    /// observer — registering two observers for the same kind is a
    /// programming error, not something to recover from at runtime.
    pub fn register(&mut self, kind: EventKind, observer: Rc<RefCell<dyn Observer>>) {
        if self.observers.insert(kind, observer).is_some() {
            panic!("duplicate observer registration for {kind:?}");
        }
    }

    pub fn notify(&self, event: &Event, state: &CompetitorState) {
        if let Some(observer) = self.observers.get(&event.kind) {
            observer.borrow_mut().on_event(event, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    struct Counter(u32);

    impl Observer for Counter {
        fn on_event(&mut self, _event: &Event, _state: &CompetitorState) {
            self.0 += 1;
        }
    }

    #[test]
    fn notify_only_fires_the_registered_kind() {
        let counter = Rc::new(RefCell::new(Counter(0)));
        let mut registry = ObserverRegistry::new();
        registry.register(EventKind::Register, counter.clone());

        let state = CompetitorState::new(1, 1);
        registry.notify(&Event::new(NaiveTime::MIN, EventKind::Register, 1), &state);
        registry.notify(&Event::new(NaiveTime::MIN, EventKind::Start, 1), &state);

        assert_eq!(counter.borrow().0, 1);
    }

    #[test]
    #[should_panic(expected = "duplicate observer registration")]
    fn registering_twice_for_the_same_kind_panics() {
        let a = Rc::new(RefCell::new(Counter(0)));
        let b = Rc::new(RefCell::new(Counter(0)));
        let mut registry = ObserverRegistry::new();
        registry.register(EventKind::Register, a);
        registry.register(EventKind::Register, b);
    }
}
