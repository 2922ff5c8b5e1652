// Event bus - typed publish/subscribe registry
//
// The single shared structure mediating all cross-component communication.
// Dispatch is synchronous and depth-first: every handler runs to completion
// before `dispatch` returns, and a handler is free to dispatch again (a
// controller reacting to `ProductAdded` by publishing `BasketChanged`), which
// runs its own handler chain to completion before the outer dispatch resumes.
//
// Re-entrancy is handled by iterating a snapshot of the subscriber list taken
// at dispatch time, so handlers may subscribe or unsubscribe mid-dispatch
// without corrupting the iteration. A handler registered during a dispatch is
// first invoked on the next dispatch; one removed during a dispatch still
// sees the current one.
//
// Deliberately absent:
// - panic isolation: a panicking handler unwinds out of `dispatch` and aborts
//   the remaining handlers for that event (programmer error, not a runtime
//   condition)
// - cycle detection: an event chain A -> B -> A recurses without a guard

use crate::events::{AppEvent, EventKind};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A subscribed handler. `Rc` identity doubles as the unsubscribe key.
pub type Handler = Rc<dyn Fn(&AppEvent)>;

/// Single-threaded publish/subscribe registry over the closed event catalog.
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<HashMap<EventKind, Vec<Handler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future dispatch of `kind`, after all
    /// handlers registered earlier. No de-duplication: subscribing the same
    /// handler twice registers it twice.
    pub fn subscribe(&self, kind: EventKind, handler: Handler) {
        self.subscribers
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(handler);
    }

    /// Remove every registration whose handler is identity-equal to
    /// `handler`. No-op if absent.
    pub fn unsubscribe(&self, kind: EventKind, handler: &Handler) {
        if let Some(handlers) = self.subscribers.borrow_mut().get_mut(&kind) {
            handlers.retain(|registered| !Rc::ptr_eq(registered, handler));
        }
    }

    /// Synchronously invoke every currently registered handler for the
    /// event's kind, in registration order.
    pub fn dispatch(&self, event: AppEvent) {
        let kind = event.kind();
        tracing::trace!(event = kind.name(), "dispatch");

        // Snapshot before invoking: the borrow must not be held while
        // handlers run, since handlers may dispatch or (un)subscribe.
        let snapshot: Vec<Handler> = self
            .subscribers
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        for handler in snapshot {
            handler(&event);
        }
    }
}
