//! Synchronous, typed event dispatch.
//!
//! Listeners subscribe to one concrete event type and run in registration
//! order on the dispatching thread. Every event carries a [`Stage`] and a
//! cancel flag; a listener that cancels is seen as cancelled by every listener
//! after it, and by the code that dispatched the event.

pub mod player;

use std::any::{Any, TypeId};
use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle for a registered listener, used to unsubscribe.
    pub struct ListenerId;
}

/// Which side of a hooked engine call an event is dispatched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Pre,
    Post,
}

/// Stage and cancellation bookkeeping shared by every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventState {
    stage: Stage,
    canceled: bool,
}

impl EventState {
    pub const fn new(stage: Stage) -> Self {
        Self {
            stage,
            canceled: false,
        }
    }
}

pub trait Event: Any {
    fn state(&self) -> &EventState;
    fn state_mut(&mut self) -> &mut EventState;

    fn stage(&self) -> Stage {
        self.state().stage
    }

    fn set_stage(&mut self, stage: Stage) {
        self.state_mut().stage = stage;
    }

    fn cancel(&mut self) {
        self.state_mut().canceled = true;
    }

    fn is_canceled(&self) -> bool {
        self.state().canceled
    }
}

type Handler = Box<dyn FnMut(&mut dyn Any)>;

struct Listener {
    event_name: &'static str,
    handler: Handler,
}

/// Registry of listeners keyed by event type.
#[derive(Default)]
pub struct EventBus {
    listeners: SlotMap<ListenerId, Listener>,
    by_type: HashMap<TypeId, Vec<ListenerId>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<E, F>(&mut self, mut handler: F) -> ListenerId
    where
        E: Event,
        F: FnMut(&mut E) + 'static,
    {
        let event_name = std::any::type_name::<E>();
        let id = self.listeners.insert(Listener {
            event_name,
            handler: Box::new(move |event: &mut dyn Any| {
                if let Some(event) = event.downcast_mut::<E>() {
                    handler(event);
                }
            }),
        });
        self.by_type.entry(TypeId::of::<E>()).or_default().push(id);
        tracing::debug!("Subscribed listener {:?} to {}", id, event_name);
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        for ids in self.by_type.values_mut() {
            ids.retain(|other| *other != id);
        }
        tracing::debug!("Unsubscribed listener {:?} from {}", id, listener.event_name);
        true
    }

    /// Run every listener for `E`, in registration order.
    pub fn dispatch<E: Event>(&mut self, event: &mut E) {
        let Some(ids) = self.by_type.get(&TypeId::of::<E>()) else {
            return;
        };
        for id in ids {
            if let Some(listener) = self.listeners.get_mut(*id) {
                (listener.handler)(&mut *event);
            }
        }
    }

    pub fn listener_count<E: Event>(&self) -> usize {
        self.by_type.get(&TypeId::of::<E>()).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Ping {
        state: EventState,
        hits: Vec<&'static str>,
    }

    impl Event for Ping {
        fn state(&self) -> &EventState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut EventState {
            &mut self.state
        }
    }

    struct Other {
        state: EventState,
    }

    impl Event for Other {
        fn state(&self) -> &EventState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut EventState {
            &mut self.state
        }
    }

    fn ping() -> Ping {
        Ping {
            state: EventState::new(Stage::Pre),
            hits: Vec::new(),
        }
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let mut bus = EventBus::new();
        bus.subscribe(|e: &mut Ping| e.hits.push("first"));
        bus.subscribe(|e: &mut Ping| e.hits.push("second"));
        bus.subscribe(|e: &mut Ping| e.hits.push("third"));

        let mut event = ping();
        bus.dispatch(&mut event);
        assert_eq!(event.hits, vec!["first", "second", "third"]);
    }

    #[test]
    fn later_listeners_see_cancellation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        bus.subscribe(|e: &mut Ping| e.cancel());
        let log = Rc::clone(&seen);
        bus.subscribe(move |e: &mut Ping| log.borrow_mut().push(e.is_canceled()));

        let mut event = ping();
        bus.dispatch(&mut event);
        assert!(event.is_canceled());
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn dispatch_is_keyed_by_type() {
        let mut bus = EventBus::new();
        bus.subscribe(|e: &mut Other| e.cancel());

        let mut event = ping();
        bus.dispatch(&mut event);
        assert!(!event.is_canceled());
        assert_eq!(bus.listener_count::<Other>(), 1);
        assert_eq!(bus.listener_count::<Ping>(), 0);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let mut bus = EventBus::new();
        let a = bus.subscribe(|e: &mut Ping| e.hits.push("a"));
        bus.subscribe(|e: &mut Ping| e.hits.push("b"));

        assert!(bus.unsubscribe(a));
        assert!(!bus.unsubscribe(a));

        let mut event = ping();
        bus.dispatch(&mut event);
        assert_eq!(event.hits, vec!["b"]);
    }
}
