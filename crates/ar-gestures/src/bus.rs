//! Listener registry for gesture events.
//!
//! Listeners subscribe per [`GestureKind`] and receive a mutable context along
//! with the event, so the host can route gestures into its own state without
//! shared ownership. Listeners for one kind run in subscription order.

use std::collections::HashMap;

use crate::event::{GestureEvent, GestureKind};

/// Boxed gesture listener receiving the dispatch context.
pub type GestureHandler<C> = Box<dyn FnMut(&mut C, &GestureEvent)>;

/// Identifies a subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry mapping gesture kinds to ordered listener lists.
pub struct GestureBus<C> {
    listeners: HashMap<GestureKind, Vec<(ListenerId, GestureHandler<C>)>>,
    next_id: u64,
}

impl<C> GestureBus<C> {
    /// Creates a new empty bus.
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    /// Subscribes a listener to one gesture kind.
    ///
    /// The listener runs after every listener already subscribed to `kind`.
    pub fn subscribe<F>(&mut self, kind: GestureKind, handler: F) -> ListenerId
    where
        F: FnMut(&mut C, &GestureEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Removes a listener.
    ///
    /// Returns false if the listener was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for list in self.listeners.values_mut() {
            if let Some(pos) = list.iter().position(|(listener, _)| *listener == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Returns the number of listeners subscribed to `kind`.
    pub fn listener_count(&self, kind: GestureKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Returns true if no listeners are subscribed.
    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }

    /// Delivers an event to every listener of its kind.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&mut self, ctx: &mut C, event: &GestureEvent) -> usize {
        let Some(list) = self.listeners.get_mut(&event.kind()) else {
            return 0;
        };
        for (_, handler) in list.iter_mut() {
            handler(ctx, event);
        }
        list.len()
    }
}

impl<C> Default for GestureBus<C> {
    fn default() -> Self {
        Self::new()
    }
}
