//! DOM Events
//!
//! Per-node listener registration with stable listener identity, on top of a
//! small synchronous emitter.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::NodeId;

/// Event delivered to listeners
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    pub event_type: String,
    /// Node the event was dispatched on (`NodeId::NONE` for window-level events)
    pub target: NodeId,
    /// Error message for `error` notifications
    pub error: Option<String>,
}

impl DomEvent {
    pub fn new(event_type: impl Into<String>, target: NodeId) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            error: None,
        }
    }

    /// Create an `error` notification
    pub fn error(target: NodeId, message: impl Into<String>) -> Self {
        Self {
            event_type: "error".to_string(),
            target,
            error: Some(message.into()),
        }
    }
}

/// Listener callback.
///
/// Identity is the underlying allocation: clones of one listener are the same
/// listener for add/remove purposes, two separately built closures never are.
#[derive(Clone)]
pub struct EventListener(Rc<dyn Fn(&DomEvent)>);

impl EventListener {
    pub fn new(f: impl Fn(&DomEvent) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Identity key of this listener
    pub fn key(&self) -> ListenerKey {
        ListenerKey(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn call(&self, event: &DomEvent) {
        (self.0)(event)
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventListener").field(&self.key()).finish()
    }
}

/// Address-based listener identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey(usize);

/// Opaque handle for one registration of one listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Synchronous event emitter
///
/// Listeners for a name are called in registration order.
#[derive(Debug, Default)]
pub struct EventEmitter {
    listeners: HashMap<String, Vec<(SubscriptionId, EventListener)>>,
    next_id: u64,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returning its subscription
    pub fn add_listener(&mut self, event_type: &str, listener: EventListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    /// Drop a subscription. Returns false if it was not active.
    pub fn remove_subscription(&mut self, event_type: &str, subscription: SubscriptionId) -> bool {
        let Some(list) = self.listeners.get_mut(event_type) else {
            return false;
        };
        let before = list.len();
        list.retain(|(id, _)| *id != subscription);
        let removed = list.len() != before;
        if list.is_empty() {
            self.listeners.remove(event_type);
        }
        removed
    }

    /// Deliver an event to every listener of its type. Returns the number called.
    pub fn emit(&self, event: &DomEvent) -> usize {
        // Snapshot so delivery order is fixed at emit time
        let snapshot = self.snapshot(&event.event_type);
        for listener in &snapshot {
            listener.call(event);
        }
        snapshot.len()
    }

    /// Listeners of `event_type` in delivery order
    pub fn snapshot(&self, event_type: &str) -> Vec<EventListener> {
        self.listeners
            .get(event_type)
            .map(|list| list.iter().map(|(_, l)| l.clone()).collect())
            .unwrap_or_default()
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.get(event_type).map_or(0, Vec::len)
    }
}

/// Per-node subscription bookkeeping
///
/// Maps `event name -> listener identity -> subscription`. A listener added
/// twice under one name keeps only its latest subscription.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    emitter: EventEmitter,
    subscriptions: HashMap<String, HashMap<ListenerKey, SubscriptionId>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event_listener(&mut self, event_type: &str, listener: EventListener) {
        let key = listener.key();
        let subscription = self.emitter.add_listener(event_type, listener);
        let previous = self
            .subscriptions
            .entry(event_type.to_string())
            .or_default()
            .insert(key, subscription);

        if let Some(previous) = previous {
            self.emitter.remove_subscription(event_type, previous);
        }
    }

    /// Detach a listener. Unknown listeners are ignored.
    pub fn remove_event_listener(&mut self, event_type: &str, listener: &EventListener) -> bool {
        let Some(subs) = self.subscriptions.get_mut(event_type) else {
            return false;
        };
        let Some(subscription) = subs.remove(&listener.key()) else {
            return false;
        };
        if subs.is_empty() {
            self.subscriptions.remove(event_type);
        }
        self.emitter.remove_subscription(event_type, subscription)
    }

    pub fn has_listener(&self, event_type: &str, listener: &EventListener) -> bool {
        self.subscriptions
            .get(event_type)
            .is_some_and(|subs| subs.contains_key(&listener.key()))
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.emitter.listener_count(event_type)
    }

    pub fn emit(&self, event: &DomEvent) -> usize {
        self.emitter.emit(event)
    }

    pub fn snapshot(&self, event_type: &str) -> Vec<EventListener> {
        self.emitter.snapshot(event_type)
    }
}
