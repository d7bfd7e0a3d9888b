//! Synchronous publish/subscribe bus keyed by case-insensitive event ids.
//!
//! Delivery happens inside [`EventManager::notify`], in registration order.
//! A panicking observer aborts delivery to the observers after it.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{Vec2, Vec3};
use parking_lot::RwLock;

use crate::string_key::to_lower;

/// Payload carried by an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    Int(i32),
    Float(f32),
    Bool(bool),
    Str(String),
    Vec2(Vec2),
    Vec3(Vec3),
}

impl From<i32> for EventData {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for EventData {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for EventData {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for EventData {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for EventData {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<Vec2> for EventData {
    fn from(value: Vec2) -> Self {
        Self::Vec2(value)
    }
}

impl From<Vec3> for EventData {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

/// Immutable notification; dispatched once and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub data: EventData,
}

impl Event {
    pub fn new(id: impl Into<String>, data: impl Into<EventData>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }
}

/// Receives events it subscribed to.
pub trait Observer {
    fn on_notify(&self, event: &Event);
}

type ObserverRef = Arc<dyn Observer>;

/// Subscription table from canonical event id to observers.
#[derive(Default)]
pub struct EventManager {
    observers: RwLock<HashMap<String, Vec<ObserverRef>>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `observer` to `id`. Subscribing twice delivers twice.
    pub fn add_observer(&self, id: &str, observer: ObserverRef) {
        self.observers
            .write()
            .entry(to_lower(id))
            .or_default()
            .push(observer);
    }

    /// Removes every subscription held by `observer`, pruning empty ids.
    pub fn remove_observer(&self, observer: &ObserverRef) {
        let target = Arc::as_ptr(observer) as *const ();
        self.observers.write().retain(|_, list| {
            list.retain(|candidate| Arc::as_ptr(candidate) as *const () != target);
            !list.is_empty()
        });
    }

    /// Delivers `event` to the observers of its id. Unknown ids are ignored.
    pub fn notify(&self, event: &Event) {
        // Snapshot so observers may (un)subscribe while being notified.
        let recipients = match self.observers.read().get(&to_lower(&event.id)) {
            Some(list) => list.clone(),
            None => return,
        };
        for observer in recipients {
            observer.on_notify(event);
        }
    }

    pub fn notify_data(&self, id: &str, data: impl Into<EventData>) {
        self.notify(&Event::new(id, data));
    }

    pub fn observer_count(&self, id: &str) -> usize {
        self.observers
            .read()
            .get(&to_lower(id))
            .map_or(0, Vec::len)
    }

    pub fn remove_all(&self) {
        self.observers.write().clear();
    }
}
