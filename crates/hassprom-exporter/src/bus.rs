//! In-process event bus.
//!
//! - `subscribe(event_type, handler)` returns a [`Subscription`]; dropping it
//!   (or calling `unsubscribe`) removes the handler.
//! - `publish` runs matching handlers synchronously, in subscription order,
//!   one event at a time. Handlers must not publish on the same bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use dashmap::DashMap;
use tracing::debug;

use hassprom_core::model::{Event, EventType};

pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

struct Listener {
    event_type: EventType,
    handler: Handler,
}

struct BusInner {
    listeners: DashMap<u64, Listener>,
    seq: AtomicU64,
    dispatch: Mutex<()>,
}

#[derive(Clone)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BusInner {
                listeners: DashMap::new(),
                seq: AtomicU64::new(1),
                dispatch: Mutex::new(()),
            }),
        }
    }

    pub fn subscribe<F>(&self, event_type: EventType, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = self.inner.seq.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.insert(
            id,
            Listener {
                event_type,
                handler: Arc::new(handler),
            },
        );
        debug!(id, event_type = event_type.as_str(), "listener subscribed");
        Subscription {
            bus: Arc::downgrade(&self.inner),
            id,
            event_type,
        }
    }

    /// Run `f` with dispatch held, so it never interleaves with `publish`.
    pub fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        let _serial = self
            .inner
            .dispatch
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Deliver `event` to every listener of its type. Returns the number of
    /// handlers run.
    pub fn publish(&self, event: &Event) -> usize {
        self.exclusive(|| self.dispatch(event))
    }

    fn dispatch(&self, event: &Event) -> usize {
        let event_type = event.event_type();
        let mut targets: Vec<(u64, Handler)> = self
            .inner
            .listeners
            .iter()
            .filter(|e| e.value().event_type == event_type)
            .map(|e| (*e.key(), Arc::clone(&e.value().handler)))
            .collect();
        targets.sort_by_key(|(id, _)| *id);

        for (_, handler) in &targets {
            (**handler)(event);
        }
        targets.len()
    }

    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.inner
            .listeners
            .iter()
            .filter(|e| e.value().event_type == event_type)
            .count()
    }
}

/// Handle for one registered listener.
#[must_use = "dropping a Subscription unsubscribes the handler"]
pub struct Subscription {
    bus: Weak<BusInner>,
    id: u64,
    event_type: EventType,
}

impl Subscription {
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Remove the handler now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            if bus.listeners.remove(&self.id).is_some() {
                debug!(id = self.id, event_type = self.event_type.as_str(), "listener unsubscribed");
            }
        }
    }
}
