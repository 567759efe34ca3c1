//! Broadcast hub for real-time change notifications.
//!
//! Every registered observer owns a bounded queue. Publishing walks the
//! registry under one lock and `try_send`s into each queue, so the publisher
//! never waits on a slow observer and all observers see events in the same
//! global order. Delivery is at-most-once: a full queue drops the event for
//! that observer, and observers that register later get no backlog.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::event::ChangeEvent;

/// Sink for change events.
///
/// Write operations depend on this trait rather than on the concrete hub,
/// so tests can substitute [`RecordingPublisher`].
pub trait ChangePublisher: Send + Sync {
    /// Hand an event to the feed. Never fails and never blocks on observers.
    fn publish(&self, event: ChangeEvent);
}

/// Configuration for the broadcast hub.
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Events buffered per observer before new ones are dropped for it.
    pub observer_queue_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            observer_queue_capacity: 256,
        }
    }
}

/// Identity of one connected observer. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObserverId(Uuid);

impl ObserverId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type EventQueue = mpsc::Sender<Arc<ChangeEvent>>;

struct HubInner {
    observers: Mutex<HashMap<ObserverId, EventQueue>>,
    queue_capacity: usize,
    dropped: AtomicU64,
}

impl HubInner {
    fn unregister(&self, id: ObserverId) -> bool {
        let removed = self.observers.lock().remove(&id).is_some();
        if removed {
            debug!(observer = %id, "Observer unregistered");
        }
        removed
    }
}

/// Process-wide fan-out point. Cheap to clone; clones share one registry.
#[derive(Clone)]
pub struct BroadcastHub {
    inner: Arc<HubInner>,
}

impl BroadcastHub {
    pub fn new(config: BroadcastConfig) -> Self {
        Self {
            inner: Arc::new(HubInner {
                observers: Mutex::new(HashMap::new()),
                queue_capacity: config.observer_queue_capacity.max(1),
                dropped: AtomicU64::new(0),
            }),
        }
    }

    /// Add an observer. It receives every event published after this returns.
    pub fn register(&self) -> Subscription {
        let (tx, rx) = mpsc::channel(self.inner.queue_capacity);
        let id = ObserverId::new();
        self.inner.observers.lock().insert(id, tx);
        debug!(observer = %id, "Observer registered");

        Subscription {
            id,
            rx,
            hub: Arc::downgrade(&self.inner),
            unregistered: AtomicBool::new(false),
        }
    }

    /// Remove an observer. Returns `false` if it was already gone.
    pub fn unregister(&self, id: ObserverId) -> bool {
        self.inner.unregister(id)
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.lock().len()
    }

    /// Events dropped because an observer's queue was full.
    pub fn dropped_events(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }

    /// Enqueue `event` for every registered observer.
    ///
    /// Returns how many observers accepted it. Observers whose connection
    /// task has gone away are pruned on the way.
    pub fn fan_out(&self, event: ChangeEvent) -> usize {
        let event = Arc::new(event);
        let mut observers = self.inner.observers.lock();
        if observers.is_empty() {
            trace!(entity = %event.entity(), action = %event.action(), "No observers connected");
            return 0;
        }

        let mut delivered = 0;
        observers.retain(|id, tx| match tx.try_send(Arc::clone(&event)) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                self.inner.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    observer = %id,
                    entity = %event.entity(),
                    action = %event.action(),
                    "Observer queue full, dropping event"
                );
                true
            }
            Err(TrySendError::Closed(_)) => {
                debug!(observer = %id, "Observer queue closed, pruning");
                false
            }
        });

        trace!(
            entity = %event.entity(),
            action = %event.action(),
            delivered,
            "Change event fanned out"
        );
        delivered
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(BroadcastConfig::default())
    }
}

impl ChangePublisher for BroadcastHub {
    fn publish(&self, event: ChangeEvent) {
        self.fan_out(event);
    }
}

/// Receiving end of one observer registration.
///
/// Dropping the subscription unregisters the observer.
pub struct Subscription {
    id: ObserverId,
    rx: mpsc::Receiver<Arc<ChangeEvent>>,
    hub: Weak<HubInner>,
    unregistered: AtomicBool,
}

impl Subscription {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Next queued event. `None` once unregistered and drained.
    pub async fn recv(&mut self) -> Option<Arc<ChangeEvent>> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Arc<ChangeEvent>> {
        self.rx.try_recv().ok()
    }

    /// Leave the hub. Idempotent; returns `true` only on the call that
    /// actually removed the observer.
    pub fn unsubscribe(&self) -> bool {
        if self.unregistered.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.hub
            .upgrade()
            .map(|hub| hub.unregister(self.id))
            .unwrap_or(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Publisher that keeps every event in memory.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<ChangeEvent>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ChangePublisher for RecordingPublisher {
    fn publish(&self, event: ChangeEvent) {
        self.events.lock().push(event);
    }
}
