//! Observer connection lifecycle.
//!
//! A connection moves `Connected -> Disconnected` exactly once. Connecting
//! registers a fresh observer on the hub; disconnecting unregisters it. A
//! client that reconnects gets a new observer id and no backlog.

use std::sync::Arc;

use bazaar_db::{BroadcastHub, ChangeEvent, ObserverId, Subscription};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Opens and closes observer connections against one hub.
#[derive(Clone)]
pub struct ConnectionManager {
    hub: BroadcastHub,
}

impl ConnectionManager {
    pub fn new(hub: BroadcastHub) -> Self {
        Self { hub }
    }

    /// Transport handshake completed.
    pub fn connect(&self) -> Connection {
        let subscription = self.hub.register();
        let id = subscription.id();
        info!(
            observer = %id,
            observers = self.hub.observer_count(),
            "Observer connected"
        );
        Connection {
            id,
            state: ConnectionState::Connected,
            subscription,
            hub: self.hub.clone(),
        }
    }

    pub fn active(&self) -> usize {
        self.hub.observer_count()
    }
}

/// One live observer. Dropping it disconnects.
pub struct Connection {
    id: ObserverId,
    state: ConnectionState,
    subscription: Subscription,
    hub: BroadcastHub,
}

impl Connection {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Next event for this observer. `None` after disconnect once drained.
    pub async fn next_event(&mut self) -> Option<Arc<ChangeEvent>> {
        self.subscription.recv().await
    }

    /// Transport closed. Returns `false` if already disconnected.
    pub fn disconnect(&mut self) -> bool {
        if self.state == ConnectionState::Disconnected {
            return false;
        }
        self.state = ConnectionState::Disconnected;
        self.subscription.unsubscribe();
        info!(
            observer = %self.id,
            observers = self.hub.observer_count(),
            "Observer disconnected"
        );
        true
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.disconnect();
    }
}
