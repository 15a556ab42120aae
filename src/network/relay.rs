//! Snapshot Fan-Out
//!
//! The set of live relay connections. Every line that enters the relay,
//! whether from a peer or from the local publisher, is pushed to each
//! connection's outbound queue except the one it came from.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;
use uuid::Uuid;

/// Identifier of one relay connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a relayed line came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// The local player's publisher
    Local,
    /// A peer connection
    Peer(ConnectionId),
}

/// Outbound queue of a connection. Lines carry no trailing newline.
pub type LineReceiver = mpsc::Receiver<Arc<str>>;

/// The fan-out set.
pub struct RelayHub {
    connections: RwLock<BTreeMap<ConnectionId, mpsc::Sender<Arc<str>>>>,
    queue_capacity: usize,
}

impl RelayHub {
    /// Create an empty hub whose connections buffer up to `queue_capacity` lines.
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            connections: RwLock::new(BTreeMap::new()),
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Add a connection to the fan-out set.
    pub async fn register(&self) -> (ConnectionId, LineReceiver) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        self.connections.write().await.insert(id, tx);
        (id, rx)
    }

    /// Drop a connection. Returns false if it was already gone.
    pub async fn remove(&self, id: ConnectionId) -> bool {
        self.connections.write().await.remove(&id).is_some()
    }

    /// Number of live connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Queue `line` on every connection except the origin.
    ///
    /// Never waits: a connection whose queue is full misses this line.
    /// Returns how many connections accepted it.
    pub async fn broadcast(&self, origin: Origin, line: &str) -> usize {
        let line: Arc<str> = Arc::from(line);
        let connections = self.connections.read().await;

        let mut delivered = 0;
        for (id, tx) in connections.iter() {
            if origin == Origin::Peer(*id) {
                continue;
            }
            match tx.try_send(line.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    debug!("Outbound queue full for {}, dropping line", id);
                }
                Err(TrySendError::Closed(_)) => {
                    debug!("Connection {} already closed", id);
                }
            }
        }
        delivered
    }
}

impl Default for RelayHub {
    fn default() -> Self {
        Self::new(256)
    }
}
