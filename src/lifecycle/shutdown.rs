//! Shutdown coordination.
//!
//! One `Shutdown` is created per service run. `signals.rs` triggers it on
//! SIGINT/SIGTERM, tests trigger it directly, and `HttpServer::run` holds a
//! receiver that starts the drain.

use tokio::sync::broadcast;

/// Cloneable handle that fans a single stop request out to every receiver.
#[derive(Clone)]
pub struct Shutdown {
    /// Broadcast channel sender; capacity 1 since only the first trigger matters.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for the server loop. Must be taken before `trigger`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every receiver to stop. A trigger with no receivers is a no-op.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Receivers still alive, i.e. servers that have not finished draining.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
