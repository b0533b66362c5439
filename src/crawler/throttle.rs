//! Shared throttle gate for concurrent fetches
//!
//! Every request passes the gate before it is sent. A task that has to back
//! off closes the gate for the length of its wait, so while any task is
//! backing off no other task can dispatch a request. Two tasks backing off at
//! once wait one after the other.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct ThrottleGate {
    lock: RwLock<()>,
    waits: AtomicU32,
}

impl ThrottleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no backoff is in progress
    pub async fn pass(&self) {
        drop(self.lock.read().await);
    }

    /// Closes the gate for `wait`, then reopens it
    pub async fn backoff(&self, wait: Duration) {
        let _closed = self.lock.write().await;
        self.waits.fetch_add(1, Ordering::Relaxed);
        tokio::time::sleep(wait).await;
    }

    /// Number of backoff waits taken through this gate
    pub fn waits(&self) -> u32 {
        self.waits.load(Ordering::Relaxed)
    }
}
