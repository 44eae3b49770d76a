//! Generation counters used to discard results of superseded operations.
//!
//! Every new operation takes a ticket; starting a newer one (or invalidating
//! the counter) makes all earlier tickets stale. A result is only committed
//! while its ticket is still current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct BuildGeneration {
    current: Arc<AtomicU64>,
}

impl BuildGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation and returns its ticket.
    pub fn begin(&self) -> BuildTicket {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        BuildTicket {
            id,
            current: self.current.clone(),
        }
    }

    /// Makes every outstanding ticket stale without issuing a new one.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct BuildTicket {
    id: u64,
    current: Arc<AtomicU64>,
}

impl BuildTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }
}
