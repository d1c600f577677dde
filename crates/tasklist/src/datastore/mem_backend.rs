use super::backend::{Snapshot, StorageBackend};
use crate::error::{StoreError, StoreResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory storage backend for testing and throwaway sessions.
///
/// Uses a `Mutex` rather than `RefCell` because the HTTP front end shares one
/// store across worker threads.
#[derive(Default)]
pub struct MemBackend {
    snapshot: Mutex<Snapshot>,
    simulate_write_error: AtomicBool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    fn snapshot(&self) -> StoreResult<std::sync::MutexGuard<'_, Snapshot>> {
        self.snapshot
            .lock()
            .map_err(|_| StoreError::Unavailable("memory backend poisoned".to_string()))
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> StoreResult<Snapshot> {
        Ok(self.snapshot()?.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("Simulated write error".to_string()));
        }
        *self.snapshot()? = snapshot.clone();
        Ok(())
    }
}
