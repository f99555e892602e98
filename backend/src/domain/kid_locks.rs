use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<i64, Arc<AsyncMutex<()>>>;

/// One async lock per kid. Every read-modify-write of a kid's ledger or
/// points runs while holding that kid's guard.
///
/// Entries only live while someone holds or waits on them, so ids that
/// are never seen again do not accumulate.
#[derive(Clone, Default)]
pub struct KidLocks {
    locks: Arc<Mutex<LockMap>>,
}

/// Held lock of one kid. Dropping it releases the lock and removes the
/// map entry when nobody else is waiting.
pub struct KidGuard {
    kid_id: i64,
    locks: Arc<Mutex<LockMap>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KidLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and hold the lock of `kid_id` until the guard is dropped
    pub async fn lock(&self, kid_id: i64) -> KidGuard {
        let lock = {
            let mut locks = lock_map(&self.locks);
            locks.entry(kid_id).or_default().clone()
        };
        let guard = lock.lock_owned().await;
        KidGuard {
            kid_id,
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// Number of kids with a held or awaited lock
    pub fn len(&self) -> usize {
        lock_map(&self.locks).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for KidGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut locks = lock_map(&self.locks);
        // Only the map still refers to the lock: no holder, no waiter
        let idle = locks
            .get(&self.kid_id)
            .map_or(false, |lock| Arc::strong_count(lock) == 1);
        if idle {
            locks.remove(&self.kid_id);
        }
    }
}

fn lock_map(locks: &Mutex<LockMap>) -> MutexGuard<'_, LockMap> {
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}
