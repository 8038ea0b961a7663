//! # Per-Account Locks
//!
//! Link and unlink both read then write `isLinkedToAddress` and token state,
//! so calls touching the same web2 account are serialized here. Calls for
//! different accounts proceed concurrently.
//!
//! Ids are keyed in canonical hyphenated UUID form, so every spelling the
//! account store accepts for one account maps to one lock. Ids that do not
//! parse are keyed verbatim; the store rejects them anyway.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::trace;
use uuid::Uuid;

/// Async mutex per web2 account id.
#[derive(Default)]
pub struct AccountLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `web2_account_id`.
    ///
    /// Access is released when the guard is dropped.
    pub async fn acquire(&self, web2_account_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            // Entries only referenced by the map have no holder or waiter.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry(lock_key(web2_account_id))
                .or_default()
                .clone()
        };

        trace!(%web2_account_id, "waiting for account lock");
        lock.lock_owned().await
    }

    /// Number of accounts currently locked or awaited.
    pub fn active(&self) -> usize {
        self.locks
            .lock()
            .values()
            .filter(|lock| Arc::strong_count(lock) > 1)
            .count()
    }
}

fn lock_key(web2_account_id: &str) -> String {
    match Uuid::parse_str(web2_account_id) {
        Ok(id) => id.hyphenated().to_string(),
        Err(_) => web2_account_id.to_string(),
    }
}
