//! Per-person mutual exclusion for life-event mutations

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::models::PersonId;

/// Serializes mutations per person id.
///
/// Two concurrent life events touching the same person race on the
/// "already married" read followed by the edge write; holding the ids'
/// locks across the check-then-mutate sequence removes that race without
/// leaning on the store's isolation level.
#[derive(Debug, Default)]
pub struct PersonLocks {
    slots: Mutex<HashMap<PersonId, Arc<Mutex<()>>>>,
}

impl PersonLocks {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, id: PersonId) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(id).or_default())
    }

    /// Acquire the lock for a single person id
    pub async fn acquire(&self, id: PersonId) -> OwnedMutexGuard<()> {
        let slot = self.slot(id).await;
        slot.lock_owned().await
    }

    /// Acquire the locks for several person ids.
    ///
    /// Ids are locked in sorted order so that two operations over an
    /// overlapping id set can never deadlock.
    pub async fn acquire_many(&self, ids: &[PersonId]) -> Vec<OwnedMutexGuard<()>> {
        let mut ordered: Vec<PersonId> = ids.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let mut guards = Vec::with_capacity(ordered.len());
        for id in ordered {
            guards.push(self.acquire(id).await);
        }
        guards
    }
}
