//! Per-key mutual exclusion.
//!
//! Two places need "one at a time per identity" discipline: slot mutation
//! (keyed by (date, time)) and dialog handling (keyed by phone number).
//! `KeyedMutex` hands out an owned guard per key; holders for different keys
//! proceed in parallel.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// A map of independent async mutexes, created lazily per key.
///
/// Entries are never removed; the key space here (slots in a 7-day window,
/// active phone numbers) stays small enough that reclamation is not worth
/// the bookkeeping.
pub struct KeyedMutex<K> {
    locks: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> KeyedMutex<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquires the lock for `key`, waiting if another holder has it.
    pub async fn lock(&self, key: K) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(key).or_insert_with(|| Arc::new(Mutex::new(()))))
        };
        entry.lock_owned().await
    }
}

impl<K> Default for KeyedMutex<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn same_key_serializes_critical_sections() {
        let mutex = Arc::new(KeyedMutex::new());
        let in_section = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let mutex = Arc::clone(&mutex);
            let in_section = Arc::clone(&in_section);
            let max_seen = Arc::clone(&max_seen);
            handles.push(tokio::spawn(async move {
                let _guard = mutex.lock("key").await;
                let current = in_section.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(current, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_section.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_keys_do_not_block_each_other() {
        let mutex = Arc::new(KeyedMutex::new());

        let guard_a = mutex.lock("a").await;
        // Must not deadlock while "a" is held.
        let guard_b = tokio::time::timeout(Duration::from_millis(100), mutex.lock("b"))
            .await
            .expect("lock for a different key should be immediate");

        drop(guard_a);
        drop(guard_b);
    }
}
