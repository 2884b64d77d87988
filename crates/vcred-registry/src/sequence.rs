//! # Sequence Allocation
//!
//! Monotonic per-entity-type sequence numbers. Allocation is the only
//! serialized section of the issue path: all counters live behind a single
//! `parking_lot::Mutex`, and an allocation reads and advances its counter
//! under that one lock. Two concurrent allocations can never observe the
//! same value.
//!
//! The lock is synchronous and never held across an `.await` point.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Thread-safe, cloneable allocator of per-entity-type sequence numbers.
///
/// Counters start at 1 and advance by 1 per allocation.
#[derive(Debug, Default)]
pub struct SequenceAllocator {
    counters: Arc<Mutex<HashMap<String, u64>>>,
}

impl Clone for SequenceAllocator {
    fn clone(&self) -> Self {
        Self {
            counters: Arc::clone(&self.counters),
        }
    }
}

impl SequenceAllocator {
    /// Create an allocator with no counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the counter for an entity type if absent. Idempotent.
    pub fn ensure(&self, entity_type: &str) {
        self.counters
            .lock()
            .entry(entity_type.to_string())
            .or_insert(1);
    }

    /// Atomically take the current value and advance the counter,
    /// creating it if absent.
    pub fn allocate(&self, entity_type: &str) -> u64 {
        let mut guard = self.counters.lock();
        let next = guard.entry(entity_type.to_string()).or_insert(1);
        let allocated = *next;
        *next += 1;
        allocated
    }

    /// Peek at the next value without advancing. `None` if the counter
    /// does not exist yet.
    pub fn current(&self, entity_type: &str) -> Option<u64> {
        self.counters.lock().get(entity_type).copied()
    }

    /// Raise a counter to at least `next_value`, creating it at 1 if
    /// absent. Never lowers an existing counter.
    pub fn raise_to(&self, entity_type: &str, next_value: u64) {
        let mut guard = self.counters.lock();
        let entry = guard.entry(entity_type.to_string()).or_insert(1);
        *entry = (*entry).max(next_value);
    }

    /// Restore a counter to a known next value (startup hydration).
    pub fn hydrate(&self, entity_type: &str, next_value: u64) {
        self.counters
            .lock()
            .insert(entity_type.to_string(), next_value);
    }

    /// Snapshot all counters as `(entity_type, next_value)` pairs, for
    /// write-through persistence.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        self.counters
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}
