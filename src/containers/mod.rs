use tracing::debug;

use crate::util::{is_prime, next_prime};
use crate::MapError;


pub mod chaining;
pub mod open_addressing;

/// Contract shared by the collision-resolution engines.
///
/// None of the engines are safe to mutate from several threads at once;
/// callers that share a map must serialize access themselves.
pub trait HashTable<V> {
    /// Load factor at which the next `put` grows the table before placing.
    const GROWTH_THRESHOLD: f64;

    fn size(&self) -> usize;

    fn capacity(&self) -> usize;

    /// Inserts or overwrites `key`, returning the value it replaced.
    fn put(&mut self, key: &str, value: V) -> Option<V>;

    fn get(&self, key: &str) -> Option<&V>;

    fn get_mut(&mut self, key: &str) -> Option<&mut V>;

    /// Removes `key` if present. Absent keys are a silent no-op.
    fn remove(&mut self, key: &str) -> Option<V>;

    fn empty_buckets(&self) -> usize;

    /// Drops every entry, keeping the current capacity.
    fn clear(&mut self);

    /// Rebuilds the table at `new_capacity` (rounded up to a prime),
    /// reinserting every live entry through `put`.
    fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), MapError>;

    /// Snapshot of the live `(key, value)` pairs in storage order.
    fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone;

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn table_load(&self) -> f64 {
        self.size() as f64 / self.capacity() as f64
    }

    /// Like `try_resize_table`, but a request that violates the capacity
    /// precondition leaves the map untouched without reporting anything.
    fn resize_table(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize_table(new_capacity) {
            debug!(%err, capacity = self.capacity(), size = self.size(), "resize request ignored");
        }
    }

    /// Doubles the table when the load factor has reached the threshold.
    /// Runs before placement, so a `put` may leave the load at or above the
    /// threshold until the following `put`.
    fn grow_if_needed(&mut self) {
        if self.table_load() >= Self::GROWTH_THRESHOLD {
            let target = self.capacity() * 2;
            self.resize_table(target);
        }
    }
}


/// Capacity a resize to `requested` actually builds: kept if already
/// prime, otherwise rounded up.
pub(crate) fn resize_target(requested: usize) -> usize {
    if is_prime(requested) {
        requested
    } else {
        next_prime(requested)
    }
}


#[test]
fn resize_target_keeps_primes() {
    assert_eq!(resize_target(2), 2);
    assert_eq!(resize_target(11), 11);
    assert_eq!(resize_target(10), 11);
    assert_eq!(resize_target(1), 3);
}
