use std::{iter::FusedIterator, mem, slice};

use tracing::{debug, trace};

use super::{resize_target, HashTable};
use crate::util::{hash_function_1, next_prime};
use crate::{HashFunction, MapError, DEFAULT_CAPACITY};

#[derive(Debug, Clone)]
struct Entry<V> {
    key: String,
    value: V,
}

/// Entries whose keys hash to the same slot, in insertion order.
type Bucket<V> = Vec<Entry<V>>;

/// Separate-chaining map: every slot owns a growable bucket of entries.
///
/// Capacity is always prime; the table doubles once there are as many
/// entries as buckets.
#[derive(Debug, Clone)]
pub struct ChainingMap<V> {
    buckets: Vec<Bucket<V>>,
    capacity: usize,
    size: usize,
    hash_function: HashFunction,
}

impl<V> ChainingMap<V> {
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self::with_exact_capacity(next_prime(capacity), hash_function)
    }

    fn with_exact_capacity(capacity: usize, hash_function: HashFunction) -> Self {
        Self {
            buckets: (0..capacity).map(|_| Bucket::new()).collect(),
            capacity,
            size: 0,
            hash_function,
        }
    }

    /// Number of entries chained in the bucket at `index`.
    pub fn bucket_len(&self, index: usize) -> Result<usize, MapError> {
        self.buckets
            .get(index)
            .map(Vec::len)
            .ok_or(MapError::IndexOutOfBounds {
                index,
                capacity: self.capacity,
            })
    }

    /// Entries bucket by bucket, each bucket in insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.buckets.iter().flatten(),
        }
    }

    fn bucket_index(&self, key: &str) -> usize {
        (self.hash_function)(key) % self.capacity
    }

    fn insert_owned(&mut self, key: String, value: V) -> Option<V> {
        self.grow_if_needed();

        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        match bucket.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => Some(mem::replace(&mut entry.value, value)),
            None => {
                bucket.push(Entry { key, value });
                self.size += 1;
                None
            }
        }
    }

    fn rebuild(&mut self, capacity: usize) {
        let old_capacity = self.capacity;
        let mut table = Self::with_exact_capacity(capacity, self.hash_function);
        for entry in mem::take(&mut self.buckets).into_iter().flatten() {
            table.insert_owned(entry.key, entry.value);
        }
        debug!(
            old_capacity,
            new_capacity = table.capacity,
            size = table.size,
            "rebuilt chaining table"
        );
        *self = table;
    }
}

impl<V> Default for ChainingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, hash_function_1)
    }
}

impl<V> HashTable<V> for ChainingMap<V> {
    const GROWTH_THRESHOLD: f64 = 1.0;

    fn size(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn put(&mut self, key: &str, value: V) -> Option<V> {
        self.insert_owned(key.to_owned(), value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.value)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|entry| entry.key == key)?;
        self.size -= 1;
        Some(bucket.remove(position).value)
    }

    fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    fn clear(&mut self) {
        self.buckets = (0..self.capacity).map(|_| Bucket::new()).collect();
        self.size = 0;
        trace!(capacity = self.capacity, "cleared chaining table");
    }

    /// Fails only for a zero capacity; shrinking below the entry count is
    /// allowed and corrected by the next `put`.
    fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), MapError> {
        if new_capacity < 1 {
            return Err(MapError::CapacityTooSmall {
                requested: new_capacity,
                minimum: 1,
            });
        }
        self.rebuild(resize_target(new_capacity));
        Ok(())
    }

    fn get_keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.to_owned(), value.clone()))
            .collect()
    }
}

pub struct Iter<'a, V> {
    inner: std::iter::Flatten<slice::Iter<'a, Bucket<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a ChainingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
