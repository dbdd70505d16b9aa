use std::{iter::FusedIterator, mem};

use tracing::{debug, trace};

use super::{resize_target, HashTable};
use crate::util::{hash_function_1, next_prime};
use crate::{HashFunction, MapError, DEFAULT_CAPACITY};

#[derive(Debug, Clone)]
enum EntryState<V> {
    Empty,
    Occupied { key: String, value: V },
    Tombstone,
}

impl<V> EntryState<V> {
    fn into_value(self) -> Option<V> {
        match self {
            EntryState::Occupied { value, .. } => Some(value),
            EntryState::Empty | EntryState::Tombstone => None,
        }
    }
}

/// Observable state of a single slot, as reported by
/// [`OpenAddressingMap::slot_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Occupied,
    Tombstone,
}

/// Quadratic probe sequence `(base + i²) mod capacity` for `i = 0, 1, 2, ..`.
///
/// Yields at most `capacity` indices; past that the residues repeat.
struct ProbeSeq {
    index: usize,
    step: usize,
    capacity: usize,
}

impl ProbeSeq {
    fn start(hash: usize, capacity: usize) -> Self {
        Self {
            index: hash % capacity,
            step: 0,
            capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.step == self.capacity {
            return None;
        }
        if self.step > 0 {
            // i² - (i - 1)² = 2i - 1
            let delta = (2 * self.step - 1) % self.capacity;
            self.index = (self.index + delta) % self.capacity;
        }
        self.step += 1;
        Some(self.index)
    }
}

enum Probe {
    /// Slot holding the live entry for the key.
    Found(usize),
    /// First tombstone on the path, or the empty slot that ended it.
    Vacant(usize),
    /// Every probed slot is live and none matches.
    Exhausted,
}

/// Open-addressing map with quadratic probing and tombstone deletion.
///
/// Capacity is always prime and the table doubles once the load factor
/// reaches one half.
#[derive(Debug, Clone)]
pub struct OpenAddressingMap<V> {
    slots: Vec<EntryState<V>>,
    capacity: usize,
    size: usize,
    hash_function: HashFunction,
}

impl<V> OpenAddressingMap<V> {
    /// Creates an empty map with the smallest prime capacity reachable from
    /// `capacity` (see [`next_prime`]).
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        Self::with_exact_capacity(next_prime(capacity), hash_function)
    }

    fn with_exact_capacity(capacity: usize, hash_function: HashFunction) -> Self {
        Self {
            slots: (0..capacity).map(|_| EntryState::Empty).collect(),
            capacity,
            size: 0,
            hash_function,
        }
    }

    /// State of the slot at `index`.
    pub fn slot_state(&self, index: usize) -> Result<SlotState, MapError> {
        match self.slots.get(index) {
            Some(EntryState::Empty) => Ok(SlotState::Empty),
            Some(EntryState::Occupied { .. }) => Ok(SlotState::Occupied),
            Some(EntryState::Tombstone) => Ok(SlotState::Tombstone),
            None => Err(MapError::IndexOutOfBounds {
                index,
                capacity: self.capacity,
            }),
        }
    }

    /// Live entries in ascending slot order. The borrow keeps the map from
    /// being mutated until the iterator is dropped.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: &self.slots,
            cursor: 0,
        }
    }

    fn probe(&self, key: &str) -> Probe {
        let mut first_tombstone = None;
        for index in ProbeSeq::start((self.hash_function)(key), self.capacity) {
            match &self.slots[index] {
                EntryState::Empty => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                EntryState::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                EntryState::Occupied { key: existing, .. } if existing == key => {
                    return Probe::Found(index)
                }
                EntryState::Occupied { .. } => {}
            }
        }
        first_tombstone.map_or(Probe::Exhausted, Probe::Vacant)
    }

    fn find(&self, key: &str) -> Option<usize> {
        match self.probe(key) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    fn insert_owned(&mut self, key: String, value: V) -> Option<V> {
        self.grow_if_needed();

        match self.probe(&key) {
            Probe::Found(index) => {
                mem::replace(&mut self.slots[index], EntryState::Occupied { key, value })
                    .into_value()
            }
            Probe::Vacant(index) => {
                if matches!(self.slots[index], EntryState::Tombstone) {
                    trace!(index, key = %key, "reusing tombstone");
                }
                self.slots[index] = EntryState::Occupied { key, value };
                self.size += 1;
                None
            }
            Probe::Exhausted => {
                // Only reachable once live entries fill the probe path.
                self.rebuild(next_prime(self.capacity * 2));
                self.insert_owned(key, value)
            }
        }
    }

    fn rebuild(&mut self, capacity: usize) {
        let old_capacity = self.capacity;
        let mut table = Self::with_exact_capacity(capacity, self.hash_function);
        for slot in mem::take(&mut self.slots) {
            if let EntryState::Occupied { key, value } = slot {
                table.insert_owned(key, value);
            }
        }
        debug!(
            old_capacity,
            new_capacity = table.capacity,
            size = table.size,
            "rebuilt open-addressing table"
        );
        *self = table;
    }
}

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, hash_function_1)
    }
}

impl<V> HashTable<V> for OpenAddressingMap<V> {
    const GROWTH_THRESHOLD: f64 = 0.5;

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
        let index = self.find(key)?;
        match &self.slots[index] {
            EntryState::Occupied { value, .. } => Some(value),
            EntryState::Empty | EntryState::Tombstone => None,
        }
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find(key)?;
        match &mut self.slots[index] {
            EntryState::Occupied { value, .. } => Some(value),
            EntryState::Empty | EntryState::Tombstone => None,
        }
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find(key)?;
        self.size -= 1;
        mem::replace(&mut self.slots[index], EntryState::Tombstone).into_value()
    }

    /// Tombstones are occupied-but-dead and do not count as empty.
    fn empty_buckets(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, EntryState::Empty))
            .count()
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = EntryState::Empty);
        self.size = 0;
        trace!(capacity = self.capacity, "cleared open-addressing table");
    }

    /// Fails unless `new_capacity` exceeds the number of live entries.
    fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), MapError> {
        if new_capacity <= self.size {
            return Err(MapError::CapacityTooSmall {
                requested: new_capacity,
                minimum: self.size + 1,
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

/// Cursor over the live slots of an [`OpenAddressingMap`].
pub struct Iter<'a, V> {
    slots: &'a [EntryState<V>],
    cursor: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.cursor) {
            self.cursor += 1;
            if let EntryState::Occupied { key, value } = slot {
                return Some((key.as_str(), value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len().saturating_sub(self.cursor)))
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a OpenAddressingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
