use tracing::trace;

use crate::containers::{chaining::ChainingMap, HashTable};
use crate::MapError;


/// Most frequent value(s) of `values` and how often they occur.
///
/// Counts are kept in a [`ChainingMap`], so the whole pass is linear in the
/// input length. Ties are all returned, in bucket order.
pub fn find_mode<S: AsRef<str>>(values: &[S]) -> Result<(Vec<String>, usize), MapError> {
    if values.is_empty() {
        return Err(MapError::EmptyInput);
    }

    let mut counts: ChainingMap<usize> = ChainingMap::default();
    for value in values {
        let key = value.as_ref();
        let count = counts.get(key).copied().unwrap_or(0);
        counts.put(key, count + 1);
    }

    let frequency = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let modes: Vec<String> = counts
        .iter()
        .filter(|(_, count)| **count == frequency)
        .map(|(key, _)| key.to_owned())
        .collect();

    trace!(distinct = counts.size(), frequency, modes = modes.len(), "found mode");
    Ok((modes, frequency))
}
