use thiserror::Error;

pub mod containers;
pub mod mode;
pub mod util;

pub use containers::chaining::ChainingMap;
pub use containers::open_addressing::{OpenAddressingMap, SlotState};
pub use containers::HashTable;
pub use mode::find_mode;


/// Maps a key to a non-negative integer. Engines always reduce the result
/// with `mod capacity`, so the function only has to be deterministic.
pub type HashFunction = fn(&str) -> usize;

/// Number of slots requested by `Default` constructors.
pub const DEFAULT_CAPACITY: usize = 11;


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("index {index} out of bounds for capacity {capacity}")]
    IndexOutOfBounds { index: usize, capacity: usize },

    #[error("requested capacity {requested} is below the minimum of {minimum}")]
    CapacityTooSmall { requested: usize, minimum: usize },

    #[error("cannot compute the mode of an empty sequence")]
    EmptyInput,
}
