/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value stored in a shared memory cell
pub type Word = i64;

/// Address type for memory bounds
pub type Address = usize;

/// Memory region a process is associated with
///
/// Carried with every process so a later isolation layer can check accesses.
/// Nothing in the execution engine enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryBounds {
    pub low: Address,
    pub high: Address,
}

impl MemoryBounds {
    #[inline]
    #[must_use]
    pub const fn new(low: Address, high: Address) -> Self {
        Self { low, high }
    }

    /// Number of addresses covered by the bounds (zero when inverted)
    #[inline]
    #[must_use]
    pub const fn span(&self) -> usize {
        self.high.saturating_sub(self.low)
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, address: Address) -> bool {
        address >= self.low && address < self.high
    }
}

impl From<(Address, Address)> for MemoryBounds {
    fn from((low, high): (Address, Address)) -> Self {
        Self::new(low, high)
    }
}

impl fmt::Display for MemoryBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.low, self.high)
    }
}
