/*!
 * ID Allocation
 * Type-safe identifiers and probing registries with atomic check-and-reserve
 */

use super::errors::IdSpaceExhausted;
use ahash::RandomState;
use dashmap::DashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

// ============================================================================
// Type-Safe ID Wrappers
// ============================================================================

/// Process ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(pub u32);

/// Core ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoreId(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier backed by a plain `u32`
pub trait RawId: Copy + Eq + Hash + fmt::Debug + fmt::Display {
    fn from_raw(raw: u32) -> Self;
    fn raw(self) -> u32;
}

impl RawId for Pid {
    #[inline]
    fn from_raw(raw: u32) -> Self {
        Pid(raw)
    }

    #[inline]
    fn raw(self) -> u32 {
        self.0
    }
}

impl RawId for CoreId {
    #[inline]
    fn from_raw(raw: u32) -> Self {
        CoreId(raw)
    }

    #[inline]
    fn raw(self) -> u32 {
        self.0
    }
}

// ============================================================================
// Probing Registry
// ============================================================================

/// Registry of live identifiers
///
/// A requested id that is already live is resolved by linear probing: the
/// candidate is incremented until an insert into the live set succeeds. The
/// insert is the check and the reservation in one step, so concurrent callers
/// requesting the same id always end up with distinct ids.
///
/// Clones share the same live set.
#[derive(Debug)]
pub struct IdRegistry<T> {
    live: Arc<DashSet<u32, RandomState>>,
    _marker: PhantomData<T>,
}

impl<T: RawId> IdRegistry<T> {
    pub fn new() -> Self {
        Self {
            live: Arc::new(DashSet::with_hasher(RandomState::new())),
            _marker: PhantomData,
        }
    }

    /// Reserve `requested`, or the first free id above it
    pub fn reserve(&self, requested: T) -> Result<T, IdSpaceExhausted> {
        let mut candidate = requested.raw();
        loop {
            if self.live.insert(candidate) {
                return Ok(T::from_raw(candidate));
            }
            candidate = candidate.checked_add(1).ok_or(IdSpaceExhausted {
                requested: requested.raw(),
            })?;
        }
    }

    /// Return an id to the free pool. Returns false if it was not live.
    pub fn release(&self, id: T) -> bool {
        self.live.remove(&id.raw()).is_some()
    }

    #[inline]
    pub fn is_live(&self, id: T) -> bool {
        self.live.contains(&id.raw())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl<T: RawId> Default for IdRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for IdRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            live: Arc::clone(&self.live),
            _marker: PhantomData,
        }
    }
}

// ============================================================================
// Convenience Type Aliases
// ============================================================================

/// Registry of live process ids (ids are released when a process is dropped)
pub type PidRegistry = IdRegistry<Pid>;

/// Registry of live core ids
pub type CoreRegistry = IdRegistry<CoreId>;

// ============================================================================
// Tests
// ============================================================================
