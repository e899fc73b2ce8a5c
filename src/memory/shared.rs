/*!
 * Shared Memory
 * Arbitrated variable store visible to all cores
 */

use crate::core::types::Word;
use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Point-in-time copy of every binding, ordered by variable name
pub type MemorySnapshot = BTreeMap<String, Word>;

/// Shared variable store
///
/// Every operation on a single key is linearizable: cells live in a sharded
/// map and each read, write or update holds the key's shard lock for the
/// duration of the operation. Nothing orders operations on different keys.
///
/// Writers hold the snapshot gate in shared mode, so they never wait on each
/// other through it. [`snapshot`](Self::snapshot) takes it exclusively and
/// therefore observes no write half-applied.
///
/// Clones are handles to the same store.
#[derive(Debug, Clone, Default)]
pub struct SharedMemory {
    cells: Arc<DashMap<String, Word, RandomState>>,
    gate: Arc<RwLock<()>>,
}

impl SharedMemory {
    pub fn new() -> Self {
        Self {
            cells: Arc::new(DashMap::with_hasher(RandomState::new())),
            gate: Arc::new(RwLock::new(())),
        }
    }

    /// Latest committed value of `key`, or `None` if it was never written
    #[inline]
    pub fn read(&self, key: &str) -> Option<Word> {
        self.cells.get(key).map(|cell| *cell.value())
    }

    /// Bind `key` to `value`, replacing any previous binding
    pub fn write(&self, key: impl Into<String>, value: Word) {
        let key = key.into();
        let _gate = self.gate.read();
        trace!(key = %key, value, "shared memory write");
        self.cells.insert(key, value);
    }

    /// Atomically replace the value of an existing key with `f(current)`
    ///
    /// Returns the new value, or `None` without calling `f` if the key is
    /// unbound. No other operation on the key can interleave between the
    /// read and the write.
    pub fn update<F>(&self, key: &str, f: F) -> Option<Word>
    where
        F: FnOnce(Word) -> Word,
    {
        let _gate = self.gate.read();
        let mut cell = self.cells.get_mut(key)?;
        let updated = f(*cell.value());
        *cell.value_mut() = updated;
        trace!(key, value = updated, "shared memory update");
        Some(updated)
    }

    /// Like [`update`](Self::update), but `f` may refuse the change
    ///
    /// An `Err` from `f` leaves the binding untouched. `None` means the key
    /// is unbound and `f` was never called.
    pub fn try_update<F, E>(&self, key: &str, f: F) -> Option<Result<Word, E>>
    where
        F: FnOnce(Word) -> Result<Word, E>,
    {
        let _gate = self.gate.read();
        let mut cell = self.cells.get_mut(key)?;
        let updated = f(*cell.value()).map(|value| {
            *cell.value_mut() = value;
            value
        });
        if let Ok(value) = &updated {
            trace!(key, value = *value, "shared memory update");
        }
        Some(updated)
    }

    /// Consistent copy of every binding
    pub fn snapshot(&self) -> MemorySnapshot {
        let _gate = self.gate.write();
        self.cells
            .iter()
            .map(|cell| (cell.key().clone(), *cell.value()))
            .collect()
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
