/*!
 * Process Types
 * Common types for process management
 */

use crate::core::id::Pid;
use crate::core::types::MemoryBounds;
use serde::{Deserialize, Serialize};

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Waiting for a core, either fresh or preempted
    Ready,
    /// Held by a core
    Running,
    /// Cursor is at or past the last instruction
    Terminated,
}

/// Process metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub pid: Pid,
    pub state: ProcessState,
    pub program_counter: usize,
    pub instruction_count: usize,
    pub burst_time: u32,
    pub memory_bounds: MemoryBounds,
}

impl ProcessInfo {
    /// Instructions left to run
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.instruction_count.saturating_sub(self.program_counter)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }
}
