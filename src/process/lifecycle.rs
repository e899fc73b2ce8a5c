/*!
 * Process Lifecycle
 * Creation with id reservation, cursor advancement, budget accounting, release
 */

use super::types::{ProcessInfo, ProcessState};
use crate::core::errors::ProcessError;
use crate::core::id::{Pid, PidRegistry};
use crate::core::types::MemoryBounds;
use crate::cpu::instruction::Decoded;
use std::fmt;
use tracing::debug;

/// A unit of work
///
/// The instruction list is fixed at creation and decoded once. Only the
/// program counter, burst time and running flag change afterwards, and only
/// through `&mut` access, so a process can be executed by at most one core
/// at a time.
///
/// Dropping a process returns its id to the registry it was created from.
pub struct Process {
    id: Pid,
    program: Vec<Decoded>,
    program_counter: usize,
    memory_bounds: MemoryBounds,
    burst_time: u32,
    running: bool,
    registry: PidRegistry,
}

impl Process {
    /// Create a process, reserving `requested` or the next free id above it
    ///
    /// A `start_counter` past the end of the program is clamped to the end.
    pub fn create<I>(
        registry: &PidRegistry,
        requested: Pid,
        instructions: I,
        start_counter: usize,
        memory_bounds: MemoryBounds,
        burst_time: u32,
    ) -> Result<Self, ProcessError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let id = registry.reserve(requested)?;
        let program: Vec<Decoded> = instructions.into_iter().map(Decoded::new).collect();
        let program_counter = start_counter.min(program.len());

        debug!(
            pid = %id,
            requested = %requested,
            instructions = program.len(),
            burst_time,
            "process created"
        );

        Ok(Self {
            id,
            program,
            program_counter,
            memory_bounds,
            burst_time,
            running: false,
            registry: registry.clone(),
        })
    }

    #[inline]
    pub fn id(&self) -> Pid {
        self.id
    }

    /// Raw instruction text, in program order
    pub fn instructions(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.program.iter().map(Decoded::raw)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.program.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.program.is_empty()
    }

    #[inline]
    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    #[inline]
    pub fn memory_bounds(&self) -> MemoryBounds {
        self.memory_bounds
    }

    #[inline]
    pub fn burst_time(&self) -> u32 {
        self.burst_time
    }

    /// Return the instruction under the cursor and advance past it
    ///
    /// `None` marks the end of the program, not a failure.
    pub fn next_instruction(&mut self) -> Option<&str> {
        self.fetch().map(Decoded::raw)
    }

    /// Decoded form of [`next_instruction`](Self::next_instruction)
    pub(crate) fn fetch(&mut self) -> Option<&Decoded> {
        let decoded = self.program.get(self.program_counter)?;
        self.program_counter += 1;
        Some(decoded)
    }

    /// Consume `n` units of burst time, stopping at zero
    #[inline]
    pub fn decrease_burst_time(&mut self, n: u32) {
        self.burst_time = self.burst_time.saturating_sub(n);
    }

    /// Grant `n` more units of burst time, saturating at the maximum
    #[inline]
    pub fn replenish_burst_time(&mut self, n: u32) {
        self.burst_time = self.burst_time.saturating_add(n);
    }

    /// Move the cursor past the last instruction, abandoning the rest
    pub fn mark_complete(&mut self) {
        self.program_counter = self.program.len();
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.program_counter >= self.program.len()
    }

    pub fn state(&self) -> ProcessState {
        if self.is_complete() {
            ProcessState::Terminated
        } else if self.running {
            ProcessState::Running
        } else {
            ProcessState::Ready
        }
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn info(&self) -> ProcessInfo {
        ProcessInfo {
            pid: self.id,
            state: self.state(),
            program_counter: self.program_counter,
            instruction_count: self.program.len(),
            burst_time: self.burst_time,
            memory_bounds: self.memory_bounds,
        }
    }
}

impl fmt::Debug for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("id", &self.id)
            .field("program_counter", &self.program_counter)
            .field("len", &self.program.len())
            .field("burst_time", &self.burst_time)
            .field("state", &self.state())
            .finish()
    }
}

impl Drop for Process {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}
