/*!
 * Cooperative Preemption
 *
 * A core consults a cancellation point between instructions, never in the
 * middle of one. When the point asks the core to yield, the loop stops and
 * the process is handed back with its program counter intact.
 */

use crate::process::Process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Check consulted by a core before fetching each instruction
pub trait CancellationPoint {
    /// Return true to stop executing `process` before its next instruction
    fn should_yield(&mut self, process: &mut Process) -> bool;
}

/// Never yields: the process runs until its instructions are exhausted
#[derive(Debug, Clone, Copy, Default)]
pub struct RunToCompletion;

impl CancellationPoint for RunToCompletion {
    #[inline]
    fn should_yield(&mut self, _process: &mut Process) -> bool {
        false
    }
}

/// Time slice measured in instructions, charged against burst time
///
/// Every instruction allowed to run costs one unit of the process's burst
/// time. The slice yields once it has admitted `slice` instructions, or
/// immediately when the process has no burst time left.
#[derive(Debug, Clone, Copy)]
pub struct Quantum {
    remaining: u32,
    budget_exhausted: bool,
}

impl Quantum {
    pub fn new(slice: u32) -> Self {
        Self {
            remaining: slice,
            budget_exhausted: false,
        }
    }

    /// Instructions still admissible in this slice
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True if the slice ended because the process ran out of burst time
    #[inline]
    pub fn budget_exhausted(&self) -> bool {
        self.budget_exhausted
    }
}

impl CancellationPoint for Quantum {
    fn should_yield(&mut self, process: &mut Process) -> bool {
        if process.burst_time() == 0 {
            self.budget_exhausted = true;
            return true;
        }
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        process.decrease_burst_time(1);
        false
    }
}

/// Preemption requested from another thread
///
/// Clones share the flag. A request is consumed by the first check that
/// observes it.
#[derive(Debug, Clone, Default)]
pub struct PreemptFlag {
    requested: Arc<AtomicBool>,
}

impl PreemptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

impl CancellationPoint for PreemptFlag {
    #[inline]
    fn should_yield(&mut self, _process: &mut Process) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}
