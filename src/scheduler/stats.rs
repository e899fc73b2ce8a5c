/*!
 * Lock-Free Dispatch Statistics
 * Uses atomic counters for zero-contention stats tracking from every worker
 */

use crate::core::id::Pid;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic dispatcher statistics
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - All operations use relaxed ordering; snapshots are advisory
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct AtomicDispatchStats {
    submitted: AtomicU64,
    dispatched: AtomicU64,
    preemptions: AtomicU64,
    completed: AtomicU64,
    exhausted: AtomicU64,
}

impl AtomicDispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn inc_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_preemptions(&self) {
        self.preemptions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_exhausted(&self) {
        self.exhausted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DispatchStats {
        DispatchStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            preemptions: self.preemptions.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            exhausted: self.exhausted.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`AtomicDispatchStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    pub submitted: u64,
    pub dispatched: u64,
    pub preemptions: u64,
    pub completed: u64,
    pub exhausted: u64,
}

/// Result of one dispatcher run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Processes that ran every instruction, in retirement order
    pub completed: Vec<Pid>,
    /// Processes handed back unfinished because their burst time ran out
    pub exhausted: Vec<Pid>,
    /// Processes still queued when the run ended (no core could take them)
    pub unfinished: usize,
    pub stats: DispatchStats,
}

impl DispatchReport {
    #[inline]
    pub fn retired(&self) -> usize {
        self.completed.len() + self.exhausted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_snapshot() {
        let stats = AtomicDispatchStats::new();
        stats.inc_submitted();
        stats.inc_submitted();
        stats.inc_dispatched();
        stats.inc_preemptions();
        stats.inc_completed();

        assert_eq!(
            stats.snapshot(),
            DispatchStats {
                submitted: 2,
                dispatched: 1,
                preemptions: 1,
                completed: 1,
                exhausted: 0,
            }
        );
    }

    #[test]
    fn test_report_retired() {
        let report = DispatchReport {
            completed: vec![Pid(1), Pid(2)],
            exhausted: vec![Pid(3)],
            ..Default::default()
        };
        assert_eq!(report.retired(), 3);
    }
}
