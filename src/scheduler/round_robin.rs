/*!
 * Round-Robin Dispatcher
 * One worker thread per core pulling from a shared lock-free ready queue
 */

use super::stats::{AtomicDispatchStats, DispatchReport};
use super::traits::Dispatcher;
use crate::core::config::SimConfig;
use crate::cpu::{Core, ExecutionOutcome, Quantum};
use crate::monitoring::{ExecutionEvent, ExecutionLogger};
use crate::process::Process;
use crossbeam_queue::SegQueue;
use crossbeam_utils::Backoff;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Round-robin dispatcher with an instruction-count quantum
///
/// Each dispatch grants a [`Quantum`] of `quantum` instructions, charged
/// against the process's burst time. A process that uses up its slice goes
/// to the back of the queue with its program counter intact. A process whose
/// burst time reaches zero before its last instruction leaves the ready queue,
/// is reported as exhausted, and waits in [`Dispatcher::reclaim`] with its
/// program counter intact.
pub struct RoundRobinDispatcher {
    ready: SegQueue<Process>,
    reclaimable: SegQueue<Process>,
    // Submitted but not yet retired, whether queued or on a core
    outstanding: AtomicUsize,
    quantum: u32,
    logger: ExecutionLogger,
    stats: AtomicDispatchStats,
}

/// Sleep between queue polls once spinning and yielding have given up
const IDLE_PARK: Duration = Duration::from_micros(50);

enum Retirement {
    Completed,
    Exhausted,
}

impl RoundRobinDispatcher {
    /// A quantum of zero is raised to one so every dispatch makes progress
    pub fn new(quantum: u32, logger: ExecutionLogger) -> Self {
        let quantum = quantum.max(1);
        info!(quantum, "Round-robin dispatcher initialized");
        Self {
            ready: SegQueue::new(),
            reclaimable: SegQueue::new(),
            outstanding: AtomicUsize::new(0),
            quantum,
            logger,
            stats: AtomicDispatchStats::new(),
        }
    }

    pub fn with_config(config: &SimConfig, logger: ExecutionLogger) -> Self {
        Self::new(config.quantum, logger)
    }

    #[inline]
    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    pub fn stats(&self) -> super::stats::DispatchStats {
        self.stats.snapshot()
    }

    /// Worker loop for one core
    fn drive(&self, core: &Core, report: &Mutex<DispatchReport>) {
        let backoff = Backoff::new();
        loop {
            let Some(mut process) = self.ready.pop() else {
                if self.outstanding.load(Ordering::Acquire) == 0 {
                    break;
                }
                // Remaining work is held by other cores and may come back
                if backoff.is_completed() {
                    thread::sleep(IDLE_PARK);
                } else {
                    backoff.snooze();
                }
                continue;
            };
            backoff.reset();

            self.stats.inc_dispatched();
            let mut slice = Quantum::new(self.quantum);

            match core.execute_until(Some(&mut process), &mut slice) {
                Ok(ExecutionOutcome::Completed) => {
                    self.retire(process, Retirement::Completed, report);
                }
                Ok(ExecutionOutcome::Preempted) if slice.budget_exhausted() => {
                    warn!(pid = %process.id(), pc = process.program_counter(), "burst time exhausted, reclaiming process");
                    self.logger.record(ExecutionEvent::BudgetExhausted {
                        pid: process.id(),
                        program_counter: process.program_counter(),
                    });
                    self.retire(process, Retirement::Exhausted, report);
                }
                Ok(ExecutionOutcome::Preempted) => {
                    self.stats.inc_preemptions();
                    self.ready.push(process);
                }
                Ok(ExecutionOutcome::Idle) => {
                    self.ready.push(process);
                }
                Err(err) => {
                    warn!(core = %core.id(), error = %err, "core refused process, requeueing");
                    self.ready.push(process);
                    thread::yield_now();
                }
            }
        }
        debug!(core = %core.id(), "worker finished");
    }

    fn retire(&self, process: Process, how: Retirement, report: &Mutex<DispatchReport>) {
        let pid = process.id();
        match how {
            Retirement::Completed => {
                // Dropping the process releases its id
                drop(process);
                self.stats.inc_completed();
                report.lock().completed.push(pid);
            }
            Retirement::Exhausted => {
                self.reclaimable.push(process);
                self.stats.inc_exhausted();
                report.lock().exhausted.push(pid);
            }
        }

        self.outstanding.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Dispatcher for RoundRobinDispatcher {
    fn submit(&self, process: Process) {
        debug!(pid = %process.id(), "process submitted");
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        self.stats.inc_submitted();
        self.ready.push(process);
    }

    fn run(&self, cores: &[Core]) -> DispatchReport {
        let report = Mutex::new(DispatchReport::default());

        if cores.is_empty() {
            warn!(pending = self.ready.len(), "no cores to dispatch to");
        } else {
            info!(cores = cores.len(), pending = self.ready.len(), "dispatch started");
            thread::scope(|scope| {
                for core in cores {
                    let report = &report;
                    let spawned = thread::Builder::new()
                        .name(format!("core-{}", core.id()))
                        .spawn_scoped(scope, move || self.drive(core, report));
                    if let Err(e) = spawned {
                        error!(core = %core.id(), error = %e, "failed to start core worker");
                    }
                }
            });
        }

        let mut report = report.into_inner();
        report.unfinished = self.ready.len();
        report.stats = self.stats.snapshot();
        info!(
            completed = report.completed.len(),
            exhausted = report.exhausted.len(),
            preemptions = report.stats.preemptions,
            "dispatch finished"
        );
        report
    }

    fn pending(&self) -> usize {
        self.ready.len()
    }

    fn reclaim(&self) -> Vec<Process> {
        std::iter::from_fn(|| self.reclaimable.pop()).collect()
    }
}
