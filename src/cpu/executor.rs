/*!
 * Execution Core
 * Fetch-decode-execute loop for one process at a time
 */

use super::instruction::Decoded;
use super::interpreter::interpret;
use super::preemption::{CancellationPoint, RunToCompletion};
use crate::core::errors::CoreError;
use crate::core::id::{CoreId, CoreRegistry, Pid};
use crate::memory::SharedMemory;
use crate::monitoring::{span_execution, ExecutionEvent, ExecutionLogger};
use crate::process::Process;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// How a call to [`Core::execute`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// No process was supplied
    Idle,
    /// Every instruction has been run
    Completed,
    /// The cancellation point asked the core to yield; the process can resume
    Preempted,
}

/// Execution core
///
/// The busy flag and current process are readable from any thread while the
/// core runs. Claiming is a compare-and-swap on the busy flag, so a second
/// `execute` on a busy core is rejected rather than interleaved.
///
/// Dropping a core returns its id to the registry it was created from.
pub struct Core {
    id: CoreId,
    busy: AtomicBool,
    current: Mutex<Option<Pid>>,
    memory: SharedMemory,
    logger: ExecutionLogger,
    registry: CoreRegistry,
}

impl Core {
    /// Create a core, reserving `requested` or the next free id above it
    pub fn create(
        registry: &CoreRegistry,
        requested: CoreId,
        memory: SharedMemory,
        logger: ExecutionLogger,
    ) -> Result<Self, CoreError> {
        let id = registry.reserve(requested)?;
        debug!(core = %id, requested = %requested, "core created");

        Ok(Self {
            id,
            busy: AtomicBool::new(false),
            current: Mutex::new(None),
            memory,
            logger,
            registry: registry.clone(),
        })
    }

    #[inline]
    pub fn id(&self) -> CoreId {
        self.id
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Process currently held, if any
    #[inline]
    pub fn current_process(&self) -> Option<Pid> {
        *self.current.lock()
    }

    #[inline]
    pub fn memory(&self) -> &SharedMemory {
        &self.memory
    }

    #[inline]
    pub fn logger(&self) -> &ExecutionLogger {
        &self.logger
    }

    /// Run `process` until its instructions are exhausted
    pub fn execute(&self, process: Option<&mut Process>) -> Result<ExecutionOutcome, CoreError> {
        self.execute_until(process, &mut RunToCompletion)
    }

    /// Run `process` until it completes or `cancellation` asks the core to yield
    ///
    /// Bad instructions are logged and skipped; they never end the run.
    pub fn execute_until<C>(
        &self,
        process: Option<&mut Process>,
        cancellation: &mut C,
    ) -> Result<ExecutionOutcome, CoreError>
    where
        C: CancellationPoint + ?Sized,
    {
        let Some(process) = process else {
            warn!(core = %self.id, "No process to execute");
            self.logger
                .record(ExecutionEvent::NoProcess { core: self.id });
            return Ok(ExecutionOutcome::Idle);
        };

        let _claim = self.claim(process.id())?;
        let span = span_execution(self.id, process.id());
        let _entered = span.enter();

        info!(core = %self.id, pid = %process.id(), pc = process.program_counter(), "process started");
        self.logger.record(ExecutionEvent::ProcessStarted {
            core: self.id,
            pid: process.id(),
        });

        process.set_running(true);
        let outcome = self.run(process, cancellation);
        process.set_running(false);

        match outcome {
            ExecutionOutcome::Completed => {
                info!(core = %self.id, pid = %process.id(), "process completed");
                self.logger.record(ExecutionEvent::ProcessCompleted {
                    core: self.id,
                    pid: process.id(),
                });
            }
            ExecutionOutcome::Preempted => {
                debug!(core = %self.id, pid = %process.id(), pc = process.program_counter(), "process preempted");
                self.logger.record(ExecutionEvent::ProcessPreempted {
                    core: self.id,
                    pid: process.id(),
                    program_counter: process.program_counter(),
                });
            }
            ExecutionOutcome::Idle => {}
        }

        Ok(outcome)
    }

    fn run<C>(&self, process: &mut Process, cancellation: &mut C) -> ExecutionOutcome
    where
        C: CancellationPoint + ?Sized,
    {
        loop {
            if process.is_complete() {
                return ExecutionOutcome::Completed;
            }
            if cancellation.should_yield(process) {
                return ExecutionOutcome::Preempted;
            }

            let pid = process.id();
            match process.fetch() {
                Some(decoded) => self.step(pid, decoded),
                None => return ExecutionOutcome::Completed,
            }
        }
    }

    /// Interpret one instruction and log what happened
    fn step(&self, pid: Pid, decoded: &Decoded) {
        debug!(core = %self.id, pid = %pid, instruction = decoded.raw(), "executing");
        self.logger.record(ExecutionEvent::InstructionAttempted {
            pid,
            raw: decoded.raw().to_string(),
        });

        match interpret(decoded.instruction(), &self.memory) {
            Ok(effect) => self.logger.record(effect.into()),
            Err(reason) => {
                warn!(core = %self.id, pid = %pid, instruction = decoded.raw(), %reason, "instruction skipped");
                self.logger.record(ExecutionEvent::Skipped {
                    raw: decoded.raw().to_string(),
                    reason,
                });
            }
        }
    }

    fn claim(&self, pid: Pid) -> Result<Claim<'_>, CoreError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::Busy {
                core: self.id,
                running: self.current_process(),
            })?;
        *self.current.lock() = Some(pid);
        Ok(Claim { core: self })
    }
}

impl std::fmt::Debug for Core {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Core")
            .field("id", &self.id)
            .field("busy", &self.is_busy())
            .field("current", &self.current_process())
            .finish()
    }
}

impl Drop for Core {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

/// Holds a core busy; releasing it clears the current process
struct Claim<'a> {
    core: &'a Core,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        *self.core.current.lock() = None;
        self.core.busy.store(false, Ordering::Release);
    }
}
