/*!
 * SMP Simulator Library
 * Process execution engine for a small shared-memory multiprocessor
 */

pub mod core;
pub mod cpu;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use crate::core::{
    ConfigError, CoreError, CoreId, CoreRegistry, ExecError, InstructionError, MemoryBounds, Pid,
    PidRegistry, ProcessError, SimConfig, Word,
};
pub use cpu::{CancellationPoint, Core, ExecutionOutcome, Instruction, PreemptFlag, Quantum};
pub use memory::{MemorySnapshot, SharedMemory};
pub use monitoring::{init_tracing, init_tracing_with, ExecutionEvent, ExecutionLogger};
pub use process::{Process, ProcessState};
pub use scheduler::{DispatchReport, Dispatcher, RoundRobinDispatcher};
