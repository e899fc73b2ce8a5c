/*!
 * CPU Module
 * Execution cores, instruction decoding and interpretation, preemption checks
 */

pub mod executor;
pub mod instruction;
pub mod interpreter;
pub mod preemption;

// Re-export for convenience
pub use executor::{Core, ExecutionOutcome};
pub use instruction::{ArithmeticOp, Decoded, Instruction};
pub use interpreter::{interpret, Effect};
pub use preemption::{CancellationPoint, PreemptFlag, Quantum, RunToCompletion};
