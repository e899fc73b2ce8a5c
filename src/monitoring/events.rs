/*!
 * Execution Events
 * One typed event per status report; `Display` renders the status line
 */

use crate::core::errors::ExecError;
use crate::core::id::{CoreId, Pid};
use crate::core::types::Word;
use crate::cpu::interpreter::Effect;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExecutionEvent {
    /// `execute` was called without a process
    NoProcess { core: CoreId },
    ProcessStarted { core: CoreId, pid: Pid },
    InstructionAttempted { pid: Pid, raw: String },
    Assigned { var: String, value: Word },
    Printed { var: String, value: Word },
    VariableNotFound { var: String },
    Updated { var: String, value: Word },
    Skipped { raw: String, reason: ExecError },
    ProcessPreempted {
        core: CoreId,
        pid: Pid,
        program_counter: usize,
    },
    ProcessCompleted { core: CoreId, pid: Pid },
    /// Dispatcher stopped a process whose burst time ran out
    BudgetExhausted { pid: Pid, program_counter: usize },
}

impl ExecutionEvent {
    #[inline]
    pub fn is_skip(&self) -> bool {
        matches!(self, ExecutionEvent::Skipped { .. })
    }

    /// Skip reason, if this event reports a skipped instruction
    pub fn skip_reason(&self) -> Option<&ExecError> {
        match self {
            ExecutionEvent::Skipped { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<Effect> for ExecutionEvent {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Assigned { var, value } => ExecutionEvent::Assigned { var, value },
            Effect::Printed { var, value } => ExecutionEvent::Printed { var, value },
            Effect::NotFound { var } => ExecutionEvent::VariableNotFound { var },
            Effect::Updated { var, value } => ExecutionEvent::Updated { var, value },
        }
    }
}

impl fmt::Display for ExecutionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionEvent::NoProcess { core } => write!(f, "No process to execute on core {}", core),
            ExecutionEvent::ProcessStarted { core, pid } => {
                write!(f, "Core {} started executing process {}", core, pid)
            }
            ExecutionEvent::InstructionAttempted { raw, .. } => {
                write!(f, "Executing instruction: {}", raw)
            }
            ExecutionEvent::Assigned { var, value } => write!(f, "Assigned {} to {}", value, var),
            ExecutionEvent::Printed { var, value } => write!(f, "Value of {}: {}", var, value),
            ExecutionEvent::VariableNotFound { var } => write!(f, "Variable {} not found.", var),
            ExecutionEvent::Updated { var, value } => write!(f, "Updated {} to {}", var, value),
            ExecutionEvent::Skipped { raw, reason } => write!(f, "Skipped '{}': {}", raw, reason),
            ExecutionEvent::ProcessPreempted {
                core,
                pid,
                program_counter,
            } => write!(
                f,
                "Core {} preempted process {} at instruction {}",
                core, pid, program_counter
            ),
            ExecutionEvent::ProcessCompleted { core, pid } => {
                write!(f, "Core {} completed process {}", core, pid)
            }
            ExecutionEvent::BudgetExhausted {
                pid,
                program_counter,
            } => write!(
                f,
                "Process {} exhausted its burst time at instruction {}",
                pid, program_counter
            ),
        }
    }
}
