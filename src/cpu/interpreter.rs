/*!
 * Instruction Interpreter
 * Applies one decoded instruction to shared memory
 */

use super::instruction::{ArithmeticOp, Instruction};
use crate::core::errors::ExecError;
use crate::core::types::Word;
use crate::memory::SharedMemory;
use serde::{Deserialize, Serialize};

/// Observable result of a successfully interpreted instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Assigned { var: String, value: Word },
    Printed { var: String, value: Word },
    /// `print` of a variable that was never written
    NotFound { var: String },
    Updated { var: String, value: Word },
}

/// Interpret `instruction` against `memory`
///
/// Arithmetic runs as a single atomic read-modify-write on the target key,
/// so concurrent cores operating on the same variable never lose an update.
pub fn interpret(instruction: &Instruction, memory: &SharedMemory) -> Result<Effect, ExecError> {
    match instruction {
        Instruction::Assign { var, value } => {
            memory.write(var.as_str(), *value);
            Ok(Effect::Assigned {
                var: var.clone(),
                value: *value,
            })
        }
        Instruction::Print { var } => Ok(match memory.read(var) {
            Some(value) => Effect::Printed {
                var: var.clone(),
                value,
            },
            None => Effect::NotFound { var: var.clone() },
        }),
        Instruction::Arithmetic { op, var, operand } => arithmetic(*op, var, *operand, memory),
        Instruction::Unknown => Err(ExecError::UnknownInstruction),
        Instruction::Malformed { error } => Err(ExecError::Malformed(error.clone())),
    }
}

fn arithmetic(
    op: ArithmeticOp,
    var: &str,
    operand: Word,
    memory: &SharedMemory,
) -> Result<Effect, ExecError> {
    // An unbound target is reported before the divisor is looked at
    let updated = memory
        .try_update(var, |current| {
            op.apply(current, operand).ok_or_else(|| ExecError::DivisionByZero {
                var: var.to_string(),
            })
        })
        .ok_or_else(|| ExecError::UndefinedVariable(var.to_string()))??;

    Ok(Effect::Updated {
        var: var.to_string(),
        value: updated,
    })
}
