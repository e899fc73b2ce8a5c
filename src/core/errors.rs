/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::id::{CoreId, Pid};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// No free id exists at or above the requested one
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[error("identity space exhausted probing from {requested}")]
#[diagnostic(
    code(id::space_exhausted),
    help("Every id from the requested value up to u32::MAX is live. Release ids or request a lower one.")
)]
pub struct IdSpaceExhausted {
    pub requested: u32,
}

/// Process-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Failed to allocate a process id: no free id at or above {0}")]
    #[diagnostic(
        code(process::identity_space_exhausted),
        help("Drop completed processes so their ids return to the registry.")
    )]
    IdentitySpaceExhausted(u32),
}

impl From<IdSpaceExhausted> for ProcessError {
    fn from(err: IdSpaceExhausted) -> Self {
        ProcessError::IdentitySpaceExhausted(err.requested)
    }
}

/// Core-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum CoreError {
    #[error("Failed to allocate a core id: no free id at or above {0}")]
    #[diagnostic(
        code(core::identity_space_exhausted),
        help("Drop unused cores so their ids return to the registry.")
    )]
    IdentitySpaceExhausted(u32),

    #[error("Core {core} is already executing process {running:?}")]
    #[diagnostic(
        code(core::busy),
        help("A core runs one process at a time. Wait for it to go idle or pick another core.")
    )]
    Busy { core: CoreId, running: Option<Pid> },
}

impl From<IdSpaceExhausted> for CoreError {
    fn from(err: IdSpaceExhausted) -> Self {
        CoreError::IdentitySpaceExhausted(err.requested)
    }
}

/// Syntax errors found while decoding an instruction
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum InstructionError {
    #[error("invalid assignment instruction")]
    #[diagnostic(code(instruction::invalid_assignment), help("Use `assign <var> = <int>`."))]
    InvalidAssignment,

    #[error("invalid assignment syntax on the left-hand side")]
    #[diagnostic(code(instruction::invalid_assignment_target), help("Use `assign <var> = <int>`."))]
    InvalidAssignmentTarget,

    #[error("invalid number '{0}'")]
    #[diagnostic(code(instruction::invalid_number))]
    InvalidNumber(String),

    #[error("missing variable name")]
    #[diagnostic(code(instruction::missing_variable))]
    MissingVariable,

    #[error("missing operands")]
    #[diagnostic(code(instruction::missing_operands), help("Use `<op> <var>, <int>`."))]
    MissingOperands,

    #[error("invalid operands '{0}'")]
    #[diagnostic(
        code(instruction::invalid_operands),
        help("Arithmetic takes exactly two comma-separated operands.")
    )]
    InvalidOperands(String),

    #[error("unknown arithmetic operation '{0}'")]
    #[diagnostic(
        code(instruction::unknown_operation),
        help("Supported operations are add, subtract, multiply and divide.")
    )]
    UnknownOperation(String),
}

/// Reasons an instruction was skipped at run time
///
/// None of these stop a process. The core logs the reason and moves on.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ExecError {
    #[error("malformed instruction: {0}")]
    #[diagnostic(code(exec::malformed))]
    Malformed(#[from] InstructionError),

    #[error("unknown instruction")]
    #[diagnostic(code(exec::unknown_instruction))]
    UnknownInstruction,

    #[error("variable {0} not found for arithmetic operation")]
    #[diagnostic(code(exec::undefined_variable), help("Assign the variable before operating on it."))]
    UndefinedVariable(String),

    #[error("division by zero is not allowed ({var} left unchanged)")]
    #[diagnostic(code(exec::division_by_zero))]
    DivisionByZero { var: String },
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config: {0}")]
    #[diagnostic(code(config::io))]
    Io(String),

    #[error("Failed to parse config: {0}")]
    #[diagnostic(code(config::parse), help("The config file must be a JSON object."))]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(config::invalid))]
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
