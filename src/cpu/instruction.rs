/*!
 * Instruction Decoding
 * Classifies raw instruction text into typed variants, once, at load time
 */

use crate::core::errors::InstructionError;
use crate::core::types::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    pub const ALL: [ArithmeticOp; 4] = [
        ArithmeticOp::Add,
        ArithmeticOp::Subtract,
        ArithmeticOp::Multiply,
        ArithmeticOp::Divide,
    ];

    #[inline]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Subtract => "subtract",
            ArithmeticOp::Multiply => "multiply",
            ArithmeticOp::Divide => "divide",
        }
    }

    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == mnemonic)
    }

    /// `lhs <op> rhs` with two's-complement wrapping on overflow.
    /// Division truncates toward zero; dividing by zero yields `None`.
    #[inline]
    pub fn apply(self, lhs: Word, rhs: Word) -> Option<Word> {
        match self {
            ArithmeticOp::Add => Some(lhs.wrapping_add(rhs)),
            ArithmeticOp::Subtract => Some(lhs.wrapping_sub(rhs)),
            ArithmeticOp::Multiply => Some(lhs.wrapping_mul(rhs)),
            ArithmeticOp::Divide => (rhs != 0).then(|| lhs.wrapping_div(rhs)),
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Decoded instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// `assign <var> = <int>`
    Assign { var: String, value: Word },
    /// `print <var>`
    Print { var: String },
    /// `<op> <var>, <int>`
    Arithmetic {
        op: ArithmeticOp,
        var: String,
        operand: Word,
    },
    /// Prefix matched no known category
    Unknown,
    /// Prefix matched a category but the syntax did not
    Malformed { error: InstructionError },
}

impl Instruction {
    /// Classify by prefix (case-sensitive, first match wins) and parse
    pub fn decode(raw: &str) -> Self {
        let parsed = if raw.starts_with("assign") {
            decode_assign(raw)
        } else if raw.starts_with("print") {
            decode_print(raw)
        } else if ArithmeticOp::ALL
            .iter()
            .any(|op| raw.starts_with(op.mnemonic()))
        {
            decode_arithmetic(raw)
        } else {
            Ok(Instruction::Unknown)
        };

        parsed.unwrap_or_else(|error| Instruction::Malformed { error })
    }

    /// Variable the instruction touches, if it decoded far enough to name one
    pub fn variable(&self) -> Option<&str> {
        match self {
            Instruction::Assign { var, .. }
            | Instruction::Print { var }
            | Instruction::Arithmetic { var, .. } => Some(var.as_str()),
            Instruction::Unknown | Instruction::Malformed { .. } => None,
        }
    }
}

/// Raw instruction text paired with its decoded form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    raw: String,
    instruction: Instruction,
}

impl Decoded {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let instruction = Instruction::decode(&raw);
        Self { raw, instruction }
    }

    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn instruction(&self) -> &Instruction {
        &self.instruction
    }
}

fn parse_word(text: &str) -> Result<Word, InstructionError> {
    let text = text.trim();
    text.parse()
        .map_err(|_| InstructionError::InvalidNumber(text.to_string()))
}

fn decode_assign(raw: &str) -> Result<Instruction, InstructionError> {
    // Trailing empty fields are dropped, so "assign x =" has no value part
    let mut fields: Vec<&str> = raw.split('=').collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    let [lhs, rhs] = fields.as_slice() else {
        return Err(InstructionError::InvalidAssignment);
    };

    let var = lhs
        .split_whitespace()
        .nth(1)
        .ok_or(InstructionError::InvalidAssignmentTarget)?;

    Ok(Instruction::Assign {
        var: var.to_string(),
        value: parse_word(rhs)?,
    })
}

fn decode_print(raw: &str) -> Result<Instruction, InstructionError> {
    let var = raw
        .split_whitespace()
        .nth(1)
        .ok_or(InstructionError::MissingVariable)?;

    Ok(Instruction::Print {
        var: var.to_string(),
    })
}

fn decode_arithmetic(raw: &str) -> Result<Instruction, InstructionError> {
    let (mnemonic, operands) = raw
        .split_once(' ')
        .ok_or(InstructionError::MissingOperands)?;

    let fields: Vec<&str> = operands.split(',').collect();
    let [target, operand] = fields.as_slice() else {
        return Err(InstructionError::InvalidOperands(operands.trim().to_string()));
    };

    let operand = parse_word(operand)?;
    let op = ArithmeticOp::from_mnemonic(mnemonic.trim())
        .ok_or_else(|| InstructionError::UnknownOperation(mnemonic.trim().to_string()))?;

    let var = target.trim();
    if var.is_empty() {
        return Err(InstructionError::MissingVariable);
    }

    Ok(Instruction::Arithmetic {
        op,
        var: var.to_string(),
        operand,
    })
}
