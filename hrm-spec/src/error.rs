//! # Construction Errors for the HRM VM
//!
//! Everything that can go wrong while building values, instructions,
//! programs and rooms. Runtime faults live in `hrm-runtime`.

use crate::opcode::{Opcode, ParamKind};
use crate::value::ValueKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HrmError {
    // Value errors
    #[error("Invalid number: {0} (valid range: -999..=999)")]
    InvalidNumber(i32),

    #[error("Invalid character: {0:?} (valid range: 'A'..='Z')")]
    InvalidCharacter(char),

    #[error("Expected a number, found {found}")]
    NotANumber { found: ValueKind },

    // Instruction errors
    #[error("{opcode} expects {expected}, found {}", describe_found(.found))]
    ParameterMismatch {
        opcode: Opcode,
        expected: ParamKind,
        found: Option<ValueKind>,
    },

    // Program errors
    #[error("Jump target {target} at instruction {at} is outside 1..={len}")]
    JumpTargetOutOfRange { at: usize, target: usize, len: usize },

    // Room errors
    #[error("Room cell {index} is outside a floor of {len} tiles")]
    RoomIndexOutOfRange { index: usize, len: usize },
}

fn describe_found(found: &Option<ValueKind>) -> String {
    match found {
        Some(kind) => kind.to_string(),
        None => "no parameter".to_string(),
    }
}

impl HrmError {
    /// Check if this error comes from building a value
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            HrmError::InvalidNumber(_) | HrmError::InvalidCharacter(_) | HrmError::NotANumber { .. }
        )
    }
}
