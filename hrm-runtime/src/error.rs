//! Runtime error types for the HRM VM
//!
//! [`ErrorKind`] is the fault taxonomy a program can trigger; a fault halts
//! the run and is reported in the execution result. [`RuntimeError`] is what
//! `VM::run` itself returns as `Err`: internal inconsistencies that a program
//! built through `hrm_spec::Program` can never reach.

use hrm_spec::HrmError;
use thiserror::Error;

/// Program faults. The first one raised halts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("Empty hands")]
    EmptyHands,

    #[error("Invalid type for direct address")]
    InvalidDirectAddressType,

    #[error("Direct address out of range")]
    DirectAddressOutOfRange,

    #[error("Invalid type for indirect address")]
    InvalidIndirectAddressType,

    #[error("Indirect address out of range")]
    IndirectAddressOutOfRange,

    #[error("Reading an empty tile")]
    ReadingEmptyCell,

    #[error("Bad addend type in hands")]
    BadAddendTypeInHands,

    #[error("Bad subtrahend type in hands")]
    BadSubtrahendTypeInHands,

    #[error("Bad addend type in memory")]
    BadAddendTypeInMemory,

    #[error("Bad subtrahend type in memory")]
    BadSubtrahendTypeInMemory,

    #[error("Bad type for bump in memory")]
    BadTypeForBumpInMemory,

    #[error("Overflow: result above 999")]
    Overflow,

    #[error("Underflow: result below -999")]
    Underflow,

    #[error("Bad type for jump condition")]
    BadJumpConditionType,
}

impl ErrorKind {
    /// Stable numeric code. 0 is reserved for "no error". 8 is unused: empty
    /// reads through direct and indirect addresses share `ReadingEmptyCell`.
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::BadJumpConditionType => 1,
            ErrorKind::EmptyHands => 2,
            ErrorKind::InvalidDirectAddressType => 3,
            ErrorKind::DirectAddressOutOfRange => 4,
            ErrorKind::InvalidIndirectAddressType => 5,
            ErrorKind::IndirectAddressOutOfRange => 6,
            ErrorKind::ReadingEmptyCell => 7,
            ErrorKind::BadAddendTypeInHands => 9,
            ErrorKind::BadSubtrahendTypeInHands => 10,
            ErrorKind::BadAddendTypeInMemory => 11,
            ErrorKind::BadSubtrahendTypeInMemory => 12,
            ErrorKind::BadTypeForBumpInMemory => 13,
            ErrorKind::Overflow => 14,
            ErrorKind::Underflow => 15,
        }
    }

    /// Check if this fault came from the address validator
    pub fn is_address_error(self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidDirectAddressType
                | ErrorKind::DirectAddressOutOfRange
                | ErrorKind::InvalidIndirectAddressType
                | ErrorKind::IndirectAddressOutOfRange
        )
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Carries a program fault out of `execute`; the VM loop turns it into a halt.
    #[error("Trap: {0}")]
    Trap(#[from] ErrorKind),

    #[error("Spec error: {0}")]
    SpecError(#[from] HrmError),

    #[error("Program counter out of bounds: pc {pc}, program length {len}")]
    ProgramCounterOutOfBounds { pc: usize, len: usize },

    #[error("Memory index out of bounds: index {index}, floor size {len}")]
    MemoryIndexOutOfBounds { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
