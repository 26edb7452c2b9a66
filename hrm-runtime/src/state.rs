//! VM state for the HRM VM

use crate::error::ErrorKind;
use hrm_spec::Value;

/// Execution state owned by a single run
#[derive(Debug, Clone, Default)]
pub struct VMState {
    /// The accumulator. `Value::Empty` when nothing is held.
    pub hands: Value,

    /// Program counter (0-based instruction index)
    pub pc: usize,

    /// Instructions completed so far
    pub instructions_executed: u64,

    /// Halted flag
    pub halted: bool,

    /// Halt reason
    pub halt_reason: Option<HaltReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// INBOX found the input queue empty
    InputExhausted,
    /// Fell through past the last instruction
    EndOfProgram,
    /// A program fault at `pc`
    Error { kind: ErrorKind, pc: usize },
    /// Instruction budget used up
    BudgetExceeded { limit: u64 },
    /// Interactive input was cancelled while INBOX was waiting
    Cancelled,
}

impl HaltReason {
    /// Normal termination, no fault
    pub fn is_normal(&self) -> bool {
        matches!(self, HaltReason::InputExhausted | HaltReason::EndOfProgram)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, HaltReason::Error { .. })
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            HaltReason::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl VMState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if execution has stopped
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.halted = true;
        self.halt_reason = Some(reason);
    }

    /// Move to the next instruction
    #[inline]
    pub fn advance(&mut self) {
        self.pc += 1;
    }

    #[inline]
    pub fn jump(&mut self, target: usize) {
        self.pc = target;
    }

    /// Take whatever is in hands, leaving them empty
    #[inline]
    pub fn take_hands(&mut self) -> Value {
        std::mem::take(&mut self.hands)
    }

    #[inline]
    pub fn inc_instructions(&mut self) {
        self.instructions_executed += 1;
    }
}
