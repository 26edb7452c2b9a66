//! Instruction execution for the HRM VM
//!
//! Each instruction runs every check before it changes anything, so a fault
//! leaves hands, memory and the outbox exactly as the previous instruction
//! left them.

use crate::address::resolve;
use crate::error::{ErrorKind, Result};
use crate::io::{IOHandler, Inbox, InboxRead};
use crate::memory::MemoryBank;
use crate::state::{HaltReason, VMState};
use hrm_spec::{Instruction, Number, Opcode, OutOfRange, Value};

/// Tile index named by a memory instruction's parameter
fn operand_index(instr: &Instruction, memory: &MemoryBank) -> std::result::Result<usize, ErrorKind> {
    let param = instr.param().unwrap_or_default();
    resolve(&param, instr.opcode().is_indirect(), memory)
}

/// Hands as a number, or `fault` if they hold anything else
#[inline]
fn hands_number(state: &VMState, fault: ErrorKind) -> std::result::Result<Number, ErrorKind> {
    match state.hands {
        Value::Number(n) => Ok(n),
        _ => Err(fault),
    }
}

/// Tile as a number, or `fault` if it holds anything else
#[inline]
fn cell_number(memory: &MemoryBank, index: usize, fault: ErrorKind) -> Result<Number> {
    match memory.get(index)? {
        Value::Number(n) => Ok(n),
        _ => Err(fault.into()),
    }
}

/// Map an out-of-range result to the fault for the direction it left the range
#[inline]
fn in_range(result: std::result::Result<Number, OutOfRange>) -> std::result::Result<Number, ErrorKind> {
    result.map_err(|e| match e {
        OutOfRange::AboveMax(_) => ErrorKind::Overflow,
        OutOfRange::BelowMin(_) => ErrorKind::Underflow,
    })
}

/// Jump destination. A jump without a target sends the pc out of bounds,
/// which the VM loop reports as fatal.
#[inline]
fn jump_target(instr: &Instruction) -> usize {
    instr.target().unwrap_or(usize::MAX)
}

/// Execute single instruction
///
/// Program faults come back as `RuntimeError::Trap`. Normal halts (INBOX on
/// an exhausted or cancelled inbox) are recorded on `state`.
pub fn execute<I: Inbox>(
    instr: &Instruction,
    state: &mut VMState,
    memory: &mut MemoryBank,
    io: &mut IOHandler<I>,
) -> Result<()> {
    match instr.opcode() {
        // ========== I/O ==========
        Opcode::Inbox => match io.read() {
            InboxRead::Value(value) => {
                state.hands = value;
                state.advance();
            }
            InboxRead::Exhausted => state.halt(HaltReason::InputExhausted),
            InboxRead::Cancelled => state.halt(HaltReason::Cancelled),
        },

        Opcode::Outbox => {
            if state.hands.is_empty() {
                return Err(ErrorKind::EmptyHands.into());
            }
            io.write(state.hands);
            state.advance();
        }

        // ========== Copy ==========
        Opcode::CopyFrom | Opcode::CopyFromIndirect => {
            let index = operand_index(instr, memory)?;
            let value = memory.get(index)?;
            if value.is_empty() {
                return Err(ErrorKind::ReadingEmptyCell.into());
            }
            state.hands = value;
            state.advance();
        }

        Opcode::CopyTo | Opcode::CopyToIndirect => {
            if state.hands.is_empty() {
                return Err(ErrorKind::EmptyHands.into());
            }
            let index = operand_index(instr, memory)?;
            memory.set(index, state.hands)?;
            state.take_hands();
            state.advance();
        }

        // ========== Arithmetic ==========
        Opcode::Add | Opcode::AddIndirect => {
            let lhs = hands_number(state, ErrorKind::BadAddendTypeInHands)?;
            let index = operand_index(instr, memory)?;
            let rhs = cell_number(memory, index, ErrorKind::BadAddendTypeInMemory)?;
            let sum = in_range(lhs.checked_add(rhs))?;
            state.hands = Value::Number(sum);
            state.advance();
        }

        Opcode::Sub | Opcode::SubIndirect => {
            let lhs = hands_number(state, ErrorKind::BadSubtrahendTypeInHands)?;
            let index = operand_index(instr, memory)?;
            let rhs = cell_number(memory, index, ErrorKind::BadSubtrahendTypeInMemory)?;
            let difference = in_range(lhs.checked_sub(rhs))?;
            state.hands = Value::Number(difference);
            state.advance();
        }

        // ========== Bump ==========
        Opcode::BumpUp | Opcode::BumpUpIndirect => {
            let index = operand_index(instr, memory)?;
            let current = cell_number(memory, index, ErrorKind::BadTypeForBumpInMemory)?;
            let bumped = Value::Number(in_range(current.increment())?);
            memory.set(index, bumped)?;
            state.hands = bumped;
            state.advance();
        }

        Opcode::BumpDown | Opcode::BumpDownIndirect => {
            let index = operand_index(instr, memory)?;
            let current = cell_number(memory, index, ErrorKind::BadTypeForBumpInMemory)?;
            let bumped = Value::Number(in_range(current.decrement())?);
            memory.set(index, bumped)?;
            state.hands = bumped;
            state.advance();
        }

        // ========== Jump ==========
        Opcode::Jump => {
            state.jump(jump_target(instr));
        }

        Opcode::JumpIfZero => {
            let condition = hands_number(state, ErrorKind::BadJumpConditionType)?;
            if condition.is_zero() {
                state.jump(jump_target(instr));
            } else {
                state.advance();
            }
        }

        Opcode::JumpIfNegative => {
            let condition = hands_number(state, ErrorKind::BadJumpConditionType)?;
            if condition.is_negative() {
                state.jump(jump_target(instr));
            } else {
                state.advance();
            }
        }
    }

    Ok(())
}
