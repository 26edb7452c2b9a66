//! # HRM Opcode Definitions
//!
//! The fixed instruction set. Discriminants follow the order the instruction
//! set has always been listed in, so they are stable for external encoders.
//!
//! ## Families
//! - 0x00-0x01: I/O (INBOX, OUTBOX)
//! - 0x02-0x05: Copy (COPYFROM, COPYTO, direct and indirect)
//! - 0x06-0x09: Arithmetic (ADD, SUB, direct and indirect)
//! - 0x0A-0x0D: Bump (BUMP_UP, BUMP_DOWN, direct and indirect)
//! - 0x0E-0x10: Jump (JUMP, JUMP_IF_ZERO, JUMP_IF_NEGATIVE)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction opcode
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // ========== I/O ==========
    /// INBOX: hands = next input (halts when the inbox is empty)
    Inbox = 0x00,
    /// OUTBOX: output hands
    Outbox = 0x01,

    // ========== Copy ==========
    /// COPYFROM: hands = mem[a]
    CopyFrom = 0x02,
    /// COPYFROM [a]: hands = mem[mem[a]]
    CopyFromIndirect = 0x03,
    /// COPYTO: mem[a] = hands, hands = empty
    CopyTo = 0x04,
    /// COPYTO [a]: mem[mem[a]] = hands, hands = empty
    CopyToIndirect = 0x05,

    // ========== Arithmetic ==========
    /// ADD: hands = hands + mem[a]
    Add = 0x06,
    /// ADD [a]: hands = hands + mem[mem[a]]
    AddIndirect = 0x07,
    /// SUB: hands = hands - mem[a]
    Sub = 0x08,
    /// SUB [a]: hands = hands - mem[mem[a]]
    SubIndirect = 0x09,

    // ========== Bump ==========
    /// BUMPUP: mem[a] += 1, hands = mem[a]
    BumpUp = 0x0A,
    /// BUMPUP [a]: mem[mem[a]] += 1, hands = mem[mem[a]]
    BumpUpIndirect = 0x0B,
    /// BUMPDN: mem[a] -= 1, hands = mem[a]
    BumpDown = 0x0C,
    /// BUMPDN [a]: mem[mem[a]] -= 1, hands = mem[mem[a]]
    BumpDownIndirect = 0x0D,

    // ========== Jump ==========
    /// JUMP: pc = target
    Jump = 0x0E,
    /// JUMPZ: if hands == 0 { pc = target }
    JumpIfZero = 0x0F,
    /// JUMPN: if hands < 0 { pc = target }
    JumpIfNegative = 0x10,
}

/// Kind of parameter an opcode expects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    None,
    MemoryAddress,
    ProgramAddress,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::None => write!(f, "no parameter"),
            ParamKind::MemoryAddress => write!(f, "a memory address"),
            ParamKind::ProgramAddress => write!(f, "a program address"),
        }
    }
}

impl Opcode {
    /// Every opcode, in discriminant order
    pub const ALL: [Opcode; 17] = [
        Opcode::Inbox,
        Opcode::Outbox,
        Opcode::CopyFrom,
        Opcode::CopyFromIndirect,
        Opcode::CopyTo,
        Opcode::CopyToIndirect,
        Opcode::Add,
        Opcode::AddIndirect,
        Opcode::Sub,
        Opcode::SubIndirect,
        Opcode::BumpUp,
        Opcode::BumpUpIndirect,
        Opcode::BumpDown,
        Opcode::BumpDownIndirect,
        Opcode::Jump,
        Opcode::JumpIfZero,
        Opcode::JumpIfNegative,
    ];

    /// Convert from u8 to Opcode
    pub fn from_u8(byte: u8) -> Option<Self> {
        Self::ALL.get(byte as usize).copied()
    }

    /// Convert to u8
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Kind of parameter this opcode takes
    pub fn param_kind(self) -> ParamKind {
        match self {
            Opcode::Inbox | Opcode::Outbox => ParamKind::None,
            Opcode::Jump | Opcode::JumpIfZero | Opcode::JumpIfNegative => ParamKind::ProgramAddress,
            _ => ParamKind::MemoryAddress,
        }
    }

    /// Check if this opcode addresses memory through a pointer tile
    pub fn is_indirect(self) -> bool {
        matches!(
            self,
            Opcode::CopyFromIndirect
                | Opcode::CopyToIndirect
                | Opcode::AddIndirect
                | Opcode::SubIndirect
                | Opcode::BumpUpIndirect
                | Opcode::BumpDownIndirect
        )
    }

    /// Check if this opcode can move the program counter somewhere other than pc + 1
    pub fn is_jump(self) -> bool {
        self.param_kind() == ParamKind::ProgramAddress
    }

    /// Spelling used by the game's editor (indirection is shown on the parameter)
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Inbox => "INBOX",
            Opcode::Outbox => "OUTBOX",
            Opcode::CopyFrom | Opcode::CopyFromIndirect => "COPYFROM",
            Opcode::CopyTo | Opcode::CopyToIndirect => "COPYTO",
            Opcode::Add | Opcode::AddIndirect => "ADD",
            Opcode::Sub | Opcode::SubIndirect => "SUB",
            Opcode::BumpUp | Opcode::BumpUpIndirect => "BUMPUP",
            Opcode::BumpDown | Opcode::BumpDownIndirect => "BUMPDN",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfZero => "JUMPZ",
            Opcode::JumpIfNegative => "JUMPN",
        }
    }

    /// Unambiguous opcode name
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Inbox => "INBOX",
            Opcode::Outbox => "OUTBOX",
            Opcode::CopyFrom => "COPYFROM",
            Opcode::CopyFromIndirect => "COPYFROM_INDIRECT",
            Opcode::CopyTo => "COPYTO",
            Opcode::CopyToIndirect => "COPYTO_INDIRECT",
            Opcode::Add => "ADD",
            Opcode::AddIndirect => "ADD_INDIRECT",
            Opcode::Sub => "SUB",
            Opcode::SubIndirect => "SUB_INDIRECT",
            Opcode::BumpUp => "BUMP_UP",
            Opcode::BumpUpIndirect => "BUMP_UP_INDIRECT",
            Opcode::BumpDown => "BUMP_DOWN",
            Opcode::BumpDownIndirect => "BUMP_DOWN_INDIRECT",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfZero => "JUMP_IF_ZERO",
            Opcode::JumpIfNegative => "JUMP_IF_NEGATIVE",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
