//! HRM Instruction
//!
//! An opcode plus an optional parameter. The parameter's kind is checked
//! against the opcode when the instruction is built:
//! - INBOX, OUTBOX: no parameter
//! - COPY/ADD/SUB/BUMP (all addressing modes): `Value::MemoryAddress`
//! - JUMP, JUMPZ, JUMPN: `Value::ProgramAddress`

use crate::error::HrmError;
use crate::opcode::{Opcode, ParamKind};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInstruction")]
pub struct Instruction {
    opcode: Opcode,
    param: Option<Value>,
}

/// Unchecked wire shape; deserialization goes through `Instruction::new`.
#[derive(Deserialize)]
struct RawInstruction {
    opcode: Opcode,
    param: Option<Value>,
}

impl TryFrom<RawInstruction> for Instruction {
    type Error = HrmError;

    fn try_from(raw: RawInstruction) -> Result<Self, Self::Error> {
        Instruction::new(raw.opcode, raw.param)
    }
}

impl Instruction {
    /// Build an instruction, checking the parameter against the opcode
    pub fn new(opcode: Opcode, param: Option<Value>) -> Result<Self, HrmError> {
        let matches = match (opcode.param_kind(), &param) {
            (ParamKind::None, None) => true,
            (ParamKind::MemoryAddress, Some(Value::MemoryAddress(_))) => true,
            (ParamKind::ProgramAddress, Some(Value::ProgramAddress(_))) => true,
            _ => false,
        };

        if matches {
            Ok(Self { opcode, param })
        } else {
            Err(HrmError::ParameterMismatch {
                opcode,
                expected: opcode.param_kind(),
                found: param.map(|p| p.kind()),
            })
        }
    }

    #[inline]
    fn with_address(opcode: Opcode, address: usize) -> Self {
        Self { opcode, param: Some(Value::MemoryAddress(address)) }
    }

    #[inline]
    fn with_target(opcode: Opcode, target: usize) -> Self {
        Self { opcode, param: Some(Value::ProgramAddress(target)) }
    }

    pub fn inbox() -> Self {
        Self { opcode: Opcode::Inbox, param: None }
    }

    pub fn outbox() -> Self {
        Self { opcode: Opcode::Outbox, param: None }
    }

    pub fn copy_from(address: usize) -> Self {
        Self::with_address(Opcode::CopyFrom, address)
    }

    pub fn copy_from_indirect(address: usize) -> Self {
        Self::with_address(Opcode::CopyFromIndirect, address)
    }

    pub fn copy_to(address: usize) -> Self {
        Self::with_address(Opcode::CopyTo, address)
    }

    pub fn copy_to_indirect(address: usize) -> Self {
        Self::with_address(Opcode::CopyToIndirect, address)
    }

    pub fn add(address: usize) -> Self {
        Self::with_address(Opcode::Add, address)
    }

    pub fn add_indirect(address: usize) -> Self {
        Self::with_address(Opcode::AddIndirect, address)
    }

    pub fn sub(address: usize) -> Self {
        Self::with_address(Opcode::Sub, address)
    }

    pub fn sub_indirect(address: usize) -> Self {
        Self::with_address(Opcode::SubIndirect, address)
    }

    pub fn bump_up(address: usize) -> Self {
        Self::with_address(Opcode::BumpUp, address)
    }

    pub fn bump_up_indirect(address: usize) -> Self {
        Self::with_address(Opcode::BumpUpIndirect, address)
    }

    pub fn bump_down(address: usize) -> Self {
        Self::with_address(Opcode::BumpDown, address)
    }

    pub fn bump_down_indirect(address: usize) -> Self {
        Self::with_address(Opcode::BumpDownIndirect, address)
    }

    /// JUMP to a 1-based instruction number
    pub fn jump(target: usize) -> Self {
        Self::with_target(Opcode::Jump, target)
    }

    /// JUMPZ to a 1-based instruction number
    pub fn jump_if_zero(target: usize) -> Self {
        Self::with_target(Opcode::JumpIfZero, target)
    }

    /// JUMPN to a 1-based instruction number
    pub fn jump_if_negative(target: usize) -> Self {
        Self::with_target(Opcode::JumpIfNegative, target)
    }

    #[inline]
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    #[inline]
    pub fn param(&self) -> Option<Value> {
        self.param
    }

    /// Jump target payload, if this is a jump
    pub fn target(&self) -> Option<usize> {
        match self.param {
            Some(Value::ProgramAddress(target)) => Some(target),
            _ => None,
        }
    }

    /// Same instruction with its jump target replaced.
    pub(crate) fn retarget(self, target: usize) -> Self {
        Self::with_target(self.opcode, target)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode.mnemonic();
        match self.param {
            Some(Value::MemoryAddress(a)) if self.opcode.is_indirect() => write!(f, "{} [{}]", mnemonic, a),
            Some(Value::MemoryAddress(a)) | Some(Value::ProgramAddress(a)) => write!(f, "{} {}", mnemonic, a),
            Some(other) => write!(f, "{} {}", mnemonic, other),
            None => f.write_str(mnemonic),
        }
    }
}
