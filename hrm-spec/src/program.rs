//! # Program Structure for the HRM VM
//!
//! A program is an immutable list of instructions. Jump targets are written
//! 1-based (the way the game numbers its instruction list) and resolved to
//! 0-based indices once, here, so the runtime never has to re-check them.

use crate::error::HrmError;
use crate::instruction::Instruction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Validated HRM program
///
/// Every jump instruction inside a `Program` carries a 0-based target that is
/// a valid index into the program.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Instruction>", into = "Vec<Instruction>")]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Build a program from authored instructions (1-based jump targets)
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, HrmError> {
        let len = instructions.len();
        let instructions = instructions
            .into_iter()
            .enumerate()
            .map(|(at, inst)| match inst.target() {
                Some(target) if target == 0 || target > len => {
                    Err(HrmError::JumpTargetOutOfRange { at: at + 1, target, len })
                }
                Some(target) => Ok(inst.retarget(target - 1)),
                None => Ok(inst),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { instructions })
    }

    /// Number of instructions
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Program size as scored by the game (same as `len`)
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Instruction at a 0-based index
    #[inline]
    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Authored form, with jump targets turned back into 1-based numbers
    pub fn to_authored(&self) -> Vec<Instruction> {
        self.instructions
            .iter()
            .map(|inst| match inst.target() {
                Some(target) => inst.retarget(target + 1),
                None => *inst,
            })
            .collect()
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, pc: usize) -> &Self::Output {
        &self.instructions[pc]
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl TryFrom<Vec<Instruction>> for Program {
    type Error = HrmError;

    fn try_from(instructions: Vec<Instruction>) -> Result<Self, Self::Error> {
        Program::new(instructions)
    }
}

impl From<Program> for Vec<Instruction> {
    fn from(program: Program) -> Self {
        program.to_authored()
    }
}

impl fmt::Display for Program {
    /// Listing with 1-based line numbers and 1-based jump targets
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, inst) in self.to_authored().iter().enumerate() {
            writeln!(f, "{:3}: {}", i + 1, inst)?;
        }
        Ok(())
    }
}
