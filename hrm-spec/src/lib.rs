//! # HRM VM Specification
//!
//! Data model for a Human Resource Machine style virtual machine.
//!
//! ## Key Features
//! - Single accumulator ("hands") with a distinguishable empty state
//! - Typed values: empty, number (-999..=999), character (A-Z), addresses
//! - 17 opcodes, with direct and indirect addressing for memory operations
//! - Programs validated at construction (parameter kinds, jump targets)
//! - Rooms describing the floor (memory bank) size and initial tiles

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod room;
pub mod value;

pub use error::HrmError;
pub use instruction::Instruction;
pub use opcode::{Opcode, ParamKind};
pub use program::Program;
pub use room::Room;
pub use value::{Character, Number, OutOfRange, Value, ValueKind};

/// Default instruction budget for one run
pub const DEFAULT_MAX_INSTRUCTIONS: u64 = 1000;
