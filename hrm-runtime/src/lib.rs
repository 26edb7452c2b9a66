//! # HRM Runtime
//!
//! Execute Human Resource Machine style programs.
//!
//! The machine has one register (the "hands"), a fixed floor of memory tiles,
//! an inbox it reads from and an outbox it writes to. A run stops when INBOX
//! finds the inbox empty, when the program faults, or when the instruction
//! budget (1000 by default) is used up.
//!
//! ## Example
//!
//! ```rust
//! use hrm_runtime::{VM, VMConfig, MemoryBank, HaltReason};
//! use hrm_spec::{Instruction, Program, Value};
//!
//! let program = Program::new(vec![
//!     Instruction::inbox(),
//!     Instruction::outbox(),
//!     Instruction::jump(1),
//! ]).unwrap();
//! let inputs = vec![Value::number(3).unwrap(), Value::character('A').unwrap()];
//! let vm = VM::new(program, MemoryBank::new(0), inputs.clone(), VMConfig::default());
//! let result = vm.run().unwrap();
//! assert_eq!(result.outputs, inputs);
//! assert_eq!(result.halt_reason, HaltReason::InputExhausted);
//! ```

pub mod address;
pub mod error;
pub mod execute;
pub mod io;
pub mod memory;
pub mod state;
pub mod vm;

pub use address::{validate_direct, validate_indirect};
pub use error::{ErrorKind, RuntimeError};
pub use io::{ChannelInbox, IOHandler, Inbox, InboxRead, InboxSender, QueueInbox};
pub use memory::MemoryBank;
pub use state::{HaltReason, VMState};
pub use vm::{ExecutionResult, VMConfig, VM};

/// Simple execution helper
///
/// Runs a program in a fresh copy of `room` with the given inputs and the
/// default configuration.
pub fn run(
    program: hrm_spec::Program,
    room: &hrm_spec::Room,
    inputs: Vec<hrm_spec::Value>,
) -> Result<ExecutionResult, RuntimeError> {
    let vm = VM::new(program, MemoryBank::from_room(room), inputs, VMConfig::default());
    vm.run()
}
