//! Virtual Machine for the HRM instruction set

use crate::error::{ErrorKind, Result, RuntimeError};
use crate::execute::execute;
use crate::io::{IOHandler, Inbox, QueueInbox};
use crate::memory::MemoryBank;
use crate::state::{HaltReason, VMState};
use hrm_spec::{Opcode, Program, Value, DEFAULT_MAX_INSTRUCTIONS};

/// VM configuration
#[derive(Debug, Clone)]
pub struct VMConfig {
    /// Instruction budget. The run halts with `BudgetExceeded` once this many
    /// instructions have completed.
    pub max_instructions: u64,

    /// Emit a `trace` event for every instruction
    pub trace: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            max_instructions: DEFAULT_MAX_INSTRUCTIONS,
            trace: false,
        }
    }
}

/// Execution result
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Number of instructions completed (the game's "speed" score)
    pub instructions_executed: u64,

    /// Everything put in the outbox, in order
    pub outputs: Vec<Value>,

    /// Inbox values never read
    pub remaining_inputs: Vec<Value>,

    /// Hands at the moment the run stopped
    pub hands: Value,

    /// Floor at the moment the run stopped
    pub memory: MemoryBank,

    /// Reason for halting
    pub halt_reason: HaltReason,
}

impl ExecutionResult {
    /// Check if the run ended without a fault, budget overrun or cancellation
    pub fn is_success(&self) -> bool {
        self.halt_reason.is_normal()
    }

    /// Fault kind and the pc it was raised at
    pub fn error(&self) -> Option<(ErrorKind, usize)> {
        match self.halt_reason {
            HaltReason::Error { kind, pc } => Some((kind, pc)),
            _ => None,
        }
    }
}

/// HRM Virtual Machine
///
/// One `VM` owns one run: its state, floor and queues are not shared with
/// anything else, so separate runs can live on separate threads.
pub struct VM<I = QueueInbox> {
    /// Program being executed
    program: Program,

    /// VM state (hands, pc, counters)
    state: VMState,

    /// Floor tiles
    memory: MemoryBank,

    /// Inbox and outbox
    io: IOHandler<I>,

    /// Configuration
    config: VMConfig,
}

impl VM<QueueInbox> {
    /// Create a batch VM whose inbox holds `inputs`
    pub fn new(program: Program, memory: MemoryBank, inputs: Vec<Value>, config: VMConfig) -> Self {
        Self::with_inbox(program, memory, QueueInbox::new(inputs), config)
    }
}

impl<I: Inbox> VM<I> {
    /// Create a VM reading from any inbox (e.g. an interactive `ChannelInbox`)
    pub fn with_inbox(program: Program, memory: MemoryBank, inbox: I, config: VMConfig) -> Self {
        Self {
            program,
            state: VMState::new(),
            memory,
            io: IOHandler::new(inbox),
            config,
        }
    }

    /// Run the VM until halt
    pub fn run(mut self) -> Result<ExecutionResult> {
        while !self.state.is_halted() {
            self.step()?;
        }

        Ok(ExecutionResult {
            instructions_executed: self.state.instructions_executed,
            outputs: self.io.take_outputs(),
            remaining_inputs: self.io.remaining_inputs(),
            hands: self.state.hands,
            memory: self.memory,
            halt_reason: self.state.halt_reason.unwrap_or(HaltReason::EndOfProgram),
        })
    }

    /// Execute one instruction, or halt. Does nothing once halted.
    pub fn step(&mut self) -> Result<()> {
        if self.state.is_halted() {
            return Ok(());
        }

        self.fetch_and_execute()?;

        if let Some(reason) = self.state.halt_reason {
            tracing::debug!(
                ?reason,
                instructions = self.state.instructions_executed,
                outputs = self.io.outputs().len(),
                "halted"
            );
        }
        Ok(())
    }

    fn fetch_and_execute(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let len = self.program.len();
        if pc == len {
            self.state.halt(HaltReason::EndOfProgram);
            return Ok(());
        }
        let inst = *self
            .program
            .get(pc)
            .ok_or(RuntimeError::ProgramCounterOutOfBounds { pc, len })?;

        // Budget: the instruction past the limit never runs. An INBOX that
        // would only find the queue empty has no effect, so it still ends
        // the run normally.
        if self.state.instructions_executed >= self.config.max_instructions {
            let reason = if inst.opcode() == Opcode::Inbox && self.io.inbox_exhausted() {
                HaltReason::InputExhausted
            } else {
                HaltReason::BudgetExceeded {
                    limit: self.config.max_instructions,
                }
            };
            self.state.halt(reason);
            return Ok(());
        }

        if self.config.trace {
            tracing::trace!(
                step = self.state.instructions_executed,
                pc,
                instruction = %inst,
                hands = %self.state.hands,
                "step"
            );
        }

        match execute(&inst, &mut self.state, &mut self.memory, &mut self.io) {
            Ok(()) => {
                if !self.state.is_halted() {
                    self.state.inc_instructions();
                }
            }
            Err(RuntimeError::Trap(kind)) => {
                tracing::warn!(pc, instruction = %inst, error = %kind, code = kind.code(), "program fault");
                self.state.halt(HaltReason::Error { kind, pc });
            }
            Err(fatal) => return Err(fatal),
        }
        Ok(())
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &VMState {
        &self.state
    }

    /// Get memory (for debugging)
    pub fn memory(&self) -> &MemoryBank {
        &self.memory
    }

    /// Outbox contents so far
    pub fn outputs(&self) -> &[Value] {
        self.io.outputs()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }
}
