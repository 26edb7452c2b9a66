//! I/O handling: the inbox (input queue) and outbox (output queue)
//!
//! Two inbox flavours:
//! - [`QueueInbox`]: values fixed before the run; running dry ends the run normally.
//! - [`ChannelInbox`]: values arrive while the program runs. A read blocks
//!   the running thread until a value arrives, the run is cancelled, or every
//!   sender has gone away. This is the only place a run can suspend.

use hrm_spec::Value;
use std::sync::mpsc::{self, Receiver, Sender};

/// Result of one INBOX read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboxRead {
    Value(Value),
    /// No more input will ever arrive
    Exhausted,
    /// The run was cancelled while waiting for input
    Cancelled,
}

/// Source of INBOX values
pub trait Inbox {
    /// Next value, consumed strictly in order
    fn read(&mut self) -> InboxRead;

    /// Values not yet read, for diagnostics once the run has stopped
    fn remaining(&mut self) -> Vec<Value>;

    /// Whether the next read is already known to return `Exhausted`,
    /// without consuming anything. Sources that cannot tell without
    /// blocking answer `false`.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Batch inbox: a fixed sequence read front to back with a single cursor
#[derive(Debug, Clone, Default)]
pub struct QueueInbox {
    values: Vec<Value>,
    cursor: usize,
}

impl QueueInbox {
    pub fn new(values: Vec<Value>) -> Self {
        QueueInbox { values, cursor: 0 }
    }

    /// Number of values read so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl Inbox for QueueInbox {
    fn read(&mut self) -> InboxRead {
        match self.values.get(self.cursor) {
            Some(&value) => {
                self.cursor += 1;
                InboxRead::Value(value)
            }
            None => InboxRead::Exhausted,
        }
    }

    fn remaining(&mut self) -> Vec<Value> {
        self.values[self.cursor..].to_vec()
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.values.len()
    }
}

enum Message {
    Value(Value),
    Cancel,
}

/// Interactive inbox fed through an [`InboxSender`]
pub struct ChannelInbox {
    receiver: Receiver<Message>,
    cancelled: bool,
}

/// Producer side of a [`ChannelInbox`]
#[derive(Clone)]
pub struct InboxSender {
    sender: Sender<Message>,
}

/// Create a connected interactive inbox and its sender
pub fn channel() -> (InboxSender, ChannelInbox) {
    let (sender, receiver) = mpsc::channel();
    (
        InboxSender { sender },
        ChannelInbox { receiver, cancelled: false },
    )
}

impl InboxSender {
    /// Queue a value for INBOX. Gives the value back if the run is gone.
    pub fn send(&self, value: Value) -> Result<(), Value> {
        self.sender.send(Message::Value(value)).map_err(|_| value)
    }

    /// Cancel the run. Takes effect at the next INBOX read that reaches it.
    pub fn cancel(&self) {
        // A closed receiver means the run already finished
        let _ = self.sender.send(Message::Cancel);
    }
}

impl Inbox for ChannelInbox {
    fn read(&mut self) -> InboxRead {
        if self.cancelled {
            return InboxRead::Cancelled;
        }
        match self.receiver.recv() {
            Ok(Message::Value(value)) => InboxRead::Value(value),
            Ok(Message::Cancel) => {
                self.cancelled = true;
                InboxRead::Cancelled
            }
            Err(_) => InboxRead::Exhausted,
        }
    }

    fn remaining(&mut self) -> Vec<Value> {
        self.receiver
            .try_iter()
            .filter_map(|message| match message {
                Message::Value(value) => Some(value),
                Message::Cancel => None,
            })
            .collect()
    }
}

/// Inbox plus the append-only outbox
#[derive(Debug, Clone)]
pub struct IOHandler<I> {
    inbox: I,
    outputs: Vec<Value>,
}

impl<I: Inbox> IOHandler<I> {
    pub fn new(inbox: I) -> Self {
        IOHandler {
            inbox,
            outputs: Vec::new(),
        }
    }

    pub fn read(&mut self) -> InboxRead {
        self.inbox.read()
    }

    pub fn write(&mut self, value: Value) {
        self.outputs.push(value);
    }

    pub fn outputs(&self) -> &[Value] {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.outputs)
    }

    pub fn remaining_inputs(&mut self) -> Vec<Value> {
        self.inbox.remaining()
    }

    pub fn inbox_exhausted(&self) -> bool {
        self.inbox.is_exhausted()
    }
}
