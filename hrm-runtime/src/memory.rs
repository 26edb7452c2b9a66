//! Memory subsystem: the room's floor tiles

use crate::error::{Result, RuntimeError};
use hrm_spec::{Room, Value};

/// Fixed-length bank of tiles. An uninitialized tile holds `Value::Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBank {
    cells: Vec<Value>,
}

impl MemoryBank {
    /// Bank of `len` empty tiles
    pub fn new(len: usize) -> Self {
        MemoryBank {
            cells: vec![Value::Empty; len],
        }
    }

    /// Bank laid out as a room describes it
    pub fn from_room(room: &Room) -> Self {
        let mut cells = vec![Value::Empty; room.size()];
        // Room guarantees every pre-filled index is below its size
        for (index, value) in room.cells() {
            if let Some(cell) = cells.get_mut(index) {
                *cell = value;
            }
        }
        MemoryBank { cells }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read a tile. Callers validate addresses first; a bad index here is fatal.
    pub fn get(&self, index: usize) -> Result<Value> {
        self.cells.get(index).copied().ok_or(RuntimeError::MemoryIndexOutOfBounds {
            index,
            len: self.cells.len(),
        })
    }

    /// Write a tile. Callers validate addresses first; a bad index here is fatal.
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let len = self.cells.len();
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(RuntimeError::MemoryIndexOutOfBounds { index, len }),
        }
    }

    pub fn cells(&self) -> &[Value] {
        &self.cells
    }
}
