//! Room layout: the size of the floor and any tiles that start pre-filled.

use crate::error::HrmError;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Floor configuration for one puzzle
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoom")]
pub struct Room {
    size: usize,
    cells: BTreeMap<usize, Value>,
}

#[derive(Deserialize)]
struct RawRoom {
    size: usize,
    cells: BTreeMap<usize, Value>,
}

impl TryFrom<RawRoom> for Room {
    type Error = HrmError;

    fn try_from(raw: RawRoom) -> Result<Self, Self::Error> {
        raw.cells
            .into_iter()
            .try_fold(Room::new(raw.size), |room, (index, value)| room.with_cell(index, value))
    }
}

impl Room {
    /// Room with `size` empty tiles
    pub fn new(size: usize) -> Self {
        Self { size, cells: BTreeMap::new() }
    }

    /// Pre-fill one tile
    pub fn with_cell(mut self, index: usize, value: Value) -> Result<Self, HrmError> {
        if index >= self.size {
            return Err(HrmError::RoomIndexOutOfRange { index, len: self.size });
        }
        self.cells.insert(index, value);
        Ok(self)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Pre-filled tiles in index order
    pub fn cells(&self) -> impl Iterator<Item = (usize, Value)> + '_ {
        self.cells.iter().map(|(&index, &value)| (index, value))
    }
}
