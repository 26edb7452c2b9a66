//! # Value Types for the HRM VM
//!
//! Everything the machine moves around (hands, floor tiles, inbox and outbox
//! items, instruction parameters) is a [`Value`].
//!
//! ## Ranges
//! - Numbers: -999 ..= 999
//! - Characters: uppercase ASCII `A` ..= `Z`
//!
//! Ranged payloads are wrapped in [`Number`] and [`Character`], which can only
//! be built through checked constructors. Deserialization goes through the
//! same checks.

use crate::error::HrmError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed number held by the machine, always within [`Number::MIN`, `Number::MAX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Number(i16);

/// Direction in which an arithmetic result left the legal number range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutOfRange {
    /// Result was greater than 999.
    AboveMax(i32),
    /// Result was less than -999.
    BelowMin(i32),
}

impl Number {
    /// Smallest legal number
    pub const MIN: i16 = -999;

    /// Largest legal number
    pub const MAX: i16 = 999;

    /// Zero, the value JUMPZ tests for
    pub const ZERO: Number = Number(0);

    /// Create a number, rejecting anything outside -999..=999
    pub fn new(value: i16) -> Result<Self, HrmError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Number(value))
        } else {
            Err(HrmError::InvalidNumber(value as i32))
        }
    }

    /// Range-check a widened intermediate result.
    pub fn from_wide(value: i32) -> Result<Self, OutOfRange> {
        if value > Self::MAX as i32 {
            Err(OutOfRange::AboveMax(value))
        } else if value < Self::MIN as i32 {
            Err(OutOfRange::BelowMin(value))
        } else {
            Ok(Number(value as i16))
        }
    }

    #[inline]
    pub const fn get(self) -> i16 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Number) -> Result<Number, OutOfRange> {
        Self::from_wide(self.0 as i32 + rhs.0 as i32)
    }

    pub fn checked_sub(self, rhs: Number) -> Result<Number, OutOfRange> {
        Self::from_wide(self.0 as i32 - rhs.0 as i32)
    }

    pub fn increment(self) -> Result<Number, OutOfRange> {
        Self::from_wide(self.0 as i32 + 1)
    }

    pub fn decrement(self) -> Result<Number, OutOfRange> {
        Self::from_wide(self.0 as i32 - 1)
    }
}

impl TryFrom<i16> for Number {
    type Error = HrmError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Number::new(value)
    }
}

impl From<Number> for i16 {
    fn from(n: Number) -> Self {
        n.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uppercase letter held by the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Character(u8);

impl Character {
    /// Create a character, rejecting anything but `A`..=`Z`
    pub fn new(c: char) -> Result<Self, HrmError> {
        if c.is_ascii_uppercase() {
            Ok(Character(c as u8))
        } else {
            Err(HrmError::InvalidCharacter(c))
        }
    }

    #[inline]
    pub const fn get(self) -> char {
        self.0 as char
    }
}

impl TryFrom<char> for Character {
    type Error = HrmError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Character::new(c)
    }
}

impl From<Character> for char {
    fn from(c: Character) -> Self {
        c.get()
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Tagged machine value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Nothing held. Also the state of an uninitialized floor tile.
    #[default]
    Empty,
    /// Signed number in -999..=999
    Number(Number),
    /// Uppercase letter
    Character(Character),
    /// Floor tile index (0-based)
    MemoryAddress(usize),
    /// Instruction index: 1-based as authored, 0-based inside a `Program`
    ProgramAddress(usize),
}

/// Variant tag of a [`Value`], without payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Empty,
    Number,
    Character,
    MemoryAddress,
    ProgramAddress,
}

impl Value {
    /// Build a range-checked number value
    pub fn number(n: i16) -> Result<Self, HrmError> {
        Number::new(n).map(Value::Number)
    }

    /// Build a range-checked character value
    pub fn character(c: char) -> Result<Self, HrmError> {
        Character::new(c).map(Value::Character)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Number(_) => ValueKind::Number,
            Value::Character(_) => ValueKind::Character,
            Value::MemoryAddress(_) => ValueKind::MemoryAddress,
            Value::ProgramAddress(_) => ValueKind::ProgramAddress,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Numeric payload, failing for anything that is not a `Number`
    pub fn as_number(&self) -> Result<Number, HrmError> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(HrmError::NotANumber { found: other.kind() }),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Character> for Value {
    fn from(c: Character) -> Self {
        Value::Character(c)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "_"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Character(c) => write!(f, "{}", c),
            Value::MemoryAddress(a) => write!(f, "[{}]", a),
            Value::ProgramAddress(a) => write!(f, "@{}", a),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Empty => "empty",
            ValueKind::Number => "number",
            ValueKind::Character => "character",
            ValueKind::MemoryAddress => "memory address",
            ValueKind::ProgramAddress => "program address",
        };
        f.write_str(name)
    }
}
