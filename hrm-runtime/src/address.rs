//! Address validation
//!
//! Every memory-touching instruction resolves its parameter to a tile index
//! here before it reads or writes anything.
//!
//! Indirect addressing is two-stage: the parameter must be a valid index
//! (checked with the indirect error codes) before the pointer tile is read,
//! and the pointer tile's contents must then pass the direct checks.

use crate::error::ErrorKind;
use crate::memory::MemoryBank;
use hrm_spec::Value;

/// Numeric payload of anything that may serve as an address
fn address_payload(param: &Value) -> Option<i64> {
    match param {
        Value::Number(n) => Some(n.get() as i64),
        Value::MemoryAddress(a) => Some(i64::try_from(*a).unwrap_or(i64::MAX)),
        _ => None,
    }
}

fn in_bank(index: i64, bank: &MemoryBank) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < bank.len())
}

/// Resolve a direct address to a tile index
pub fn validate_direct(param: &Value, bank: &MemoryBank) -> Result<usize, ErrorKind> {
    let index = address_payload(param).ok_or(ErrorKind::InvalidDirectAddressType)?;
    in_bank(index, bank).ok_or(ErrorKind::DirectAddressOutOfRange)
}

/// Resolve an indirect address to the tile index stored in the pointer tile
pub fn validate_indirect(param: &Value, bank: &MemoryBank) -> Result<usize, ErrorKind> {
    let index = address_payload(param).ok_or(ErrorKind::InvalidIndirectAddressType)?;
    let pointer = in_bank(index, bank).ok_or(ErrorKind::IndirectAddressOutOfRange)?;
    let inner = bank.cells()[pointer];
    validate_direct(&inner, bank)
}

/// Resolve a parameter using the given addressing mode
pub fn resolve(param: &Value, indirect: bool, bank: &MemoryBank) -> Result<usize, ErrorKind> {
    if indirect {
        validate_indirect(param, bank)
    } else {
        validate_direct(param, bank)
    }
}
