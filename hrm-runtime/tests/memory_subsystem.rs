//! Integration tests for the memory subsystem
//!
//! Tests the floor, address resolution and the all-or-nothing behaviour of
//! memory instructions through the public execute API.

use hrm_runtime::execute::execute;
use hrm_runtime::{ErrorKind, IOHandler, MemoryBank, QueueInbox, RuntimeError, VMState};
use hrm_spec::{Instruction, Room, Value};

fn num(n: i16) -> Value {
    Value::number(n).unwrap()
}

fn letter(c: char) -> Value {
    Value::character(c).unwrap()
}

/// Floor: [0]=3  [1]='K'  [2]=999  [3]=-999  [4]=empty  [5]=7
fn floor() -> MemoryBank {
    let room = Room::new(6)
        .with_cell(0, num(3))
        .unwrap()
        .with_cell(1, letter('K'))
        .unwrap()
        .with_cell(2, num(999))
        .unwrap()
        .with_cell(3, num(-999))
        .unwrap()
        .with_cell(5, num(7))
        .unwrap();
    MemoryBank::from_room(&room)
}

/// Run one instruction with `hands`, expecting a fault; check nothing moved
fn assert_fault(instr: Instruction, hands: Value, expected: ErrorKind) {
    let mut state = VMState::new();
    state.hands = hands;
    let mut memory = floor();
    let mut io = IOHandler::new(QueueInbox::new(vec![]));

    let before = memory.clone();
    match execute(&instr, &mut state, &mut memory, &mut io) {
        Err(RuntimeError::Trap(kind)) => assert_eq!(kind, expected, "{}", instr),
        other => panic!("{}: expected {:?}, got {:?}", instr, expected, other),
    }

    assert_eq!(memory.cells(), before.cells(), "{} changed memory", instr);
    assert_eq!(state.hands, hands, "{} changed hands", instr);
    assert_eq!(state.pc, 0, "{} moved the pc", instr);
    assert!(io.outputs().is_empty());
}

/// Run one instruction with `hands`, expecting success
fn run_ok(instr: Instruction, hands: Value) -> (VMState, MemoryBank) {
    let mut state = VMState::new();
    state.hands = hands;
    let mut memory = floor();
    let mut io = IOHandler::new(QueueInbox::new(vec![]));
    execute(&instr, &mut state, &mut memory, &mut io).unwrap();
    (state, memory)
}

// ============================================================================
// Floor Layout
// ============================================================================

#[test]
fn test_floor_from_room() {
    let memory = floor();
    assert_eq!(memory.len(), 6);
    assert_eq!(memory.get(1).unwrap(), letter('K'));
    assert_eq!(memory.get(4).unwrap(), Value::Empty);
}

#[test]
fn test_floor_bounds_are_fatal_not_traps() {
    let mut memory = floor();
    assert!(matches!(
        memory.get(6),
        Err(RuntimeError::MemoryIndexOutOfBounds { index: 6, len: 6 })
    ));
    assert!(matches!(
        memory.set(100, num(1)),
        Err(RuntimeError::MemoryIndexOutOfBounds { index: 100, len: 6 })
    ));
    assert_eq!(memory.len(), 6);
}

// ============================================================================
// Successful Memory Instructions
// ============================================================================

#[test]
fn test_copy_to_empties_hands() {
    let (state, memory) = run_ok(Instruction::copy_to(4), letter('Q'));
    assert_eq!(memory.get(4).unwrap(), letter('Q'));
    assert_eq!(state.hands, Value::Empty);
    assert_eq!(state.pc, 1);
}

#[test]
fn test_indirect_through_tile_zero() {
    // Tile 0 holds 3, which points at -999
    let (state, _) = run_ok(Instruction::copy_from_indirect(0), Value::Empty);
    assert_eq!(state.hands, num(-999));

    let (state, _) = run_ok(Instruction::sub_indirect(0), num(-1));
    assert_eq!(state.hands, num(998));

    let (state, memory) = run_ok(Instruction::bump_up_indirect(0), Value::Empty);
    assert_eq!(memory.get(3).unwrap(), num(-998));
    assert_eq!(state.hands, num(-998));
}

#[test]
fn test_bump_down_overwrites_hands() {
    let (state, memory) = run_ok(Instruction::bump_down(5), letter('A'));
    assert_eq!(memory.get(5).unwrap(), num(6));
    assert_eq!(state.hands, num(6));
}

// ============================================================================
// Faults Leave Everything Untouched
// ============================================================================

#[test]
fn test_address_faults() {
    assert_fault(Instruction::copy_from(6), Value::Empty, ErrorKind::DirectAddressOutOfRange);
    assert_fault(Instruction::copy_to(6), num(1), ErrorKind::DirectAddressOutOfRange);
    assert_fault(Instruction::add_indirect(1), num(1), ErrorKind::InvalidDirectAddressType);
    assert_fault(Instruction::sub_indirect(2), num(1), ErrorKind::DirectAddressOutOfRange);
    assert_fault(Instruction::bump_up_indirect(3), Value::Empty, ErrorKind::DirectAddressOutOfRange);
    assert_fault(Instruction::bump_down_indirect(4), Value::Empty, ErrorKind::InvalidDirectAddressType);
    assert_fault(Instruction::copy_from_indirect(9), Value::Empty, ErrorKind::IndirectAddressOutOfRange);
}

#[test]
fn test_type_faults() {
    assert_fault(Instruction::copy_from(4), num(1), ErrorKind::ReadingEmptyCell);
    assert_fault(Instruction::copy_to(0), Value::Empty, ErrorKind::EmptyHands);
    assert_fault(Instruction::add(0), letter('B'), ErrorKind::BadAddendTypeInHands);
    assert_fault(Instruction::add(1), num(1), ErrorKind::BadAddendTypeInMemory);
    assert_fault(Instruction::sub(0), Value::Empty, ErrorKind::BadSubtrahendTypeInHands);
    assert_fault(Instruction::sub(4), num(1), ErrorKind::BadSubtrahendTypeInMemory);
    assert_fault(Instruction::bump_up(1), num(1), ErrorKind::BadTypeForBumpInMemory);
    assert_fault(Instruction::bump_down(4), num(1), ErrorKind::BadTypeForBumpInMemory);
}

#[test]
fn test_range_faults() {
    assert_fault(Instruction::add(2), num(1), ErrorKind::Overflow);
    assert_fault(Instruction::add(3), num(-1), ErrorKind::Underflow);
    assert_fault(Instruction::sub(3), num(1), ErrorKind::Overflow);
    assert_fault(Instruction::sub(2), num(-1), ErrorKind::Underflow);
    assert_fault(Instruction::bump_up(2), Value::Empty, ErrorKind::Overflow);
    assert_fault(Instruction::bump_down(3), Value::Empty, ErrorKind::Underflow);
}

#[test]
fn test_hands_checked_before_address() {
    // Bad hands and a bad address: the hands fault wins
    assert_fault(Instruction::add(100), letter('Z'), ErrorKind::BadAddendTypeInHands);
    assert_fault(Instruction::copy_to(100), Value::Empty, ErrorKind::EmptyHands);
}
