//! Cross-module interaction tests
//!
//! Tests the integration between the program model in hrm-spec and the
//! runtime: serialized programs and rooms, validation errors crossing the
//! crate boundary, and the address validators against real rooms.

use hrm_runtime::{run, validate_direct, validate_indirect, ErrorKind, MemoryBank, RuntimeError};
use hrm_spec::{HrmError, Instruction, Opcode, Program, Room, Value};
use hrm_tests::{countdown, lookup_table, numbers, rainy_summer};

fn num(n: i16) -> Value {
    Value::number(n).unwrap()
}

// ============================================================================
// Serialized Program -> Runtime Tests
// ============================================================================

#[test]
fn test_deserialized_program_runs_identically() {
    let puzzle = countdown().unwrap();
    let bytes = bincode::serialize(&puzzle.program).unwrap();
    let loaded: Program = bincode::deserialize(&bytes).unwrap();

    assert_eq!(loaded, puzzle.program);

    let original = run(puzzle.program, &puzzle.room, puzzle.inbox.clone()).unwrap();
    let reloaded = run(loaded, &puzzle.room, puzzle.inbox).unwrap();
    assert_eq!(original.outputs, reloaded.outputs);
    assert_eq!(original.instructions_executed, reloaded.instructions_executed);
    assert_eq!(original.halt_reason, reloaded.halt_reason);
}

#[test]
fn test_deserialized_room_runs_identically() {
    let puzzle = lookup_table().unwrap();
    let bytes = bincode::serialize(&puzzle.room).unwrap();
    let room: Room = bincode::deserialize(&bytes).unwrap();
    assert_eq!(room, puzzle.room);

    let result = run(puzzle.program, &room, puzzle.inbox).unwrap();
    assert_eq!(result.outputs.len(), 3);
}

#[test]
fn test_serialized_form_uses_authored_targets() {
    // Serialized programs carry 1-based targets
    let puzzle = rainy_summer().unwrap();
    let authored = puzzle.program.to_authored();
    let bytes = bincode::serialize(&authored).unwrap();
    let from_authored: Program = bincode::deserialize(&bytes).unwrap();

    assert_eq!(from_authored, puzzle.program);
    assert_eq!(puzzle.program.get(5).unwrap().target(), Some(0));
    assert_eq!(authored[5].target(), Some(1));
}

#[test]
fn test_deserialize_rejects_dangling_jump() {
    let bytes = bincode::serialize(&vec![Instruction::inbox(), Instruction::jump(3)]).unwrap();
    assert!(bincode::deserialize::<Program>(&bytes).is_err());
}

#[test]
fn test_deserialize_rejects_room_cell_off_floor() {
    #[derive(serde::Serialize)]
    struct WireRoom {
        size: usize,
        cells: std::collections::BTreeMap<usize, Value>,
    }

    let mut cells = std::collections::BTreeMap::new();
    cells.insert(4, num(1));
    let bytes = bincode::serialize(&WireRoom { size: 4, cells }).unwrap();
    assert!(bincode::deserialize::<Room>(&bytes).is_err());
}

#[test]
fn test_deserialize_rejects_mismatched_parameter() {
    #[derive(serde::Serialize)]
    struct WireInstruction {
        opcode: Opcode,
        param: Option<Value>,
    }

    let bytes = bincode::serialize(&WireInstruction {
        opcode: Opcode::CopyTo,
        param: Some(Value::ProgramAddress(1)),
    })
    .unwrap();
    assert!(bincode::deserialize::<Instruction>(&bytes).is_err());

    let bytes = bincode::serialize(&WireInstruction {
        opcode: Opcode::CopyTo,
        param: Some(Value::MemoryAddress(1)),
    })
    .unwrap();
    assert_eq!(bincode::deserialize::<Instruction>(&bytes).unwrap(), Instruction::copy_to(1));
}

// ============================================================================
// Error Boundary Tests
// ============================================================================

#[test]
fn test_spec_error_converts_to_runtime_error() {
    let err = Value::number(1000).unwrap_err();
    assert_eq!(err, HrmError::InvalidNumber(1000));

    let runtime: RuntimeError = err.into();
    assert!(matches!(runtime, RuntimeError::SpecError(HrmError::InvalidNumber(1000))));
}

#[test]
fn test_trap_converts_from_error_kind() {
    let runtime: RuntimeError = ErrorKind::Overflow.into();
    assert!(matches!(runtime, RuntimeError::Trap(ErrorKind::Overflow)));
}

#[test]
fn test_instruction_parameter_checked_before_runtime() {
    let err = Instruction::new(Opcode::Jump, None).unwrap_err();
    assert!(matches!(err, HrmError::ParameterMismatch { opcode: Opcode::Jump, .. }));

    let err = Instruction::new(Opcode::Inbox, Some(Value::MemoryAddress(0))).unwrap_err();
    assert!(matches!(err, HrmError::ParameterMismatch { opcode: Opcode::Inbox, .. }));
}

// ============================================================================
// Room -> Address Validation Tests
// ============================================================================

#[test]
fn test_validators_against_room_layout() {
    let room = Room::new(4)
        .with_cell(0, num(3))
        .unwrap()
        .with_cell(1, Value::character('X').unwrap())
        .unwrap()
        .with_cell(2, num(-1))
        .unwrap();
    let bank = MemoryBank::from_room(&room);

    assert_eq!(validate_direct(&Value::MemoryAddress(3), &bank), Ok(3));
    assert_eq!(validate_indirect(&Value::MemoryAddress(0), &bank), Ok(3));
    assert_eq!(
        validate_indirect(&Value::MemoryAddress(1), &bank),
        Err(ErrorKind::InvalidDirectAddressType)
    );
    assert_eq!(
        validate_indirect(&Value::MemoryAddress(2), &bank),
        Err(ErrorKind::DirectAddressOutOfRange)
    );
    assert_eq!(
        validate_indirect(&Value::MemoryAddress(3), &bank),
        Err(ErrorKind::InvalidDirectAddressType)
    );
    assert_eq!(
        validate_indirect(&Value::MemoryAddress(4), &bank),
        Err(ErrorKind::IndirectAddressOutOfRange)
    );
}

#[test]
fn test_instruction_address_beyond_room_faults() {
    let program = Program::new(vec![Instruction::inbox(), Instruction::copy_to(5)]).unwrap();
    let result = run(program, &Room::new(5), numbers(&[1]).unwrap()).unwrap();

    assert_eq!(result.error(), Some((ErrorKind::DirectAddressOutOfRange, 1)));
    assert!(result.memory.cells().iter().all(Value::is_empty));
}

#[test]
fn test_indirect_write_through_pointer() {
    let room = Room::new(6).with_cell(0, num(5)).unwrap();
    let program = Program::new(vec![
        Instruction::inbox(),
        Instruction::copy_to_indirect(0),
        Instruction::bump_up_indirect(0),
        Instruction::outbox(),
    ])
    .unwrap();
    let result = run(program, &room, numbers(&[41]).unwrap()).unwrap();

    assert_eq!(result.outputs, vec![num(42)]);
    assert_eq!(result.memory.get(5).unwrap(), num(42));
    assert_eq!(result.memory.get(0).unwrap(), num(5));
}

#[test]
fn test_program_listing_matches_authored_form() {
    let puzzle = lookup_table().unwrap();
    let listing = puzzle.program.to_string();
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "  1: INBOX");
    assert_eq!(lines[1], "  2: COPYTO 9");
    assert_eq!(lines[2], "  3: COPYFROM [9]");
    assert_eq!(lines[4], "  5: JUMP 1");
}
