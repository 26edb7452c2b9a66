//! Shared puzzle fixtures for the end-to-end suites in `tests/`.
//!
//! Each puzzle is a program, the room it runs in and a sample inbox. Jump
//! targets are written the way the game lists them (1-based).

use hrm_spec::{HrmError, Instruction, Program, Room, Value};

/// A program together with the room and inbox it is meant for
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub name: &'static str,
    pub program: Program,
    pub room: Room,
    pub inbox: Vec<Value>,
}

/// Numbers as inbox values
pub fn numbers(values: &[i16]) -> Result<Vec<Value>, HrmError> {
    values.iter().map(|&n| Value::number(n)).collect()
}

/// Letters as inbox values
pub fn letters(text: &str) -> Result<Vec<Value>, HrmError> {
    text.chars().map(Value::character).collect()
}

/// Send every item from the inbox to the outbox
pub fn busy_mail_room() -> Result<Puzzle, HrmError> {
    Ok(Puzzle {
        name: "Busy Mail Room",
        program: Program::new(vec![
            Instruction::inbox(),
            Instruction::outbox(),
            Instruction::jump(1),
        ])?,
        room: Room::new(0),
        inbox: letters("BOOTSEQUENCE")?,
    })
}

/// Output only the zeros. The sample inbox carries a letter, which
/// JUMPZ refuses to test.
pub fn zero_preservation_initiative() -> Result<Puzzle, HrmError> {
    let mut inbox = numbers(&[7, 0, 5])?;
    inbox.push(Value::character('D')?);
    inbox.extend(numbers(&[0, 0, 0, 0])?);

    Ok(Puzzle {
        name: "Zero Preservation Initiative",
        program: Program::new(vec![
            Instruction::inbox(),
            Instruction::jump_if_zero(4),
            Instruction::jump(1),
            Instruction::outbox(),
            Instruction::jump(1),
        ])?,
        room: Room::new(9),
        inbox,
    })
}

/// Add each pair of inputs and output the sum
pub fn rainy_summer() -> Result<Puzzle, HrmError> {
    Ok(Puzzle {
        name: "Rainy Summer",
        program: Program::new(vec![
            Instruction::inbox(),
            Instruction::copy_to(0),
            Instruction::inbox(),
            Instruction::add(0),
            Instruction::outbox(),
            Instruction::jump(1),
        ])?,
        room: Room::new(3),
        inbox: numbers(&[6, 2, -3, 8, 0, 0, 500, 499])?,
    })
}

/// For each input, output it and every number between it and zero
pub fn countdown() -> Result<Puzzle, HrmError> {
    Ok(Puzzle {
        name: "Countdown",
        program: Program::new(vec![
            Instruction::inbox(),
            Instruction::copy_to(0),
            Instruction::copy_from(0),
            Instruction::outbox(),
            Instruction::copy_from(0),
            Instruction::jump_if_zero(1),
            Instruction::jump_if_negative(10),
            Instruction::bump_down(0),
            Instruction::jump(3),
            Instruction::bump_up(0),
            Instruction::jump(3),
        ])?,
        room: Room::new(10),
        inbox: numbers(&[3, -2, 0])?,
    })
}

/// Each input is a tile number; output the letter stored on that tile
pub fn lookup_table() -> Result<Puzzle, HrmError> {
    let room = "ABCDE"
        .chars()
        .enumerate()
        .try_fold(Room::new(10), |room, (i, c)| room.with_cell(i, Value::character(c)?))?;

    Ok(Puzzle {
        name: "Lookup Table",
        program: Program::new(vec![
            Instruction::inbox(),
            Instruction::copy_to(9),
            Instruction::copy_from_indirect(9),
            Instruction::outbox(),
            Instruction::jump(1),
        ])?,
        room,
        inbox: numbers(&[2, 0, 4])?,
    })
}
