//! Intcode opcodes and related utilities.
//!
//! This module provides functionality for working with Intcode opcodes, including:
//! - Opcode information (names, operand counts, write targets)
//! - Decoding of instruction words into an opcode and its parameter modes

/// Parameter modes and their decoding from instruction words.
pub mod modes;

pub use modes::ParameterMode;

use crate::{
    core::constants::{MAX_OPERANDS, MODE_BASE, OPCODE_DIVISOR},
    error::Error,
};

/// Information about an opcode, such as its name and the operands it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpCodeInfo {
    /// Name
    name: &'static str,
    /// Number of operand words following the instruction word.
    operands: u8,
    /// If the last operand is a write target.
    writes: bool,
}

impl OpCodeInfo {
    /// Creates a new opcode info with the given name and default values.
    pub const fn new(name: &'static str) -> Self {
        Self { name, operands: 0, writes: false }
    }

    /// Returns the name of the opcode.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of operand words.
    #[inline]
    pub const fn operands(&self) -> u8 {
        self.operands
    }

    /// Returns the width of the instruction in words, including the instruction word itself.
    #[inline]
    pub const fn width(&self) -> usize {
        self.operands as usize + 1
    }

    /// Returns whether the last operand is a write target.
    #[inline]
    pub const fn writes(&self) -> bool {
        self.writes
    }

    /// Returns the index of the write-target operand, if the opcode has one.
    #[inline]
    pub const fn write_operand(&self) -> Option<usize> {
        if self.writes {
            Some(self.operands as usize - 1)
        } else {
            None
        }
    }
}

/// Sets the number of operand words.
#[inline]
pub const fn operands(mut op: OpCodeInfo, operands: u8) -> OpCodeInfo {
    op.operands = operands;
    op
}

/// Marks the last operand as a write target.
#[inline]
pub const fn writes(mut op: OpCodeInfo) -> OpCodeInfo {
    op.writes = true;
    op
}

/// The closed set of Intcode operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opcode {
    /// `dst := a + b`
    Add,
    /// `dst := a * b`
    Multiply,
    /// `dst := next input`
    Input,
    /// `emit a`
    Output,
    /// jump to `target` if `a != 0`
    JumpIfTrue,
    /// jump to `target` if `a == 0`
    JumpIfFalse,
    /// `dst := a < b`
    LessThan,
    /// `dst := a == b`
    Equals,
    /// `relative_base += a`
    AdjustRelativeBase,
    /// stop execution
    Halt,
}

impl Opcode {
    /// Every opcode, in numeric order.
    pub const ALL: [Opcode; 10] = [
        Opcode::Add,
        Opcode::Multiply,
        Opcode::Input,
        Opcode::Output,
        Opcode::JumpIfTrue,
        Opcode::JumpIfFalse,
        Opcode::LessThan,
        Opcode::Equals,
        Opcode::AdjustRelativeBase,
        Opcode::Halt,
    ];

    /// Looks up the opcode for a two-digit selector.
    ///
    /// ```
    /// use intcode_vm::core::opcodes::Opcode;
    ///
    /// assert_eq!(Opcode::from_code(2), Some(Opcode::Multiply));
    /// assert_eq!(Opcode::from_code(42), None);
    /// ```
    pub const fn from_code(code: i64) -> Option<Opcode> {
        match code {
            1 => Some(Opcode::Add),
            2 => Some(Opcode::Multiply),
            3 => Some(Opcode::Input),
            4 => Some(Opcode::Output),
            5 => Some(Opcode::JumpIfTrue),
            6 => Some(Opcode::JumpIfFalse),
            7 => Some(Opcode::LessThan),
            8 => Some(Opcode::Equals),
            9 => Some(Opcode::AdjustRelativeBase),
            99 => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// Returns the two-digit selector of this opcode.
    pub const fn code(self) -> i64 {
        match self {
            Opcode::Add => 1,
            Opcode::Multiply => 2,
            Opcode::Input => 3,
            Opcode::Output => 4,
            Opcode::JumpIfTrue => 5,
            Opcode::JumpIfFalse => 6,
            Opcode::LessThan => 7,
            Opcode::Equals => 8,
            Opcode::AdjustRelativeBase => 9,
            Opcode::Halt => 99,
        }
    }

    /// Returns the static information for this opcode.
    pub const fn info(self) -> OpCodeInfo {
        match self {
            Opcode::Add => writes(operands(OpCodeInfo::new("ADD"), 3)),
            Opcode::Multiply => writes(operands(OpCodeInfo::new("MUL"), 3)),
            Opcode::Input => writes(operands(OpCodeInfo::new("IN"), 1)),
            Opcode::Output => operands(OpCodeInfo::new("OUT"), 1),
            Opcode::JumpIfTrue => operands(OpCodeInfo::new("JNZ"), 2),
            Opcode::JumpIfFalse => operands(OpCodeInfo::new("JZ"), 2),
            Opcode::LessThan => writes(operands(OpCodeInfo::new("LT"), 3)),
            Opcode::Equals => writes(operands(OpCodeInfo::new("EQ"), 3)),
            Opcode::AdjustRelativeBase => operands(OpCodeInfo::new("ARB"), 1),
            Opcode::Halt => OpCodeInfo::new("HALT"),
        }
    }
}

impl TryFrom<i64> for Opcode {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Opcode::from_code(code).ok_or(code)
    }
}

/// Returns the mnemonic for the opcode of an instruction word, or `unknown`.
///
/// ```
/// use intcode_vm::core::opcodes::opcode_name;
///
/// assert_eq!(opcode_name(1002), "MUL");
/// assert_eq!(opcode_name(0), "unknown");
/// ```
pub fn opcode_name(word: i64) -> &'static str {
    Opcode::from_code(word % OPCODE_DIVISOR).map(|opcode| opcode.info().name()).unwrap_or("unknown")
}

/// A decoded instruction word: the opcode plus one parameter mode per operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstructionWord {
    /// The raw instruction word.
    pub word: i64,

    /// The operation selected by the low two digits.
    pub opcode: Opcode,

    /// Parameter modes, least-significant digit first. Slots past the opcode's operand count
    /// are [`ParameterMode::Position`].
    pub modes: [ParameterMode; MAX_OPERANDS],
}

impl InstructionWord {
    /// Decodes the instruction word found at `address`.
    ///
    /// ```
    /// use intcode_vm::core::opcodes::{InstructionWord, Opcode, ParameterMode};
    ///
    /// let decoded = InstructionWord::decode(1002, 0).unwrap();
    /// assert_eq!(decoded.opcode, Opcode::Multiply);
    /// assert_eq!(
    ///     decoded.modes,
    ///     [ParameterMode::Position, ParameterMode::Immediate, ParameterMode::Position]
    /// );
    /// ```
    pub fn decode(word: i64, address: usize) -> Result<InstructionWord, Error> {
        if word < 0 {
            return Err(Error::InvalidOpcode { opcode: word, address });
        }

        let opcode = Opcode::from_code(word % OPCODE_DIVISOR)
            .ok_or(Error::InvalidOpcode { opcode: word, address })?;

        let mut digits = word / OPCODE_DIVISOR;
        let mut modes = [ParameterMode::Position; MAX_OPERANDS];
        for mode in modes.iter_mut().take(opcode.info().operands() as usize) {
            let digit = digits % MODE_BASE;
            *mode = ParameterMode::try_from(digit)
                .map_err(|mode| Error::InvalidParameterMode { mode, address })?;
            digits /= MODE_BASE;
        }

        Ok(InstructionWord { word, opcode, modes })
    }

    /// Returns the static information for the decoded opcode.
    pub const fn info(&self) -> OpCodeInfo {
        self.opcode.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_table() {
        for opcode in Opcode::ALL {
            assert_eq!(Opcode::from_code(opcode.code()), Some(opcode));
        }
    }

    #[test]
    fn test_write_targets() {
        let writers: Vec<Opcode> =
            Opcode::ALL.into_iter().filter(|opcode| opcode.info().writes()).collect();
        assert_eq!(
            writers,
            vec![Opcode::Add, Opcode::Multiply, Opcode::Input, Opcode::LessThan, Opcode::Equals]
        );
    }

    #[test]
    fn test_widths() {
        assert_eq!(Opcode::Add.info().width(), 4);
        assert_eq!(Opcode::Input.info().width(), 2);
        assert_eq!(Opcode::JumpIfFalse.info().width(), 3);
        assert_eq!(Opcode::Halt.info().width(), 1);
        assert_eq!(Opcode::Input.info().write_operand(), Some(0));
        assert_eq!(Opcode::Equals.info().write_operand(), Some(2));
        assert_eq!(Opcode::JumpIfTrue.info().write_operand(), None);
    }

    #[test]
    fn test_decode_relative_modes() {
        let decoded = InstructionWord::decode(21201, 0).expect("decode failed");
        assert_eq!(decoded.opcode, Opcode::Add);
        assert_eq!(
            decoded.modes,
            [ParameterMode::Relative, ParameterMode::Immediate, ParameterMode::Relative]
        );
    }

    #[test]
    fn test_decode_ignores_digits_past_operands() {
        let decoded = InstructionWord::decode(1199, 0).expect("decode failed");
        assert_eq!(decoded.opcode, Opcode::Halt);
        assert_eq!(decoded.modes, [ParameterMode::Position; MAX_OPERANDS]);
    }

    #[test]
    fn test_decode_unknown_opcode() {
        assert!(matches!(
            InstructionWord::decode(42, 7),
            Err(Error::InvalidOpcode { opcode: 42, address: 7 })
        ));
        assert!(matches!(
            InstructionWord::decode(0, 0),
            Err(Error::InvalidOpcode { opcode: 0, address: 0 })
        ));
    }

    #[test]
    fn test_decode_negative_word() {
        assert!(matches!(
            InstructionWord::decode(-1, 3),
            Err(Error::InvalidOpcode { opcode: -1, address: 3 })
        ));
    }

    #[test]
    fn test_decode_unknown_mode() {
        assert!(matches!(
            InstructionWord::decode(301, 5),
            Err(Error::InvalidParameterMode { mode: 3, address: 5 })
        ));
    }
}
