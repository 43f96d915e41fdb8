use std::fmt::{self, Display};

/// The addressing mode of a single operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterMode {
    /// The operand is an address; the effective value is `memory[operand]`.
    #[default]
    Position,

    /// The operand is the value itself. Never valid for write targets.
    Immediate,

    /// The operand is an offset from the relative base; the effective value is
    /// `memory[operand + relative_base]`.
    Relative,
}

impl ParameterMode {
    /// Returns the digit that encodes this mode.
    pub const fn digit(self) -> i64 {
        match self {
            ParameterMode::Position => 0,
            ParameterMode::Immediate => 1,
            ParameterMode::Relative => 2,
        }
    }

    /// Formats a raw operand the way the disassembler shows it in this mode.
    ///
    /// ```
    /// use intcode_vm::core::opcodes::ParameterMode;
    ///
    /// assert_eq!(ParameterMode::Position.render(12), "[12]");
    /// assert_eq!(ParameterMode::Immediate.render(-3), "#-3");
    /// assert_eq!(ParameterMode::Relative.render(4), "[rb+4]");
    /// assert_eq!(ParameterMode::Relative.render(-4), "[rb-4]");
    /// ```
    pub fn render(self, operand: i64) -> String {
        match self {
            ParameterMode::Position => format!("[{operand}]"),
            ParameterMode::Immediate => format!("#{operand}"),
            ParameterMode::Relative if operand < 0 => format!("[rb{operand}]"),
            ParameterMode::Relative => format!("[rb+{operand}]"),
        }
    }
}

impl TryFrom<i64> for ParameterMode {
    type Error = i64;

    fn try_from(digit: i64) -> Result<Self, Self::Error> {
        match digit {
            0 => Ok(ParameterMode::Position),
            1 => Ok(ParameterMode::Immediate),
            2 => Ok(ParameterMode::Relative),
            _ => Err(digit),
        }
    }
}

impl Display for ParameterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterMode::Position => write!(f, "position"),
            ParameterMode::Immediate => write!(f, "immediate"),
            ParameterMode::Relative => write!(f, "relative"),
        }
    }
}
