use std::path::Path;

use derive_builder::Builder;
use intcode_common::program::{parse_program, read_program};

/// Arguments for [`disassemble`](crate::disassemble).
#[derive(Debug, Clone, Builder)]
pub struct DisassemblerArgs {
    /// The target to disassemble, either a path to a program file or the program text itself.
    pub target: String,

    /// Whether to use base-10 for the instruction counter.
    pub decimal_counter: bool,
}

impl DisassemblerArgs {
    /// Loads the target program, reading it from disk if `target` names an existing file.
    pub(crate) fn get_program(&self) -> Result<Vec<i64>, intcode_common::Error> {
        if Path::new(&self.target).is_file() {
            read_program(&self.target)
        } else {
            parse_program(&self.target)
        }
    }
}

impl DisassemblerArgsBuilder {
    /// Creates a builder with every field set to its default.
    pub fn new() -> Self {
        Self { target: Some(String::new()), decimal_counter: Some(false) }
    }
}
