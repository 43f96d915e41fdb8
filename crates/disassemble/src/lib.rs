//! The Disassembler module converts an Intcode program image into a human-readable listing
//! of instructions.
//!
//! Words that decode as instructions are printed with their mnemonic and mode-annotated
//! operands. Everything else is printed as `DATA`.

/// Error types for the disassembler module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::disassemble;
pub use error::Error;
pub use interfaces::{DisassemblerArgs, DisassemblerArgsBuilder};
