//! Intcode opcode handlers organized by category.
//!
//! Each handler resolves every operand before mutating anything, so a failing instruction
//! leaves the interpreter untouched.

/// Arithmetic operations: ADD, MUL
pub mod arithmetic;

/// Comparison operations: LT, EQ
pub mod comparison;

/// Control flow: JNZ, JZ, ARB, HALT
pub mod control;

/// Input and output: IN, OUT
pub mod io;
