//! Intcode virtual machine implementation
//!
//! This crate provides a resumable interpreter for the Intcode instruction set, including the
//! core VM components and extension modules for driving one or more interpreters.

/// Core VM implementation, including memory, opcodes, and the interpreter itself
pub mod core;

/// Error types for the VM
pub mod error;

/// Extensions to the core VM, including step budgets, pipelines, and ASCII I/O helpers
pub mod ext;

pub use crate::{
    core::vm::{ExecutionResult, ExecutionStatus, Interpreter, Signal, Step},
    error::Error,
};
