//! Virtual Machine implementation for Intcode execution.
//!
//! This module provides the core [`Interpreter`] struct and its execution logic,
//! organized into submodules for better maintainability.

mod core;
mod execution;

/// Opcode handlers organized by category.
pub mod handlers;

pub use self::core::Interpreter;
pub use execution::{ExecutionResult, ExecutionStatus, Signal, Step};
