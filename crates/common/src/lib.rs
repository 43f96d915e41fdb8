//! Common utilities, constants, and resources used across the intcode workspace.
//!
//! This crate provides shared functionality for the intcode toolkit, including
//! the textual program loader and general file utilities.

/// Constants used throughout the intcode workspace.
pub mod constants;

/// Error types for the common module
pub mod error;

/// Loading and rendering of the comma-separated program encoding.
pub mod program;

/// General utility functions and types for common tasks.
pub mod utils;

pub use error::Error;
