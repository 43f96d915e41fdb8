/// Constants used throughout the VM implementation
pub mod constants;

/// Memory implementation for VM memory management
pub mod memory;

/// Opcode and parameter mode definitions
pub mod opcodes;

/// Core virtual machine implementation
pub mod vm;
