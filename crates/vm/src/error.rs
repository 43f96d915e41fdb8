//! Error types for the VM

/// The reason an operand could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OperandFault {
    /// A write target was encoded in immediate mode
    #[error("write target in immediate mode")]
    ImmediateWrite,

    /// The operand resolved to a negative memory address
    #[error("negative address {0}")]
    NegativeAddress(i64),

    /// A jump operand resolved to a negative instruction pointer
    #[error("negative jump target {0}")]
    NegativeJump(i64),
}

/// Errors that can occur while loading or executing an Intcode program
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The decoded opcode has no matching operation
    #[error("invalid opcode {opcode} at address {address}")]
    InvalidOpcode {
        /// The offending instruction word
        opcode: i64,
        /// Address of the instruction
        address: usize,
    },

    /// A parameter mode digit is not one of position, immediate, or relative
    #[error("invalid parameter mode {mode} at address {address}")]
    InvalidParameterMode {
        /// The offending mode digit
        mode: i64,
        /// Address of the instruction
        address: usize,
    },

    /// An operand of the instruction could not be resolved
    #[error("invalid operand at address {address}: {fault}")]
    InvalidOperand {
        /// Address of the instruction
        address: usize,
        /// What was wrong with the operand
        fault: OperandFault,
    },

    /// A caller addressed memory with a negative address
    #[error("invalid memory address {0}")]
    InvalidAddress(i64),

    /// Checked 64-bit arithmetic overflowed
    #[error("arithmetic overflow at address {address}")]
    ArithmeticOverflow {
        /// Address of the instruction
        address: usize,
    },

    /// A write exceeded the configured memory ceiling
    #[error("write to address {address} exceeds memory limit of {limit} words")]
    OutOfBounds {
        /// The address written to
        address: usize,
        /// The configured ceiling, in words
        limit: usize,
    },

    /// Memory could not be grown to back a write
    #[error("failed to allocate memory for address {address}")]
    MemoryExhausted {
        /// The address written to
        address: usize,
    },

    /// A step budget ran out before the interpreter paused or halted
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded {
        /// The exhausted budget
        limit: u64,
    },

    /// A pipeline stage waited for input from a stage that has already finished
    #[error("pipeline stage {stage} is waiting on a disconnected input")]
    Disconnected {
        /// Index of the starving stage
        stage: usize,
    },

    /// Every stage of a pipeline is waiting for input that no stage will produce
    #[error("pipeline stalled with every stage waiting for input")]
    PipelineStalled,

    /// The program could not be loaded
    #[error("failed to load program: {0}")]
    Load(#[from] intcode_common::Error),
}
