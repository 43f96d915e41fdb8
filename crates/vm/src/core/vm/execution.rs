use serde::{Deserialize, Serialize};

use crate::core::{
    constants::MAX_OPERANDS,
    opcodes::{Opcode, ParameterMode},
};

/// [`ExecutionStatus`] is where the interpreter stands between calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// The interpreter can execute its next instruction.
    #[default]
    Running,

    /// An input instruction found the queue empty. The instruction pointer still points at it.
    PausedOnInput,

    /// An output value is ready. The instruction pointer is already past the output instruction.
    PausedOnOutput,

    /// A halt instruction was executed. Terminal.
    Halted,
}

/// [`Signal`] is what a single operation reports back to the dispatch loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The operation completed and execution may continue.
    Continue,

    /// The operation produced an output value.
    Output(i64),

    /// The operation needs input but the queue is empty. Nothing was mutated.
    NeedInput,

    /// The operation halted the interpreter.
    Halt,
}

/// [`Step`] is a single executed (or attempted) instruction. It is returned by
/// [`Interpreter::step`](super::Interpreter::step).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// The address of the instruction word.
    pub address: usize,

    /// The decoded operation.
    pub opcode: Opcode,

    /// Parameter modes, padded past the opcode's operand count.
    pub(crate) modes: [ParameterMode; MAX_OPERANDS],

    /// Raw operand words, padded past the opcode's operand count.
    pub(crate) operands: [i64; MAX_OPERANDS],

    /// What the operation reported.
    pub signal: Signal,
}

impl Step {
    /// The parameter mode of each operand.
    pub fn modes(&self) -> &[ParameterMode] {
        &self.modes[..self.opcode.info().operands() as usize]
    }

    /// The raw operand words, as they were before the instruction executed.
    pub fn operands(&self) -> &[i64] {
        &self.operands[..self.opcode.info().operands() as usize]
    }
}

/// [`ExecutionResult`] is the result of running an interpreter until it can no longer make
/// progress on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Every value output during the run, in order.
    pub outputs: Vec<i64>,

    /// The status the run stopped in, either `PausedOnInput` or `Halted`.
    pub status: ExecutionStatus,

    /// The instruction pointer after the run.
    pub instruction: usize,

    /// The number of instructions executed during the run.
    pub steps: u64,
}
