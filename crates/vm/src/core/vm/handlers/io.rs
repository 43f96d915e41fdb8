use crate::{
    core::{opcodes::InstructionWord, vm::Signal},
    error::Error,
};

use super::super::core::Interpreter;

/// IN - Consume the next queued input. Reports [`Signal::NeedInput`] without touching any state
/// when the queue is empty, so the instruction is retried from scratch on resume.
pub fn input(vm: &mut Interpreter, decoded: &InstructionWord) -> Result<Signal, Error> {
    let Some(&value) = vm.inputs.front() else {
        return Ok(Signal::NeedInput);
    };

    let target = vm.write_target(decoded)?;
    vm.memory.store(target, value)?;
    vm.inputs.pop_front();
    vm.advance(decoded);
    Ok(Signal::Continue)
}

/// OUT - Emit a value
pub fn output(vm: &mut Interpreter, decoded: &InstructionWord) -> Result<Signal, Error> {
    let value = vm.read_operand(decoded, 0)?;
    vm.advance(decoded);
    Ok(Signal::Output(value))
}
