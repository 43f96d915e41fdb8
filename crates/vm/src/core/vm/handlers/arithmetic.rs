use crate::{
    core::{opcodes::InstructionWord, vm::Signal},
    error::Error,
};

use super::super::core::Interpreter;

/// ADD - Addition operation
pub fn add(vm: &mut Interpreter, decoded: &InstructionWord) -> Result<Signal, Error> {
    let a = vm.read_operand(decoded, 0)?;
    let b = vm.read_operand(decoded, 1)?;
    let result = a.checked_add(b).ok_or_else(|| vm.overflow())?;
    let target = vm.write_target(decoded)?;
    vm.memory.store(target, result)?;
    vm.advance(decoded);
    Ok(Signal::Continue)
}

/// MUL - Multiplication operation
pub fn multiply(vm: &mut Interpreter, decoded: &InstructionWord) -> Result<Signal, Error> {
    let a = vm.read_operand(decoded, 0)?;
    let b = vm.read_operand(decoded, 1)?;
    let result = a.checked_mul(b).ok_or_else(|| vm.overflow())?;
    let target = vm.write_target(decoded)?;
    vm.memory.store(target, result)?;
    vm.advance(decoded);
    Ok(Signal::Continue)
}
