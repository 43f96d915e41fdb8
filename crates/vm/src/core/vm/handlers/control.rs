use crate::{
    core::{opcodes::InstructionWord, vm::Signal},
    error::{Error, OperandFault},
};

use super::super::core::Interpreter;

/// Moves the instruction pointer to `target`, or past the instruction when `condition` is false.
fn jump(
    vm: &mut Interpreter,
    decoded: &InstructionWord,
    condition: bool,
    target: i64,
) -> Result<Signal, Error> {
    if condition {
        vm.instruction = usize::try_from(target)
            .map_err(|_| vm.invalid_operand(OperandFault::NegativeJump(target)))?;
    } else {
        vm.advance(decoded);
    }
    Ok(Signal::Continue)
}

/// JNZ - Jump to the target if the value is non-zero
pub fn jump_if_true(vm: &mut Interpreter, decoded: &InstructionWord) -> Result<Signal, Error> {
    let value = vm.read_operand(decoded, 0)?;
    let target = vm.read_operand(decoded, 1)?;
    jump(vm, decoded, value != 0, target)
}

/// JZ - Jump to the target if the value is zero
pub fn jump_if_false(vm: &mut Interpreter, decoded: &InstructionWord) -> Result<Signal, Error> {
    let value = vm.read_operand(decoded, 0)?;
    let target = vm.read_operand(decoded, 1)?;
    jump(vm, decoded, value == 0, target)
}

/// ARB - Adjust the relative base
pub fn adjust_relative_base(
    vm: &mut Interpreter,
    decoded: &InstructionWord,
) -> Result<Signal, Error> {
    let offset = vm.read_operand(decoded, 0)?;
    vm.relative_base = vm.relative_base.checked_add(offset).ok_or_else(|| vm.overflow())?;
    vm.advance(decoded);
    Ok(Signal::Continue)
}

/// HALT - Stops execution. The instruction pointer stays on the halt instruction.
pub fn halt() -> Signal {
    Signal::Halt
}
