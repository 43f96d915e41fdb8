use crate::{
    core::{opcodes::InstructionWord, vm::Signal},
    error::Error,
};

use super::super::core::Interpreter;

/// LT - Less-than comparison
pub fn less_than(vm: &mut Interpreter, decoded: &InstructionWord) -> Result<Signal, Error> {
    let a = vm.read_operand(decoded, 0)?;
    let b = vm.read_operand(decoded, 1)?;
    let target = vm.write_target(decoded)?;
    vm.memory.store(target, i64::from(a < b))?;
    vm.advance(decoded);
    Ok(Signal::Continue)
}

/// EQ - Equality comparison
pub fn equals(vm: &mut Interpreter, decoded: &InstructionWord) -> Result<Signal, Error> {
    let a = vm.read_operand(decoded, 0)?;
    let b = vm.read_operand(decoded, 1)?;
    let target = vm.write_target(decoded)?;
    vm.memory.store(target, i64::from(a == b))?;
    vm.advance(decoded);
    Ok(Signal::Continue)
}

#[cfg(test)]
mod tests {
    use crate::core::vm::Interpreter;

    fn run(program: &[i64], input: i64) -> Vec<i64> {
        Interpreter::load(program).run_with_inputs([input]).expect("execution failed")
    }

    #[test]
    fn test_equals_position_mode() {
        let program = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
        assert_eq!(run(&program, 8), vec![1]);
        assert_eq!(run(&program, 7), vec![0]);
    }

    #[test]
    fn test_less_than_position_mode() {
        let program = [3, 9, 7, 9, 10, 9, 4, 9, 99, -1, 8];
        assert_eq!(run(&program, 5), vec![1]);
        assert_eq!(run(&program, 8), vec![0]);
    }

    #[test]
    fn test_equals_immediate_mode() {
        let program = [3, 3, 1108, -1, 8, 3, 4, 3, 99];
        assert_eq!(run(&program, 8), vec![1]);
        assert_eq!(run(&program, -8), vec![0]);
    }

    #[test]
    fn test_less_than_immediate_mode() {
        let program = [3, 3, 1107, -1, 8, 3, 4, 3, 99];
        assert_eq!(run(&program, 7), vec![1]);
        assert_eq!(run(&program, 9), vec![0]);
    }
}
