use intcode_config::Configuration;
use tracing::warn;

use crate::{
    core::vm::{ExecutionResult, Interpreter, Signal},
    error::Error,
};

/// Like [`Interpreter::run_until_output_or_halt`], but fails with
/// [`Error::StepLimitExceeded`] if `max_steps` instructions execute without the interpreter
/// pausing or halting. A halted interpreter returns `Ok(None)` regardless of the budget.
///
/// ```
/// use intcode_vm::{ext::exec::run_with_budget, Error, Interpreter};
///
/// // jumps to itself forever
/// let mut vm = Interpreter::load(&[1105, 1, 0]);
/// assert!(matches!(run_with_budget(&mut vm, 100), Err(Error::StepLimitExceeded { limit: 100 })));
/// ```
pub fn run_with_budget(vm: &mut Interpreter, max_steps: u64) -> Result<Option<i64>, Error> {
    if vm.is_halted() {
        return Ok(None);
    }

    let mut steps = 0u64;
    loop {
        if steps >= max_steps {
            warn!(limit = max_steps, pc = vm.instruction_pointer(), "step limit exceeded");
            return Err(Error::StepLimitExceeded { limit: max_steps });
        }

        let Some(step) = vm.step()? else {
            return Ok(None);
        };
        steps += 1;

        match step.signal {
            Signal::Continue => {}
            Signal::Output(value) => return Ok(Some(value)),
            Signal::NeedInput | Signal::Halt => return Ok(None),
        }
    }
}

/// Like [`Interpreter::execute`], but bounded by `max_steps` executed instructions in total.
pub fn execute_with_budget(
    vm: &mut Interpreter,
    max_steps: u64,
) -> Result<ExecutionResult, Error> {
    let start = vm.operation_count();
    let mut outputs = Vec::new();

    loop {
        let spent = vm.operation_count() - start;
        match run_with_budget(vm, max_steps.saturating_sub(spent)) {
            Ok(Some(value)) => outputs.push(value),
            Ok(None) => break,
            Err(Error::StepLimitExceeded { .. }) => {
                return Err(Error::StepLimitExceeded { limit: max_steps })
            }
            Err(e) => return Err(e),
        }
    }

    Ok(ExecutionResult {
        outputs,
        status: vm.status(),
        instruction: vm.instruction_pointer(),
        steps: vm.operation_count() - start,
    })
}

/// Runs `vm` to halt or starvation, honouring the configured step limit if one is set.
pub fn execute_configured(
    vm: &mut Interpreter,
    config: &Configuration,
) -> Result<ExecutionResult, Error> {
    match config.step_limit {
        Some(limit) => execute_with_budget(vm, limit),
        None => vm.execute(),
    }
}
