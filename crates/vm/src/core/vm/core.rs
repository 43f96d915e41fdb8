use std::{collections::VecDeque, str::FromStr, sync::Arc};

#[cfg(feature = "step-tracing")]
use std::time::Instant;

use intcode_common::program::{parse_program, read_program};
use intcode_config::Configuration;
use tracing::{debug, trace};

use crate::{
    core::{
        constants::MAX_OPERANDS,
        memory::Memory,
        opcodes::{InstructionWord, Opcode, ParameterMode},
    },
    error::{Error, OperandFault},
};

use super::{
    execution::{ExecutionResult, ExecutionStatus, Signal, Step},
    handlers,
};

/// The [`Interpreter`] struct represents an Intcode machine. \
/// It owns its [`Memory`], instruction pointer, relative base, and input queue, and keeps a copy
/// of the loaded program image so it can be [`reset`](Interpreter::reset).
///
/// Cloning an interpreter deep-copies all mutable state, so a clone can diverge freely from its
/// original.
#[derive(Clone, Debug)]
pub struct Interpreter {
    /// The working memory image.
    pub(crate) memory: Memory,

    /// The program as originally loaded.
    program: Arc<[i64]>,

    /// The current instruction pointer.
    pub(crate) instruction: usize,

    /// The offset applied to relative-mode operands.
    pub(crate) relative_base: i64,

    /// Pending input values, consumed front first.
    pub(crate) inputs: VecDeque<i64>,

    /// Where execution currently stands.
    status: ExecutionStatus,

    /// The most recent output value.
    last_output: Option<i64>,

    /// Number of instructions executed since load or reset.
    operation_count: u64,
}

impl Interpreter {
    /// Creates a new [`Interpreter`] with the given program loaded at address 0.
    ///
    /// ```
    /// use intcode_vm::{ExecutionStatus, Interpreter};
    ///
    /// let vm = Interpreter::load(&[1, 0, 0, 0, 99]);
    /// assert_eq!(vm.status(), ExecutionStatus::Running);
    /// assert_eq!(vm.instruction_pointer(), 0);
    /// assert_eq!(vm.relative_base(), 0);
    /// ```
    pub fn load(program: &[i64]) -> Interpreter {
        Interpreter {
            memory: Memory::from_program(program),
            program: Arc::from(program),
            instruction: 0,
            relative_base: 0,
            inputs: VecDeque::new(),
            status: ExecutionStatus::Running,
            last_output: None,
            operation_count: 0,
        }
    }

    /// Creates a new [`Interpreter`] from a file holding the comma-separated program encoding.
    pub fn from_file(path: &str) -> Result<Interpreter, Error> {
        Ok(Interpreter::load(&read_program(path)?))
    }

    /// Caps memory at `limit` words. Writes at or beyond the cap fail with
    /// [`Error::OutOfBounds`]. The cap survives [`reset`](Interpreter::reset).
    pub fn with_memory_limit(mut self, limit: usize) -> Interpreter {
        self.memory = self.memory.with_limit(Some(limit));
        self
    }

    /// Applies the VM-related settings of a [`Configuration`].
    pub fn with_config(self, config: &Configuration) -> Interpreter {
        match config.memory_limit {
            Some(limit) => self.with_memory_limit(limit),
            None => self,
        }
    }

    /// Appends a value to the input queue.
    pub fn push_input(&mut self, value: i64) {
        self.inputs.push_back(value);
    }

    /// Appends values to the input queue, preserving their order.
    ///
    /// ```
    /// use intcode_vm::Interpreter;
    ///
    /// // adds its two inputs and outputs the sum
    /// let mut vm = Interpreter::load(&[3, 9, 3, 10, 1, 9, 10, 9, 4, 9, 99]);
    /// vm.push_inputs([20, 22]);
    /// assert_eq!(vm.run_until_output_or_halt().unwrap(), Some(42));
    /// ```
    pub fn push_inputs<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.inputs.extend(values);
    }

    /// Returns the current execution status.
    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    /// Returns whether the interpreter has halted.
    pub fn is_halted(&self) -> bool {
        self.status == ExecutionStatus::Halted
    }

    /// Returns the most recently output value, if any.
    pub fn last_output(&self) -> Option<i64> {
        self.last_output
    }

    /// Returns the address of the next instruction to execute.
    pub fn instruction_pointer(&self) -> usize {
        self.instruction
    }

    /// Returns the current relative base.
    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// Returns the number of queued, unconsumed input values.
    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the number of instructions executed since load or the last reset.
    pub fn operation_count(&self) -> u64 {
        self.operation_count
    }

    /// Returns the contiguous working memory starting at address 0, up to the highest address
    /// written or loaded. Isolated writes far past its end are not included; read them with
    /// [`peek`](Interpreter::peek).
    pub fn memory(&self) -> &[i64] {
        self.memory.as_slice()
    }

    /// Returns the program image as originally loaded.
    pub fn program(&self) -> &[i64] {
        &self.program
    }

    /// Reads the word at `address`. Unwritten addresses read as zero.
    ///
    /// ```
    /// use intcode_vm::Interpreter;
    ///
    /// let vm = Interpreter::load(&[1, 0, 0, 0, 99]);
    /// assert_eq!(vm.peek(4).unwrap(), 99);
    /// assert_eq!(vm.peek(1000).unwrap(), 0);
    /// assert!(vm.peek(-1).is_err());
    /// ```
    pub fn peek(&self, address: i64) -> Result<i64, Error> {
        let address = usize::try_from(address).map_err(|_| Error::InvalidAddress(address))?;
        Ok(self.memory.read(address))
    }

    /// Writes `value` at `address`, extending memory if necessary.
    ///
    /// ```
    /// use intcode_vm::Interpreter;
    ///
    /// let mut vm = Interpreter::load(&[1, 0, 0, 0, 99]);
    /// vm.poke(1, 4).unwrap();
    /// vm.poke(2, 4).unwrap();
    /// vm.run_until_output_or_halt().unwrap();
    /// assert_eq!(vm.peek(0).unwrap(), 198);
    /// ```
    pub fn poke(&mut self, address: i64, value: i64) -> Result<(), Error> {
        let address = usize::try_from(address).map_err(|_| Error::InvalidAddress(address))?;
        self.memory.store(address, value)
    }

    /// Restores the originally loaded program and resets the instruction pointer, relative base,
    /// status, last output, and input queue.
    ///
    /// ```
    /// use intcode_vm::{ExecutionStatus, Interpreter};
    ///
    /// let mut vm = Interpreter::load(&[1, 0, 0, 0, 99]);
    /// vm.run_until_output_or_halt().unwrap();
    /// assert_eq!(vm.status(), ExecutionStatus::Halted);
    ///
    /// vm.reset();
    /// assert_eq!(vm.status(), ExecutionStatus::Running);
    /// assert_eq!(vm.memory(), &[1, 0, 0, 0, 99]);
    /// ```
    pub fn reset(&mut self) {
        self.memory = Memory::from_program(&self.program).with_limit(self.memory.limit());
        self.instruction = 0;
        self.relative_base = 0;
        self.inputs.clear();
        self.status = ExecutionStatus::Running;
        self.last_output = None;
        self.operation_count = 0;
        debug!(words = self.program.len(), "reset interpreter");
    }

    /// Address of the raw word for operand `index` of the current instruction.
    fn operand_slot(&self, index: usize) -> usize {
        self.instruction.saturating_add(1 + index)
    }

    /// Error for checked arithmetic that overflowed in the current instruction.
    pub(crate) fn overflow(&self) -> Error {
        Error::ArithmeticOverflow { address: self.instruction }
    }

    /// Error for an operand of the current instruction that could not be resolved.
    pub(crate) fn invalid_operand(&self, fault: OperandFault) -> Error {
        Error::InvalidOperand { address: self.instruction, fault }
    }

    /// Turns a raw operand into an address according to its mode.
    fn resolve_address(&self, raw: i64, mode: ParameterMode) -> Result<usize, Error> {
        let address = match mode {
            ParameterMode::Relative => {
                raw.checked_add(self.relative_base).ok_or_else(|| self.overflow())?
            }
            _ => raw,
        };
        usize::try_from(address)
            .map_err(|_| self.invalid_operand(OperandFault::NegativeAddress(address)))
    }

    /// Reads operand `index` of the current instruction as a value.
    pub(crate) fn read_operand(
        &self,
        decoded: &InstructionWord,
        index: usize,
    ) -> Result<i64, Error> {
        let raw = self.memory.read(self.operand_slot(index));
        match decoded.modes[index] {
            ParameterMode::Immediate => Ok(raw),
            mode => Ok(self.memory.read(self.resolve_address(raw, mode)?)),
        }
    }

    /// Resolves the write-target operand of the current instruction.
    pub(crate) fn write_target(&self, decoded: &InstructionWord) -> Result<usize, Error> {
        let index = decoded
            .info()
            .write_operand()
            .ok_or(Error::InvalidOpcode { opcode: decoded.word, address: self.instruction })?;
        let raw = self.memory.read(self.operand_slot(index));
        match decoded.modes[index] {
            ParameterMode::Immediate => Err(self.invalid_operand(OperandFault::ImmediateWrite)),
            mode => self.resolve_address(raw, mode),
        }
    }

    /// Moves the instruction pointer past the current instruction and its operands.
    pub(crate) fn advance(&mut self, decoded: &InstructionWord) {
        self.instruction = self.instruction.saturating_add(decoded.info().width());
    }

    /// Executes the next instruction and returns a record of it. Returns `None` without doing
    /// anything once the interpreter has halted.
    ///
    /// An instruction that fails leaves the interpreter exactly as it was, so stepping again
    /// reproduces the same error.
    ///
    /// ```
    /// use intcode_vm::{core::opcodes::Opcode, Interpreter, Signal};
    ///
    /// let mut vm = Interpreter::load(&[1101, 2, 3, 5, 99]);
    /// let step = vm.step().unwrap().unwrap();
    /// assert_eq!(step.opcode, Opcode::Add);
    /// assert_eq!(step.operands(), &[2, 3, 5]);
    /// assert_eq!(step.signal, Signal::Continue);
    /// assert_eq!(vm.peek(5).unwrap(), 5);
    /// ```
    pub fn step(&mut self) -> Result<Option<Step>, Error> {
        if self.is_halted() {
            return Ok(None);
        }

        let address = self.instruction;
        let decoded = InstructionWord::decode(self.memory.read(address), address)?;
        let info = decoded.info();
        let mut operands = [0; MAX_OPERANDS];
        for (index, operand) in operands.iter_mut().take(info.operands() as usize).enumerate() {
            *operand = self.memory.read(self.operand_slot(index));
        }

        #[cfg(feature = "step-tracing")]
        let start_time = Instant::now();
        #[cfg(feature = "step-tracing")]
        trace!(
            pc = address,
            opcode = info.name(),
            operands = ?&operands[..info.operands() as usize],
            relative_base = self.relative_base,
            "executing instruction"
        );

        let signal = match decoded.opcode {
            Opcode::Add => handlers::arithmetic::add(self, &decoded)?,
            Opcode::Multiply => handlers::arithmetic::multiply(self, &decoded)?,
            Opcode::Input => handlers::io::input(self, &decoded)?,
            Opcode::Output => handlers::io::output(self, &decoded)?,
            Opcode::JumpIfTrue => handlers::control::jump_if_true(self, &decoded)?,
            Opcode::JumpIfFalse => handlers::control::jump_if_false(self, &decoded)?,
            Opcode::LessThan => handlers::comparison::less_than(self, &decoded)?,
            Opcode::Equals => handlers::comparison::equals(self, &decoded)?,
            Opcode::AdjustRelativeBase => {
                handlers::control::adjust_relative_base(self, &decoded)?
            }
            Opcode::Halt => handlers::control::halt(),
        };

        if signal != Signal::NeedInput {
            self.operation_count += 1;
        }

        match signal {
            Signal::Continue => self.status = ExecutionStatus::Running,
            Signal::Output(value) => {
                self.status = ExecutionStatus::PausedOnOutput;
                self.last_output = Some(value);
                trace!(pc = address, value, "paused on output");
            }
            Signal::NeedInput => {
                self.status = ExecutionStatus::PausedOnInput;
                debug!(pc = address, "paused on input");
            }
            Signal::Halt => {
                self.status = ExecutionStatus::Halted;
                debug!(pc = address, steps = self.operation_count, "halted");
            }
        }

        #[cfg(feature = "step-tracing")]
        trace!(
            pc = self.instruction,
            opcode = info.name(),
            elapsed = ?start_time.elapsed(),
            "done executing instruction"
        );

        Ok(Some(Step {
            address,
            opcode: decoded.opcode,
            modes: decoded.modes,
            operands,
            signal,
        }))
    }

    /// Runs until an output value is produced (returned as `Some`), the interpreter halts, or
    /// an input instruction finds the queue empty (both returned as `None`; check
    /// [`status`](Interpreter::status) to tell them apart).
    ///
    /// Calling this on a halted interpreter is a no-op that returns `Ok(None)`.
    ///
    /// ```
    /// use intcode_vm::{ExecutionStatus, Interpreter};
    ///
    /// let mut vm = Interpreter::load(&[3, 0, 4, 0, 99]);
    /// assert_eq!(vm.run_until_output_or_halt().unwrap(), None);
    /// assert_eq!(vm.status(), ExecutionStatus::PausedOnInput);
    ///
    /// vm.push_input(-1);
    /// assert_eq!(vm.run_until_output_or_halt().unwrap(), Some(-1));
    /// assert_eq!(vm.run_until_output_or_halt().unwrap(), None);
    /// assert_eq!(vm.status(), ExecutionStatus::Halted);
    /// ```
    pub fn run_until_output_or_halt(&mut self) -> Result<Option<i64>, Error> {
        while let Some(step) = self.step()? {
            match step.signal {
                Signal::Continue => {}
                Signal::Output(value) => return Ok(Some(value)),
                Signal::NeedInput | Signal::Halt => return Ok(None),
            }
        }
        Ok(None)
    }

    /// Runs across output pauses, collecting every output, until the interpreter halts or needs
    /// input that is not queued.
    pub fn run_until_input_or_halt(&mut self) -> Result<Vec<i64>, Error> {
        let mut outputs = Vec::new();
        while let Some(step) = self.step()? {
            match step.signal {
                Signal::Continue => {}
                Signal::Output(value) => outputs.push(value),
                Signal::NeedInput | Signal::Halt => break,
            }
        }
        Ok(outputs)
    }

    /// Queues `inputs`, then collects every output until the interpreter halts or starves.
    ///
    /// ```
    /// use intcode_vm::Interpreter;
    ///
    /// // outputs 1 if the input equals 8, 0 otherwise
    /// let mut vm = Interpreter::load(&[3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8]);
    /// assert_eq!(vm.run_with_inputs([8]).unwrap(), vec![1]);
    /// ```
    pub fn run_with_inputs<I>(&mut self, inputs: I) -> Result<Vec<i64>, Error>
    where
        I: IntoIterator<Item = i64>,
    {
        self.push_inputs(inputs);
        self.run_until_input_or_halt()
    }

    /// Runs until the interpreter halts or starves for input, and summarizes the run.
    ///
    /// ```
    /// use intcode_vm::{ExecutionStatus, Interpreter};
    ///
    /// let mut vm = Interpreter::load(&[104, 1125899906842624, 99]);
    /// let result = vm.execute().unwrap();
    /// assert_eq!(result.outputs, vec![1125899906842624]);
    /// assert_eq!(result.status, ExecutionStatus::Halted);
    /// assert_eq!(result.steps, 2);
    /// ```
    pub fn execute(&mut self) -> Result<ExecutionResult, Error> {
        let start = self.operation_count;
        let outputs = self.run_until_input_or_halt()?;

        Ok(ExecutionResult {
            outputs,
            status: self.status,
            instruction: self.instruction,
            steps: self.operation_count - start,
        })
    }
}

impl FromStr for Interpreter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Interpreter::load(&parse_program(s)?))
    }
}
