//! ASCII conventions used by text-driven Intcode programs: inputs are lines of bytes terminated
//! by a newline, outputs in the ASCII range are characters.

use crate::core::vm::Interpreter;

/// Queues `line` as ASCII codes followed by a newline.
///
/// ```
/// use intcode_vm::{ext::ascii::push_line, Interpreter};
///
/// let mut vm = Interpreter::load(&[3, 10, 3, 11, 3, 12, 99]);
/// push_line(&mut vm, "OK");
/// vm.run_until_output_or_halt().unwrap();
/// assert_eq!(&vm.memory()[10..], &[79, 75, 10]);
/// ```
pub fn push_line(vm: &mut Interpreter, line: &str) {
    vm.push_inputs(line.bytes().map(i64::from));
    vm.push_input(i64::from(b'\n'));
}

/// Output split into its ASCII text and any values outside the ASCII range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AsciiOutput {
    /// Every output in `0..=127`, as characters.
    pub text: String,

    /// Every other output, in order.
    pub values: Vec<i64>,
}

/// Splits raw output values into text and non-ASCII values.
pub fn decode(outputs: &[i64]) -> AsciiOutput {
    let mut decoded = AsciiOutput::default();
    for &value in outputs {
        match u8::try_from(value) {
            Ok(byte) if byte.is_ascii() => decoded.text.push(char::from(byte)),
            _ => decoded.values.push(value),
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mixed_output() {
        let decoded = decode(&[35, 46, 10, 35, 200, -1, 19_690_720]);
        assert_eq!(decoded.text, "#.\n#");
        assert_eq!(decoded.values, vec![200, -1, 19_690_720]);
    }

    #[test]
    fn test_echo_line() {
        // echoes three inputs back
        let mut vm = Interpreter::load(&[3, 0, 4, 0, 3, 0, 4, 0, 3, 0, 4, 0, 99]);
        push_line(&mut vm, "hi");
        let outputs = vm.run_until_input_or_halt().expect("execution failed");
        assert_eq!(decode(&outputs).text, "hi\n");
    }
}
