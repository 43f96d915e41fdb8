use std::time::Instant;

use crate::{error::Error, interfaces::DisassemblerArgs};
use intcode_vm::core::opcodes::InstructionWord;
use tracing::{debug, info};

/// Disassembles an Intcode program into a readable listing
///
/// Each line holds the address of the instruction, its mnemonic, and its operands rendered
/// with their parameter modes (`[12]` position, `#12` immediate, `[rb+12]` relative). Since
/// Intcode mixes code and data freely, any word that does not decode, or whose operands would
/// run past the end of the program, is printed as `DATA` and the walk advances by one word.
///
/// # Arguments
///
/// * `args` - Arguments specifying the target and disassembly options
///
/// # Returns
///
/// A string containing the disassembled program, one instruction per line
pub fn disassemble(args: DisassemblerArgs) -> Result<String, Error> {
    // init
    let start_time = Instant::now();
    let mut address = 0;
    let mut asm = String::new();

    let program = args.get_program()?;
    debug!("loading target program took {:?}", start_time.elapsed());

    // iterate over the program, disassembling each instruction
    let start_disassemble_time = Instant::now();
    let mut instructions = 0;
    while address < program.len() {
        let word = program[address];
        let counter =
            if args.decimal_counter { address.to_string() } else { format!("{address:06x}") };

        let decoded = InstructionWord::decode(word, address).ok().and_then(|decoded| {
            let operands = program.get(address + 1..address + decoded.info().width())?;
            Some((decoded, operands))
        });

        match decoded {
            Some((decoded, operands)) => {
                let rendered =
                    decoded.modes.iter().zip(operands).map(|(mode, operand)| mode.render(*operand));
                let line = [counter, decoded.info().name().to_string()]
                    .into_iter()
                    .chain(rendered)
                    .collect::<Vec<_>>()
                    .join(" ");

                asm.push_str(&line);
                asm.push('\n');
                address += decoded.info().width();
                instructions += 1;
            }
            None => {
                asm.push_str(&format!("{counter} DATA {word}\n"));
                address += 1;
            }
        }
    }
    debug!("disassembly took {:?}", start_disassemble_time.elapsed());

    info!("disassembled {} words into {} instructions", program.len(), instructions);
    debug!("disassembly took {:?}", start_time.elapsed());
    Ok(asm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DisassemblerArgsBuilder;

    fn listing(target: &str) -> String {
        disassemble(
            DisassemblerArgsBuilder::new()
                .target(target.to_string())
                .decimal_counter(true)
                .build()
                .expect("failed to build args"),
        )
        .expect("failed to disassemble")
    }

    #[test]
    fn test_renders_modes() {
        assert_eq!(listing("1002,4,3,4,33"), "0 MUL [4] #3 [4]\n4 DATA 33\n");
        assert_eq!(listing("109,1,204,-1,99"), "0 ARB #1\n2 OUT [rb-1]\n4 HALT\n");
    }

    #[test]
    fn test_truncated_instruction_is_data() {
        assert_eq!(listing("1,0,0"), "0 DATA 1\n1 DATA 0\n2 DATA 0\n");
    }

    #[test]
    fn test_invalid_mode_is_data() {
        assert_eq!(listing("301,0,0,0"), "0 DATA 301\n1 DATA 0\n2 DATA 0\n3 DATA 0\n");
    }

    #[test]
    fn test_hex_counter() {
        let asm = disassemble(
            DisassemblerArgsBuilder::new()
                .target("104,7,104,8,104,9,104,10,104,11,99".to_string())
                .build()
                .expect("failed to build args"),
        )
        .expect("failed to disassemble");

        assert_eq!(asm.lines().last(), Some("00000a HALT"));
    }

    #[test]
    fn test_invalid_target() {
        let result = disassemble(
            DisassemblerArgsBuilder::new()
                .target("1,two,3".to_string())
                .build()
                .expect("failed to build args"),
        );

        assert!(matches!(
            result,
            Err(Error::Load(intcode_common::Error::Parse { index: 1, .. }))
        ));
    }
}
