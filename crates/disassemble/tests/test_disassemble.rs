mod integration_tests {
    use intcode_common::utils::io::file::write_file;
    use intcode_disassembler::{disassemble, DisassemblerArgsBuilder};

    #[test]
    fn test_disassemble_from_file() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("day5.txt");
        let path = path.to_str().expect("non-utf8 path");
        write_file(path, "3,9,8,9,10,9,4,9,99,-1,8\n").expect("failed to write program");

        let asm = disassemble(
            DisassemblerArgsBuilder::new()
                .target(path.to_string())
                .decimal_counter(true)
                .build()
                .expect("failed to build args"),
        )
        .expect("failed to disassemble");

        assert_eq!(
            asm,
            "0 IN [9]\n2 EQ [9] [10] [9]\n6 OUT [9]\n8 HALT\n9 DATA -1\n10 DATA 8\n"
        );
    }
}
