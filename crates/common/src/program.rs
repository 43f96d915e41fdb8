use tracing::debug;

use crate::{
    constants::PROGRAM_SEPARATOR,
    error::Error,
    utils::io::file::read_file,
};

/// Parse the comma-separated textual encoding of a program into its integer image.
///
/// Surrounding whitespace (including the trailing newline of a puzzle input file) is ignored,
/// as is whitespace around individual tokens.
///
/// ```
/// use intcode_common::program::parse_program;
///
/// assert_eq!(parse_program("1,0,0,0,99\n").unwrap(), vec![1, 0, 0, 0, 99]);
/// assert_eq!(parse_program("104, -7, 99").unwrap(), vec![104, -7, 99]);
/// ```
pub fn parse_program(text: &str) -> Result<Vec<i64>, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Empty);
    }

    text.split(PROGRAM_SEPARATOR)
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token.parse::<i64>().map_err(|_| Error::Parse { index, token: token.to_owned() })
        })
        .collect()
}

/// Read a program from a file containing its comma-separated encoding.
///
/// ```no_run
/// use intcode_common::program::read_program;
///
/// let program = read_program("inputs/input_day9.txt").expect("failed to read program");
/// ```
pub fn read_program(path: &str) -> Result<Vec<i64>, Error> {
    let contents = read_file(path)?;
    let program = parse_program(&contents)?;
    debug!(path, words = program.len(), "loaded program");
    Ok(program)
}

/// Render a program image back into its comma-separated encoding.
///
/// ```
/// use intcode_common::program::format_program;
///
/// assert_eq!(format_program(&[2, 0, 0, 0, 99]), "2,0,0,0,99");
/// ```
pub fn format_program(program: &[i64]) -> String {
    program.iter().map(|word| word.to_string()).collect::<Vec<String>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::io::file::write_file;

    #[test]
    fn test_parse_program_trailing_newline() {
        assert_eq!(parse_program("3,0,4,0,99\n").expect("failed to parse"), vec![3, 0, 4, 0, 99]);
    }

    #[test]
    fn test_parse_program_large_values() {
        assert_eq!(
            parse_program("104,1125899906842624,99").expect("failed to parse"),
            vec![104, 1125899906842624, 99]
        );
    }

    #[test]
    fn test_parse_program_reports_bad_token() {
        match parse_program("1,0,x,0,99") {
            Err(Error::Parse { index, token }) => {
                assert_eq!(index, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_program_empty_token() {
        assert!(matches!(parse_program("1,,99"), Err(Error::Parse { index: 1, .. })));
    }

    #[test]
    fn test_parse_program_empty() {
        assert!(matches!(parse_program("  \n"), Err(Error::Empty)));
    }

    #[test]
    fn test_read_program() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("input.txt");
        let path = path.to_str().expect("non-utf8 path");
        write_file(path, "1002,4,3,4,33\n").expect("failed to write file");

        assert_eq!(read_program(path).expect("failed to read program"), vec![1002, 4, 3, 4, 33]);
    }

    #[test]
    fn test_read_program_missing_file() {
        assert!(matches!(read_program("/definitely/not/here.txt"), Err(Error::Eyre(_))));
    }

    #[test]
    fn test_format_program_matches_parse() {
        let text = "1,1,1,4,99,5,6,0,99";
        assert_eq!(format_program(&parse_program(text).expect("failed to parse")), text);
    }
}
