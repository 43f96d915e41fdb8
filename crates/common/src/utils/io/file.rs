use std::{fs, io::ErrorKind, path::Path};

use eyre::{Result, WrapErr};

/// Writes `contents` to `path`, creating any missing parent directories.
pub fn write_file(path: &str, contents: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).wrap_err_with(|| format!("failed to write {path}"))
}

/// Reads the whole of `path` as UTF-8 text.
pub fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read {path}"))
}

/// Removes the file or directory tree at `path`.
///
/// Returns `Ok(false)` if nothing existed at `path`, and an error if it exists but could not be
/// removed.
///
/// ```
/// use intcode_common::utils::io::file::delete_path;
///
/// assert!(!delete_path("/nonexistent/intcode/config.toml").unwrap());
/// ```
pub fn delete_path(path: &str) -> Result<bool> {
    let target = Path::new(path);
    let removed =
        if target.is_dir() { fs::remove_dir_all(target) } else { fs::remove_file(target) };

    match removed {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(eyre::Report::new(e).wrap_err(format!("failed to delete {path}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("nested").join("program.txt");
        let path = path.to_str().expect("non-utf8 path");

        write_file(path, "1,0,0,0,99\n").expect("failed to write file");
        assert_eq!(read_file(path).expect("failed to read file"), "1,0,0,0,99\n");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("missing.txt");
        assert!(read_file(path.to_str().expect("non-utf8 path")).is_err());
    }

    #[test]
    fn test_delete_path() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("doomed.txt");
        let path = path.to_str().expect("non-utf8 path");

        write_file(path, "99").expect("failed to write file");
        assert!(delete_path(path).expect("failed to delete file"));
        assert!(!delete_path(path).expect("failed to delete missing file"));
    }

    #[test]
    fn test_delete_path_reports_failure() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("not-a-dir");
        let path = path.to_str().expect("non-utf8 path");
        write_file(path, "99").expect("failed to write file");

        // a path beneath a regular file can never be removed
        let nested = format!("{path}/config.toml");
        assert!(delete_path(&nested).is_err());
    }
}
