//! Error types for the common module

/// Errors that can occur while loading or rendering programs
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A token in the program text is not a valid signed integer
    #[error("invalid integer {token:?} at position {index}")]
    Parse {
        /// Zero-based index of the offending token
        index: usize,
        /// The token as it appeared in the input, trimmed
        token: String,
    },

    /// The program text contained no integers at all
    #[error("program is empty")]
    Empty,

    /// Generic internal error, usually file I/O
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
