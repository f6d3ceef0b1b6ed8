use thiserror::Error;

/// Errors produced while compressing or decompressing.
#[derive(Error, Debug)]
pub enum SymhuffError {
    /// Bad symbol width, buffer size or path argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The source produced zero symbols.
    #[error("input is empty")]
    EmptyInput,

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Truncated container, malformed tree or a bitstream that does not
    /// match its header.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// Invariant violation inside the codec.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SymhuffError>;

/// Map an I/O error from a container read, treating a short read as corruption.
pub(crate) fn truncated(err: std::io::Error, what: &str) -> SymhuffError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        SymhuffError::CorruptStream(format!("container truncated while reading {what}"))
    } else {
        SymhuffError::Io(err)
    }
}
