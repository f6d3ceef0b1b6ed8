use std::fmt;
use std::io;
use std::path::Path;

use crate::error::SymhuffError;
use crate::paths::COMPRESSED_EXTENSION;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        UnexpectedEof => "File appears truncated or corrupted.",
        WriteZero => "Disk may be full. Free up space and try again.",
        Other if err.raw_os_error() == Some(28) => "Disk may be full. Free up space and try again.",
        _ => "Check permissions or free up disk space.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Attach the operation and path to an I/O error, keeping its kind.
pub fn io_error(operation: &str, path: &Path, err: io::Error) -> io::Error {
    io::Error::new(err.kind(), format_io_error(operation, path, &err))
}

pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

pub fn extension_error(path: &Path) -> CliError {
    CliError {
        msg: format!(
            "Invalid file extension for '{}'. Expected .{}. Pass --output to choose the destination explicitly.",
            path.display(),
            COMPRESSED_EXTENSION
        ),
        source: None,
    }
}

/// Wrap a library error with context and a hint for the user.
pub fn symhuff_cli_error(context: &str, err: SymhuffError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for a library error variant.
pub fn cli_hint(err: &SymhuffError) -> String {
    use SymhuffError::*;
    match err {
        InvalidArgument(msg) => format!("{msg}. Check the command arguments."),
        EmptyInput => "input is empty. Nothing to compress.".to_string(),
        Io(io) => format!("{io}"),
        CorruptStream(msg) => format!("{msg}. Verify the file is intact."),
        Internal(msg) => format!("{msg}. This is a bug."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_hint() {
        let err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let msg = format_io_error("reading", Path::new("in.bin"), &err);
        assert!(msg.starts_with("Error reading 'in.bin'"));
        assert!(msg.contains("Check that the file exists"));
    }

    #[test]
    fn io_error_keeps_kind() {
        let err = io_error(
            "writing",
            Path::new("out.hc"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn corrupt_stream_hint() {
        let err = symhuff_cli_error(
            "decompression failed",
            SymhuffError::CorruptStream("bitstream ended".into()),
        );
        assert!(err.to_string().contains("Verify the file is intact"));
    }
}
