use crate::error::{Result, SymhuffError};

/// Default I/O buffer size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Runtime configuration for the compressor and decompressor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of raw bytes per symbol.
    pub symbol_width: usize,
    /// Capacity of the buffered readers and writers wrapped around files.
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol_width: 1,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    pub fn with_symbol_width(symbol_width: usize) -> Self {
        Self {
            symbol_width,
            ..Self::default()
        }
    }

    /// Reject zero-sized widths and buffers.
    pub fn validate(&self) -> Result<()> {
        if self.symbol_width == 0 {
            return Err(SymhuffError::InvalidArgument(
                "symbol width must be a positive number of bytes".into(),
            ));
        }
        if self.buffer_size == 0 {
            return Err(SymhuffError::InvalidArgument(
                "buffer size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
