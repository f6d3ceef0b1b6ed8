//! MSB-first bit packing over byte streams.
//!
//! The writer pads a trailing partial byte with zero bits on its low end.
//! The reader has no notion of padding; callers stop at the bit count
//! recorded alongside the stream.

use std::io::{self, Read, Write};

use crate::code::Code;

/// Packs bits into bytes and forwards every completed byte to `W`.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    byte: u8,
    used: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            byte: 0,
            used: 0,
            bits_written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.byte = (self.byte << 1) | bit as u8;
        self.used += 1;
        self.bits_written += 1;
        if self.used == 8 {
            self.inner.write_all(&[self.byte])?;
            self.byte = 0;
            self.used = 0;
        }
        Ok(())
    }

    pub fn write_code(&mut self, code: &Code) -> io::Result<()> {
        for &bit in code.bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Flush the padded final byte and return the sink with the bit count.
    pub fn finish(mut self) -> io::Result<(W, u64)> {
        if self.used > 0 {
            let byte = self.byte << (8 - self.used);
            self.inner.write_all(&[byte])?;
        }
        self.inner.flush()?;
        Ok((self.inner, self.bits_written))
    }
}

/// Reads bits one at a time, most significant first.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    inner: R,
    byte: u8,
    left: u8,
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            byte: 0,
            left: 0,
            bits_read: 0,
        }
    }

    /// Next bit, or `None` once the underlying reader is exhausted.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if self.left == 0 {
            let mut buf = [0u8; 1];
            loop {
                match self.inner.read(&mut buf) {
                    Ok(0) => return Ok(None),
                    Ok(_) => break,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            }
            self.byte = buf[0];
            self.left = 8;
        }
        self.left -= 1;
        self.bits_read += 1;
        Ok(Some((self.byte >> self.left) & 1 != 0))
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }
}
