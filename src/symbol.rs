//! Fixed-width symbol extraction.
//!
//! A source is cut into consecutive, non-overlapping chunks of `width` bytes.
//! Only the final chunk may be shorter. Boundaries are measured from the
//! start of the source and never depend on how the underlying reader
//! happens to split its reads.

use std::borrow::Borrow;
use std::fmt;
use std::io::{Read, Seek};

use crate::error::{Result, SymhuffError};

/// An immutable run of `1..=width` raw bytes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Box<[u8]>);

impl Symbol {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Symbol {
    fn from(bytes: Vec<u8>) -> Self {
        Symbol(bytes.into_boxed_slice())
    }
}

impl From<&[u8]> for Symbol {
    fn from(bytes: &[u8]) -> Self {
        Symbol(bytes.into())
    }
}

impl Borrow<[u8]> for Symbol {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", hex::encode(&self.0))
    }
}

/// Lazy iterator over the symbols of a byte source.
pub struct SymbolReader<R> {
    inner: R,
    width: usize,
    done: bool,
}

impl<R: Read> SymbolReader<R> {
    /// Wrap `inner`, failing with `InvalidArgument` for a zero width.
    pub fn new(inner: R, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(SymhuffError::InvalidArgument(
                "symbol width must be a positive number of bytes".into(),
            ));
        }
        Ok(Self {
            inner,
            width,
            done: false,
        })
    }

    fn read_symbol(&mut self) -> Result<Option<Symbol>> {
        if self.done {
            return Ok(None);
        }
        // `take` keeps a huge width from allocating more than the source holds.
        let mut buf = Vec::with_capacity(self.width.min(64 * 1024));
        (&mut self.inner)
            .take(self.width as u64)
            .read_to_end(&mut buf)?;
        if buf.len() < self.width {
            self.done = true;
        }
        if buf.is_empty() {
            return Ok(None);
        }
        Ok(Some(Symbol::from(buf)))
    }
}

impl<R: Read> Iterator for SymbolReader<R> {
    type Item = Result<Symbol>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_symbol() {
            Ok(Some(symbol)) => Some(Ok(symbol)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Rewind `source` and start a fresh pass over its symbols.
///
/// Compression walks the source twice; both passes yield the same sequence
/// as long as the source itself is not modified in between.
pub fn extract<R: Read + Seek>(source: &mut R, width: usize) -> Result<SymbolReader<&mut R>> {
    source.rewind()?;
    SymbolReader::new(source, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(data: &[u8], width: usize) -> Vec<Vec<u8>> {
        SymbolReader::new(data, width)
            .unwrap()
            .map(|s| s.unwrap().as_bytes().to_vec())
            .collect()
    }

    #[test]
    fn splits_into_fixed_width_chunks() {
        let chunks = collect(b"abcdefg", 3);
        assert_eq!(chunks, vec![b"abc".to_vec(), b"def".to_vec(), b"g".to_vec()]);
    }

    #[test]
    fn exact_multiple_has_no_short_tail() {
        let chunks = collect(b"abcdef", 2);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn width_larger_than_input_yields_one_symbol() {
        assert_eq!(collect(b"xy", 16), vec![b"xy".to_vec()]);
    }

    #[test]
    fn empty_source_yields_nothing() {
        assert!(collect(b"", 4).is_empty());
    }

    #[test]
    fn zero_width_rejected() {
        assert!(matches!(
            SymbolReader::new(&b"abc"[..], 0),
            Err(SymhuffError::InvalidArgument(_))
        ));
    }

    /// Reader that hands out one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn boundaries_ignore_short_reads() {
        let symbols: Vec<_> = SymbolReader::new(Trickle(b"0123456789"), 4)
            .unwrap()
            .map(|s| s.unwrap())
            .collect();
        assert_eq!(symbols[0].as_bytes(), b"0123");
        assert_eq!(symbols[1].as_bytes(), b"4567");
        assert_eq!(symbols[2].as_bytes(), b"89");
    }

    #[test]
    fn extract_restarts_from_the_beginning() {
        let mut cursor = Cursor::new(b"hello world".to_vec());
        let first: Vec<_> = extract(&mut cursor, 2).unwrap().map(|s| s.unwrap()).collect();
        let second: Vec<_> = extract(&mut cursor, 2).unwrap().map(|s| s.unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }
}
