use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::error::{Result, SymhuffError};
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// Write the code word of every symbol, in order. Returns the bit count.
///
/// Every symbol must have an entry in `codes`; a miss means the source no
/// longer matches the one the table was built from.
pub fn encode_symbols<I, W>(symbols: I, codes: &CodeTable, writer: &mut BitWriter<W>) -> Result<u64>
where
    I: IntoIterator<Item = Result<Symbol>>,
    W: Write,
{
    let start = writer.bits_written();
    for symbol in symbols {
        let symbol = symbol?;
        let code = codes.get(symbol.as_bytes()).ok_or_else(|| {
            SymhuffError::Internal(format!(
                "symbol {symbol:?} missing from the code table; did the input change?"
            ))
        })?;
        writer.write_code(code)?;
    }
    Ok(writer.bits_written() - start)
}

/// Walk `tree` for exactly `total_bits` bits, emitting each leaf reached.
/// Returns the number of bytes written to `out`.
///
/// Padding past `total_bits` is never read. A lone root leaf decodes one
/// symbol per `0` bit.
pub fn decode_bits<R, W>(
    reader: &mut BitReader<R>,
    total_bits: u64,
    tree: &HuffmanTree,
    out: &mut W,
) -> Result<u64>
where
    R: Read,
    W: Write,
{
    let root = tree.root();
    let mut node = root;
    let mut consumed = 0u64;
    let mut written = 0u64;

    while consumed < total_bits {
        let bit = reader.read_bit()?.ok_or_else(|| {
            SymhuffError::CorruptStream(format!(
                "bitstream ended after {consumed} of {total_bits} bits"
            ))
        })?;
        consumed += 1;

        node = match node {
            Node::Internal { left, right, .. } => {
                if bit {
                    &**right
                } else {
                    &**left
                }
            }
            // Only reachable when the root itself is a leaf.
            leaf => {
                if bit {
                    return Err(SymhuffError::CorruptStream(format!(
                        "set bit at position {} in a single-symbol stream",
                        consumed - 1
                    )));
                }
                leaf
            }
        };

        if let Node::Leaf { symbol, .. } = node {
            out.write_all(symbol.as_bytes())?;
            written += symbol.len() as u64;
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        return Err(SymhuffError::CorruptStream(
            "bitstream ends in the middle of a code word".into(),
        ));
    }
    Ok(written)
}
