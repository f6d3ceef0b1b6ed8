//! Compressed container layout.
//!
//! ```text
//! [total_bits: u64 BE][tree][packed bitstream]
//!
//! tree := 0x00 tree tree                         internal node (left, right)
//!       | 0x01 [len: u32 BE][len bytes][weight: u64 BE]   leaf
//! ```
//!
//! The bitstream occupies `ceil(total_bits / 8)` bytes. Anything after it is
//! ignored.

use std::io::{Read, Write};

use crate::error::{truncated, Result, SymhuffError};
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

pub const TAG_INTERNAL: u8 = 0;
pub const TAG_LEAF: u8 = 1;

/// Trees may have at most this many levels, root included. Deeper trees are
/// treated as corrupt.
///
/// Weights are `u64`, so no tree built by [`HuffmanTree::build`] comes close.
pub const MAX_TREE_DEPTH: usize = 256;

/// Size in bytes of the bit-count field.
pub const BIT_COUNT_SIZE: usize = 8;

/// Everything that precedes the bitstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub total_bits: u64,
    pub tree: HuffmanTree,
}

impl ContainerHeader {
    /// Number of packed bitstream bytes that follow the header.
    pub fn payload_bytes(&self) -> u64 {
        self.total_bits.div_ceil(8)
    }

    /// Serialized size of the bit count plus the tree.
    pub fn encoded_len(&self) -> u64 {
        fn node_len(node: &Node) -> u64 {
            match node {
                Node::Leaf { symbol, .. } => 1 + 4 + symbol.len() as u64 + 8,
                Node::Internal { left, right, .. } => 1 + node_len(left) + node_len(right),
            }
        }
        BIT_COUNT_SIZE as u64 + node_len(self.tree.root())
    }
}

/// Write the bit count and tree. Returns the number of bytes written.
pub fn write_header<W: Write>(out: &mut W, total_bits: u64, tree: &HuffmanTree) -> Result<u64> {
    out.write_all(&total_bits.to_be_bytes())?;
    let tree_bytes = write_node(out, tree.root())?;
    Ok(BIT_COUNT_SIZE as u64 + tree_bytes)
}

fn write_node<W: Write>(out: &mut W, node: &Node) -> Result<u64> {
    match node {
        Node::Leaf { symbol, weight } => {
            let len = u32::try_from(symbol.len()).map_err(|_| {
                SymhuffError::InvalidArgument(format!(
                    "symbol of {} bytes does not fit the container format",
                    symbol.len()
                ))
            })?;
            out.write_all(&[TAG_LEAF])?;
            out.write_all(&len.to_be_bytes())?;
            out.write_all(symbol.as_bytes())?;
            out.write_all(&weight.to_be_bytes())?;
            Ok(1 + 4 + symbol.len() as u64 + 8)
        }
        Node::Internal { left, right, .. } => {
            out.write_all(&[TAG_INTERNAL])?;
            let left_bytes = write_node(out, left)?;
            let right_bytes = write_node(out, right)?;
            Ok(1 + left_bytes + right_bytes)
        }
    }
}

/// Read the bit count and tree, leaving `input` positioned at the bitstream.
///
/// The recorded bit count must equal the count implied by the tree.
pub fn read_header<R: Read>(input: &mut R) -> Result<ContainerHeader> {
    let total_bits = read_u64(input, "bit count")?;
    let root = read_node(input, 0)?;
    let tree = HuffmanTree::from_root(root);
    match tree.encoded_bits() {
        Some(expected) if expected == total_bits => Ok(ContainerHeader { total_bits, tree }),
        Some(expected) => Err(SymhuffError::CorruptStream(format!(
            "header records {total_bits} bits but the tree implies {expected}"
        ))),
        None => Err(SymhuffError::CorruptStream(
            "tree weights overflow the bit count".into(),
        )),
    }
}

fn read_node<R: Read>(input: &mut R, depth: usize) -> Result<Node> {
    if depth >= MAX_TREE_DEPTH {
        return Err(SymhuffError::CorruptStream(format!(
            "tree has more than {MAX_TREE_DEPTH} levels"
        )));
    }
    let mut tag = [0u8; 1];
    input.read_exact(&mut tag).map_err(|e| truncated(e, "tree"))?;
    match tag[0] {
        TAG_LEAF => {
            let len = read_u32(input, "leaf length")? as usize;
            if len == 0 {
                return Err(SymhuffError::CorruptStream("zero-length leaf symbol".into()));
            }
            let mut bytes = Vec::with_capacity(len.min(64 * 1024));
            input.by_ref().take(len as u64).read_to_end(&mut bytes)?;
            if bytes.len() != len {
                return Err(SymhuffError::CorruptStream(
                    "container truncated while reading leaf symbol".into(),
                ));
            }
            let weight = read_u64(input, "leaf weight")?;
            Ok(Node::leaf(Symbol::from(bytes), weight))
        }
        TAG_INTERNAL => {
            let left = read_node(input, depth + 1)?;
            let right = read_node(input, depth + 1)?;
            let weight = left.weight().checked_add(right.weight()).ok_or_else(|| {
                SymhuffError::CorruptStream("tree weights overflow".into())
            })?;
            Ok(Node::Internal {
                weight,
                left: Box::new(left),
                right: Box::new(right),
            })
        }
        other => Err(SymhuffError::CorruptStream(format!(
            "unknown tree node tag {other:#04x}"
        ))),
    }
}

fn read_u64<R: Read>(input: &mut R, what: &str) -> Result<u64> {
    let mut buf = [0u8; 8];
    input.read_exact(&mut buf).map_err(|e| truncated(e, what))?;
    Ok(u64::from_be_bytes(buf))
}

fn read_u32<R: Read>(input: &mut R, what: &str) -> Result<u32> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf).map_err(|e| truncated(e, what))?;
    Ok(u32::from_be_bytes(buf))
}
