//! Huffman tree construction.
//!
//! Leaves are seeded into a min-heap in ascending symbol order. The two
//! lightest nodes are merged repeatedly, the first one popped becoming the
//! left child. Ties on weight are broken by insertion order so a given
//! frequency table always produces the same tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Result, SymhuffError};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new parent weighing their sum.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Heap slot ordered so that `BinaryHeap` pops the lightest, oldest node.
struct Queued {
    weight: u64,
    seq: u64,
    node: Node,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for a frequency table holding at least one symbol.
    ///
    /// A single distinct symbol yields a tree whose root is that leaf.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut leaves: Vec<(&Symbol, u64)> = frequencies.iter().collect();
        leaves.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut heap = BinaryHeap::with_capacity(leaves.len());
        let mut seq = 0u64;
        for (symbol, weight) in leaves {
            heap.push(Queued {
                weight,
                seq,
                node: Node::leaf(symbol.clone(), weight),
            });
            seq += 1;
        }

        loop {
            let first = heap.pop().ok_or(SymhuffError::EmptyInput)?;
            let Some(second) = heap.pop() else {
                return Ok(Self { root: first.node });
            };
            let node = Node::merge(first.node, second.node);
            heap.push(Queued {
                weight: node.weight(),
                seq,
                node,
            });
            seq += 1;
        }
    }

    /// Adopt a tree that was read back from a container.
    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    /// Exact bitstream length this tree produces for its own weights.
    ///
    /// A lone root leaf is coded with one bit per occurrence. Returns `None`
    /// on overflow, which only happens for foreign trees.
    pub fn encoded_bits(&self) -> Option<u64> {
        fn walk(node: &Node, depth: u64) -> Option<u64> {
            match node {
                Node::Leaf { weight, .. } => weight.checked_mul(depth.max(1)),
                Node::Internal { left, right, .. } => {
                    walk(left, depth + 1)?.checked_add(walk(right, depth + 1)?)
                }
            }
        }
        walk(&self.root, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolReader;

    fn table(data: &[u8], width: usize) -> FrequencyTable {
        FrequencyTable::from_symbols(SymbolReader::new(data, width).unwrap()).unwrap()
    }

    #[test]
    fn two_symbols_lighter_goes_left() {
        let tree = HuffmanTree::build(&table(&[0x41, 0x41, 0x41, 0x42], 1)).unwrap();
        match tree.root() {
            Node::Internal { weight, left, right } => {
                assert_eq!(*weight, 4);
                assert_eq!(**left, Node::leaf(Symbol::from(&[0x42][..]), 1));
                assert_eq!(**right, Node::leaf(Symbol::from(&[0x41][..]), 3));
            }
            other => panic!("expected internal root, got {other:?}"),
        }
        assert_eq!(tree.encoded_bits(), Some(4));
    }

    #[test]
    fn single_symbol_is_a_bare_leaf() {
        let tree = HuffmanTree::build(&table(b"zzzz", 1)).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.encoded_bits(), Some(4));
    }

    #[test]
    fn root_weight_is_total_symbols() {
        let freqs = table(b"the quick brown fox jumps over the lazy dog", 2);
        let tree = HuffmanTree::build(&freqs).unwrap();
        assert_eq!(tree.root().weight(), freqs.total_symbols());
        assert_eq!(tree.leaf_count(), freqs.len());
    }

    #[test]
    fn equal_weights_build_the_same_tree() {
        let freqs = table(b"abcdefgh", 1);
        let a = HuffmanTree::build(&freqs).unwrap();
        let b = HuffmanTree::build(&freqs).unwrap();
        assert_eq!(a, b);
        // Eight equally likely symbols give a perfectly balanced tree.
        assert_eq!(a.encoded_bits(), Some(24));
    }

    #[test]
    fn skewed_weights_give_short_codes_to_common_symbols() {
        // a:8 b:4 c:2 d:1 e:1 -> depths 1,2,3,4,4
        let tree = HuffmanTree::build(&table(b"aaaaaaaabbbbccde", 1)).unwrap();
        assert_eq!(tree.encoded_bits(), Some(8 + 8 + 6 + 4 + 4));
    }
}
