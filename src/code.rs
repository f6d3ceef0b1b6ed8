use std::collections::HashMap;
use std::fmt;

use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// A code word: the root-to-leaf path, `false` for left and `true` for right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if `self` is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Code word of every symbol in a tree, plus the payload length they produce.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: HashMap<Symbol, Code>,
    total_bits: u64,
}

impl CodeTable {
    /// Walk the tree depth first. A tree that is a single leaf assigns the
    /// one-bit code `0` so every occurrence still consumes a bit.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = Self {
            codes: HashMap::new(),
            total_bits: 0,
        };
        match tree.root() {
            Node::Leaf { symbol, weight } => table.insert(symbol, *weight, vec![false]),
            root => {
                let mut path = Vec::new();
                table.visit(root, &mut path);
            }
        }
        table
    }

    fn visit(&mut self, node: &Node, path: &mut Vec<bool>) {
        match node {
            Node::Leaf { symbol, weight } => self.insert(symbol, *weight, path.clone()),
            Node::Internal { left, right, .. } => {
                path.push(false);
                self.visit(left, path);
                path.pop();
                path.push(true);
                self.visit(right, path);
                path.pop();
            }
        }
    }

    fn insert(&mut self, symbol: &Symbol, weight: u64, bits: Vec<bool>) {
        self.total_bits += weight * bits.len() as u64;
        self.codes.insert(symbol.clone(), Code::from(bits));
    }

    pub fn get(&self, symbol: &[u8]) -> Option<&Code> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Sum over all symbols of `weight * code length`.
    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Code)> {
        self.codes.iter()
    }

    /// Check that no code word is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Code> = self.codes.values().collect();
        // In lexicographic order a prefix always sorts right before a word it prefixes.
        codes.sort_by(|a, b| a.bits.cmp(&b.bits));
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}
