//! Huffman tree construction and the decode-side tree.
//!
//! # Bit convention
//!
//! Every internal node has a `low` child reached by bit 0 and a `high` child
//! reached by bit 1. When two nodes are merged, the one taken from the queue
//! first becomes `low`.
//!
//! # Tie-break
//!
//! The merge queue orders nodes by a fixed total order so identical input
//! always produces an identical tree:
//! 1. ascending weight
//! 2. leaves before internal nodes
//! 3. leaves by ascending symbol, internal nodes by ascending creation order

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::trace;

use crate::bitio::BitReader;
use crate::codebook::CodeTable;
use crate::error::{Error, HeaderError, Result};
use crate::frequency::FrequencyTable;

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        low: Box<HuffmanNode>,
        high: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Number of nodes in the subtree rooted here.
    pub fn node_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { low, high, .. } => 1 + low.node_count() + high.node_count(),
        }
    }

    /// Length of the longest root-to-leaf path below this node.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { low, high, .. } => 1 + low.depth().max(high.depth()),
        }
    }
}

/// Position of a node in the tie-break order among nodes of equal weight.
///
/// Variant order matters: every `Leaf` sorts before every `Internal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Leaf(u8),
    Internal(u64),
}

/// A node waiting in the merge queue.
#[derive(Debug)]
struct Queued {
    rank: Rank,
    node: HuffmanNode,
}

impl Queued {
    fn key(&self) -> (u64, Rank) {
        (self.node.weight(), self.rank)
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
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
        self.key().cmp(&other.key())
    }
}

/// A Huffman tree built from a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// A table with a single symbol yields a tree that is just that leaf;
    /// `CodeTable::from_tree` gives it a one-bit code.
    ///
    /// # Errors
    /// - `Error::EmptyInput` if the table has no entries
    /// - `Error::InvalidFrequency` if any weight is zero
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut queue = BinaryHeap::with_capacity(frequencies.len());
        for (symbol, weight) in frequencies.iter() {
            if weight == 0 {
                return Err(Error::InvalidFrequency { symbol, weight });
            }
            queue.push(Reverse(Queued {
                rank: Rank::Leaf(symbol),
                node: HuffmanNode::Leaf { symbol, weight },
            }));
        }

        let mut next_internal = 0u64;
        let root = loop {
            let Reverse(low) = queue.pop().ok_or(Error::EmptyInput)?;
            let Some(Reverse(high)) = queue.pop() else {
                break low.node;
            };

            // Weights are capped rather than wrapped so ordering stays monotone
            let weight = low.node.weight().saturating_add(high.node.weight());
            trace!(weight, low = ?low.rank, high = ?high.rank, "merging nodes");

            queue.push(Reverse(Queued {
                rank: Rank::Internal(next_internal),
                node: HuffmanNode::Internal {
                    weight,
                    low: Box::new(low.node),
                    high: Box::new(high.node),
                },
            }));
            next_internal += 1;
        };

        Ok(Self { root })
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total number of nodes; `2n - 1` for `n` symbols.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

/// Arena slot of the decode-side tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeNode {
    /// Child indices for bit 0 and bit 1; `None` is an unused branch
    Branch([Option<usize>; 2]),
    Leaf(u8),
}

/// Tree rebuilt from a code table, used to walk a payload bit by bit.
///
/// Unlike `HuffmanTree` it tolerates missing branches: a single-symbol table
/// has only the `0` branch, and a header may describe any prefix-free set.
#[derive(Debug, Clone)]
pub struct DecodeTree {
    nodes: Vec<DecodeNode>,
    max_code_len: usize,
}

impl DecodeTree {
    /// Rebuild the tree from every `(symbol, code)` entry of `table`.
    ///
    /// # Errors
    /// `HeaderError::NotPrefixFree` if two codes are equal or one is a
    /// prefix of another.
    pub fn from_table(table: &CodeTable) -> std::result::Result<Self, HeaderError> {
        let mut nodes = vec![DecodeNode::Branch([None, None])];
        let mut max_code_len = 0;

        for (symbol, code) in table.iter() {
            let mut current = 0;
            let len = code.len() as usize;
            max_code_len = max_code_len.max(len);

            for (i, bit) in code.bits_msb_first().enumerate() {
                let DecodeNode::Branch(children) = nodes[current] else {
                    // Walked through another symbol's leaf
                    return Err(HeaderError::NotPrefixFree { symbol });
                };
                let slot = bit as usize;
                let is_last = i + 1 == len;

                current = match (children[slot], is_last) {
                    (Some(_), true) => return Err(HeaderError::NotPrefixFree { symbol }),
                    (Some(child), false) => child,
                    (None, last) => {
                        nodes.push(if last {
                            DecodeNode::Leaf(symbol)
                        } else {
                            DecodeNode::Branch([None, None])
                        });
                        let child = nodes.len() - 1;
                        if let DecodeNode::Branch(children) = &mut nodes[current] {
                            children[slot] = Some(child);
                        }
                        child
                    }
                };
            }
        }

        Ok(Self {
            nodes,
            max_code_len,
        })
    }

    /// Longest code in the table this tree was built from.
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Decode exactly `count` symbols from `reader`.
    ///
    /// Bits after the last symbol are left unread.
    ///
    /// # Errors
    /// - `Error::TruncatedStream` if the reader runs dry first
    /// - `Error::InvalidCode` if a walk takes a missing branch or runs longer
    ///   than the longest code
    pub fn decode(&self, reader: &mut BitReader<'_>, count: u64) -> Result<Vec<u8>> {
        // Every code is at least one bit long
        let capacity = count.min(reader.bits_remaining() as u64) as usize;
        let mut output = Vec::with_capacity(capacity);

        for decoded in 0..count {
            let start = reader.position();
            let mut node = 0;
            let mut depth = 0;

            loop {
                match self.nodes[node] {
                    DecodeNode::Leaf(symbol) => {
                        output.push(symbol);
                        break;
                    }
                    DecodeNode::Branch(children) => {
                        if depth >= self.max_code_len {
                            return Err(Error::InvalidCode { position: start });
                        }
                        if reader.is_empty() {
                            return Err(Error::TruncatedStream {
                                decoded,
                                expected: count,
                            });
                        }
                        let bit = reader.read_bit()?;
                        depth += 1;
                        node = children[bit as usize].ok_or(Error::InvalidCode { position: start })?;
                    }
                }
            }
        }

        Ok(output)
    }
}
