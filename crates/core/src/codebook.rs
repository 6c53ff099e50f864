//! Prefix code tables.
//!
//! A code is always carried as a `(bits, len)` pair. Leading zero bits are
//! significant: `0010` (len 4) and `010` (len 3) are different codes even
//! though both have the integer value 2.

use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::bitio::BitWriter;
use crate::error::{Error, Result};
use crate::tree::{HuffmanNode, HuffmanTree};

/// Longest code the format can carry, in bits.
pub const MAX_CODE_LEN: u8 = 64;

/// A variable-length code: the low `len` bits of `bits`, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefixCode {
    bits: u64,
    len: u8,
}

impl PrefixCode {
    /// Create a code, or `None` if `len` is outside `1..=64` or `bits` has
    /// anything set above `len`.
    pub fn new(bits: u64, len: u8) -> Option<Self> {
        if len == 0 || len > MAX_CODE_LEN {
            return None;
        }
        if len < 64 && bits >> len != 0 {
            return None;
        }
        Some(Self { bits, len })
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    /// Always false; a code has at least one bit.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate the code's bits from first to last.
    pub fn bits_msb_first(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |shift| (self.bits >> shift) & 1 == 1)
    }

    /// True if `self` is a bit-prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &PrefixCode) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for PrefixCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits_msb_first() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to prefix code mapping, iterated in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, PrefixCode>,
}

impl CodeTable {
    /// Derive the code of every leaf by walking the tree from the root.
    ///
    /// Descending to `low` appends 0 and to `high` appends 1. A tree that is
    /// a lone leaf gets the code `0` so no symbol ever has an empty code.
    ///
    /// # Errors
    /// `Error::CodeLengthTooLong` if a leaf sits deeper than `MAX_CODE_LEN`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = BTreeMap::new();

        match tree.root() {
            HuffmanNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, PrefixCode { bits: 0, len: 1 });
            }
            root => collect_codes(root, 0, 0, &mut codes)?,
        }

        Ok(Self { codes })
    }

    /// Build a table from explicit entries. A repeated symbol keeps its last code.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u8, PrefixCode)>,
    {
        Self {
            codes: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&PrefixCode> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &PrefixCode)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Longest code length in the table (0 if empty).
    pub fn max_code_len(&self) -> u8 {
        self.codes.values().map(PrefixCode::len).max().unwrap_or(0)
    }

    /// Number of payload bits needed to encode `symbols`, or `None` if some
    /// symbol has no code.
    pub fn encoded_bit_len(&self, symbols: &[u8]) -> Option<usize> {
        symbols
            .iter()
            .map(|s| self.codes.get(s).map(|c| c.len as usize))
            .sum()
    }

    /// Pack the code of every symbol, in input order, into a byte-aligned
    /// bitstream. Returns the bytes and the number of zero pad bits that
    /// complete the last byte.
    ///
    /// # Errors
    /// `Error::InvalidCode` if a symbol has no entry in the table.
    pub fn pack(&self, symbols: &[u8]) -> Result<(Vec<u8>, u8)> {
        let bit_len = self.encoded_bit_len(symbols).unwrap_or(0);
        let mut writer = BitWriter::with_capacity(bit_len.div_ceil(8));

        for &symbol in symbols {
            let code = self.codes.get(&symbol).ok_or(Error::InvalidCode {
                position: writer.bit_len(),
            })?;
            writer.write_bits(code.bits, code.len as usize)?;
        }

        Ok(writer.finish_with_padding())
    }
}

fn collect_codes(
    node: &HuffmanNode,
    bits: u64,
    depth: usize,
    codes: &mut BTreeMap<u8, PrefixCode>,
) -> Result<()> {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            trace!(symbol, depth, bits, "assigned code");
            codes.insert(
                *symbol,
                PrefixCode {
                    bits,
                    len: depth as u8,
                },
            );
        }
        HuffmanNode::Internal { low, high, .. } => {
            if depth >= MAX_CODE_LEN as usize {
                let symbol = first_symbol(node);
                return Err(Error::CodeLengthTooLong {
                    symbol,
                    length: depth + 1,
                    max: MAX_CODE_LEN as usize,
                });
            }
            collect_codes(low, bits << 1, depth + 1, codes)?;
            collect_codes(high, (bits << 1) | 1, depth + 1, codes)?;
        }
    }
    Ok(())
}

/// Leftmost leaf below `node`, for error reporting.
fn first_symbol(node: &HuffmanNode) -> u8 {
    match node {
        HuffmanNode::Leaf { symbol, .. } => *symbol,
        HuffmanNode::Internal { low, .. } => first_symbol(low),
    }
}
