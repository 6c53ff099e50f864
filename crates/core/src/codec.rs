//! Encode and decode entry points.
//!
//! Both are pure functions over in-memory buffers. Encode runs in two passes:
//! the payload is packed first so the header, which records the pad bit
//! count, can be written in full before the payload is appended.

use tracing::debug;

use crate::bitio::BitReader;
use crate::codebook::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::header::Header;
use crate::stats::CompressionStats;
use crate::tree::{DecodeTree, HuffmanTree};

/// The output of `encode`: header bytes followed by the packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    bytes: Vec<u8>,
    header_len: usize,
    stats: CompressionStats,
}

impl EncodedArtifact {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length of the header, which is also the payload offset.
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    pub fn payload_len(&self) -> usize {
        self.bytes.len() - self.header_len
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[self.header_len..]
    }

    pub fn stats(&self) -> &CompressionStats {
        &self.stats
    }
}

impl AsRef<[u8]> for EncodedArtifact {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Compress `input` into a self-describing artifact.
///
/// # Errors
/// - `Error::EmptyInput` if `input` is empty
/// - `Error::CodeLengthTooLong` if the tree is deeper than the format allows
pub fn encode(input: &[u8]) -> Result<EncodedArtifact> {
    let frequencies = FrequencyTable::from_symbols(input)?;
    let tree = HuffmanTree::build(&frequencies)?;
    let table = CodeTable::from_tree(&tree)?;
    debug!(
        symbols = input.len(),
        distinct = table.len(),
        max_code_len = table.max_code_len(),
        "built code table"
    );

    let (payload, pad_bits) = table.pack(input)?;

    let header = Header {
        table,
        symbol_count: input.len() as u64,
        pad_bits,
        checksum: crc32fast::hash(input),
    };
    let mut bytes = header.write();
    let header_len = bytes.len();
    bytes.extend_from_slice(&payload);

    let stats = CompressionStats::new(&frequencies, &header.table, header_len, payload.len());
    debug!(
        header_len,
        payload_len = payload.len(),
        pad_bits,
        "encoded artifact"
    );

    Ok(EncodedArtifact {
        bytes,
        header_len,
        stats,
    })
}

/// Recover the original input from an artifact produced by `encode`.
///
/// # Errors
/// - `Error::CorruptHeader` if the header is malformed or its table is not
///   prefix-free
/// - `Error::TruncatedStream` if the payload ends before every symbol is read
/// - `Error::InvalidCode` if the payload contains a bit sequence with no symbol
/// - `Error::TrailingData` if payload bits remain after the last symbol
/// - `Error::ChecksumMismatch` if the output does not match the recorded CRC
pub fn decode(artifact: &[u8]) -> Result<Vec<u8>> {
    let (header, offset) = Header::read(artifact)?;
    let payload = &artifact[offset..];
    debug!(
        entries = header.table.len(),
        symbol_count = header.symbol_count,
        pad_bits = header.pad_bits,
        payload_len = payload.len(),
        "parsed header"
    );

    let tree = DecodeTree::from_table(&header.table)?;

    // A payload too short to even hold its pad bits is missing data
    let Some(bit_len) = (payload.len() * 8).checked_sub(header.pad_bits as usize) else {
        return Err(Error::TruncatedStream {
            decoded: 0,
            expected: header.symbol_count,
        });
    };
    let mut reader = BitReader::with_bit_len(payload, bit_len)?;

    let output = tree.decode(&mut reader, header.symbol_count)?;

    if !reader.is_empty() {
        return Err(Error::TrailingData {
            extra_bits: reader.bits_remaining(),
        });
    }

    let actual = crc32fast::hash(&output);
    if actual != header.checksum {
        return Err(Error::ChecksumMismatch {
            expected: header.checksum,
            actual,
        });
    }

    debug!(symbols = output.len(), "decoded artifact");
    Ok(output)
}
