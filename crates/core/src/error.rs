//! Error types for the huffpack codec.
//!
//! Every failure is a distinct, recoverable variant. Encode and decode never
//! hand back partial output: they either return a complete result or one of
//! these errors.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Input: nothing to encode, or a frequency table that cannot form a tree
/// - Header: the preamble of an artifact is malformed
/// - Payload: the bitstream is too short, too long, or walks off the tree
/// - Integrity: decoded output does not match the recorded checksum
#[derive(Debug, Error)]
pub enum Error {
    /// The input contained zero symbols
    #[error("empty input: no symbols to encode")]
    EmptyInput,

    /// A frequency table entry carried a non-positive weight
    #[error("invalid frequency {weight} for symbol {symbol:#04x}")]
    InvalidFrequency { symbol: u8, weight: u64 },

    /// Tree depth exceeded the longest code the format can carry
    #[error("code length {length} for symbol {symbol:#04x} exceeds maximum {max}")]
    CodeLengthTooLong { symbol: u8, length: usize, max: usize },

    /// Header magic, layout, or code table is malformed
    #[error("corrupt header: {0}")]
    CorruptHeader(#[from] HeaderError),

    /// The payload ended before every symbol was recovered
    #[error("truncated stream: decoded {decoded} of {expected} symbols")]
    TruncatedStream { decoded: u64, expected: u64 },

    /// A bit sequence did not terminate at a leaf
    #[error("invalid code at bit position {position}")]
    InvalidCode { position: usize },

    /// Payload bits remain after the declared symbol count was decoded
    #[error("trailing data: {extra_bits} unused bits after the last symbol")]
    TrailingData { extra_bits: usize },

    /// Decoded output does not match the checksum recorded in the header
    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Bit I/O operation failed
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the readable bits
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),

    /// Declared bit length is larger than the backing buffer
    #[error("bit length {bit_len} exceeds buffer of {available} bits")]
    BitLenOutOfRange { bit_len: usize, available: usize },
}

/// Header parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// Invalid magic number at the start of the artifact
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Format version this build does not understand
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    /// Input ended while a header field was being read
    #[error("header ended early while reading {field}")]
    UnexpectedEnd { field: &'static str },

    /// A varint ran past 64 bits
    #[error("varint overflow while reading {field}")]
    VarintOverflow { field: &'static str },

    /// Entry count is zero or larger than the alphabet
    #[error("invalid entry count {0}")]
    InvalidEntryCount(u64),

    /// An entry declared a zero-length code
    #[error("symbol {symbol:#04x} has a zero-length code")]
    ZeroCodeLength { symbol: u8 },

    /// An entry declared a code longer than the format allows
    #[error("symbol {symbol:#04x} has code length {length}, maximum is {max}")]
    CodeLengthTooLong { symbol: u8, length: u8, max: u8 },

    /// Code value has bits set above its declared length
    #[error("code for symbol {symbol:#04x} does not fit in {length} bits")]
    CodeOutOfRange { symbol: u8, length: u8 },

    /// Entries are not in strictly ascending symbol order
    #[error("symbol {symbol:#04x} is duplicated or out of order")]
    UnorderedSymbol { symbol: u8 },

    /// Two codes collide or one is a prefix of another
    #[error("code for symbol {symbol:#04x} is not prefix-free")]
    NotPrefixFree { symbol: u8 },

    /// A valid artifact always encodes at least one symbol
    #[error("invalid symbol count {0}")]
    InvalidSymbolCount(u64),

    /// Pad count cannot exceed seven bits
    #[error("invalid pad bit count {0}")]
    InvalidPadBits(u8),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
