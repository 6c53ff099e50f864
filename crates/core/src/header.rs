//! Artifact header serialization and parsing.
//!
//! The header makes an artifact self-describing: it carries the full code
//! table, so decoding needs no outside knowledge. Every field is either fixed
//! width or length-prefixed; there are no delimiter bytes that could collide
//! with a data symbol.
//!
//! # Header Format
//!
//! ```text
//! +----------------------+
//! | Magic (4 bytes)      |  0x48 0x55 0x46 0x50 ("HUFP")
//! +----------------------+
//! | version (1)          |  currently 1
//! +----------------------+
//! | num_entries (varint) |  1..=256
//! +----------------------+
//! | per entry, ascending symbol order:
//! |   symbol (1)         |
//! |   bit_len (1)        |  1..=64
//! |   code (ceil(bit_len/8))  big-endian, zero-padded on the left
//! +----------------------+
//! | symbol_count(varint) |  number of encoded symbols, at least 1
//! +----------------------+
//! | pad_bits (1)         |  0..=7 zero bits ending the payload
//! +----------------------+
//! | crc32 (4)            |  u32 little-endian, checksum of the original input
//! +----------------------+
//! | payload              |  packed codes, MSB first
//! +----------------------+
//! ```
//!
//! Varints are unsigned LEB128: seven bits per byte, low group first, high
//! bit set on every byte but the last.

use crate::codebook::{CodeTable, PrefixCode, MAX_CODE_LEN};
use crate::error::{HeaderError, Result};

/// Magic number for artifacts: "HUFP"
pub const MAGIC: [u8; 4] = [0x48, 0x55, 0x46, 0x50];

/// Current format version
pub const VERSION: u8 = 1;

/// Largest number of table entries (one per byte value)
pub const MAX_ENTRIES: u64 = 256;

/// Longest LEB128 encoding of a u64
const MAX_VARINT_LEN: usize = 10;

/// Everything decode needs besides the payload itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Code for every symbol that appears in the payload
    pub table: CodeTable,

    /// Number of symbols encoded in the payload
    pub symbol_count: u64,

    /// Zero bits appended to complete the last payload byte (0-7)
    pub pad_bits: u8,

    /// CRC32 of the original input
    pub checksum: u32,
}

impl Header {
    /// Serialize the header. The payload is appended by the caller.
    pub fn write(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MAGIC.len() + 1 + self.table.len() * 4 + 16);

        out.extend_from_slice(&MAGIC);
        out.push(VERSION);

        write_varint(self.table.len() as u64, &mut out);
        for (symbol, code) in self.table.iter() {
            out.push(symbol);
            out.push(code.len());
            let width = code_width(code.len());
            out.extend_from_slice(&code.bits().to_be_bytes()[8 - width..]);
        }

        write_varint(self.symbol_count, &mut out);
        out.push(self.pad_bits);
        out.extend_from_slice(&self.checksum.to_le_bytes());

        out
    }

    /// Parse a header from the start of `bytes`.
    ///
    /// Returns the header and the offset at which the payload begins.
    ///
    /// # Errors
    /// `Error::CorruptHeader` for a bad magic number, unknown version,
    /// truncated or malformed field, or an invalid table entry.
    pub fn read(bytes: &[u8]) -> Result<(Header, usize)> {
        let mut cursor = Cursor::new(bytes);

        let magic: [u8; 4] = cursor.array("magic")?;
        if magic != MAGIC {
            return Err(HeaderError::InvalidMagic {
                expected: MAGIC,
                actual: magic,
            }
            .into());
        }

        let version = cursor.byte("version")?;
        if version != VERSION {
            return Err(HeaderError::UnsupportedVersion(version).into());
        }

        let num_entries = cursor.varint("entry count")?;
        if num_entries == 0 || num_entries > MAX_ENTRIES {
            return Err(HeaderError::InvalidEntryCount(num_entries).into());
        }

        let mut entries = Vec::with_capacity(num_entries as usize);
        let mut previous: Option<u8> = None;
        for _ in 0..num_entries {
            let symbol = cursor.byte("entry symbol")?;
            if previous.is_some_and(|p| p >= symbol) {
                return Err(HeaderError::UnorderedSymbol { symbol }.into());
            }
            previous = Some(symbol);

            let length = cursor.byte("entry bit length")?;
            if length == 0 {
                return Err(HeaderError::ZeroCodeLength { symbol }.into());
            }
            if length > MAX_CODE_LEN {
                return Err(HeaderError::CodeLengthTooLong {
                    symbol,
                    length,
                    max: MAX_CODE_LEN,
                }
                .into());
            }

            let raw = cursor.take(code_width(length), "entry code")?;
            let bits = raw.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
            let code = PrefixCode::new(bits, length)
                .ok_or(HeaderError::CodeOutOfRange { symbol, length })?;

            entries.push((symbol, code));
        }

        let symbol_count = cursor.varint("symbol count")?;
        if symbol_count == 0 {
            return Err(HeaderError::InvalidSymbolCount(symbol_count).into());
        }

        let pad_bits = cursor.byte("pad bits")?;
        if pad_bits > 7 {
            return Err(HeaderError::InvalidPadBits(pad_bits).into());
        }

        let checksum = u32::from_le_bytes(cursor.array("checksum")?);

        let header = Header {
            table: CodeTable::from_entries(entries),
            symbol_count,
            pad_bits,
            checksum,
        };
        Ok((header, cursor.position()))
    }
}

/// Bytes used to store a code of `len` bits.
fn code_width(len: u8) -> usize {
    (len as usize).div_ceil(8)
}

/// Append `value` as an unsigned LEB128 varint.
pub fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Forward-only reader over header bytes.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, n: usize, field: &'static str) -> std::result::Result<&'a [u8], HeaderError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(HeaderError::UnexpectedEnd { field })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> std::result::Result<[u8; N], HeaderError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    fn byte(&mut self, field: &'static str) -> std::result::Result<u8, HeaderError> {
        Ok(self.take(1, field)?[0])
    }

    fn varint(&mut self, field: &'static str) -> std::result::Result<u64, HeaderError> {
        let mut value = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.byte(field)?;
            let group = (byte & 0x7F) as u64;
            let shift = 7 * i as u32;

            // The tenth byte may only contribute the single top bit
            if i == MAX_VARINT_LEN - 1 && group > 1 {
                return Err(HeaderError::VarintOverflow { field });
            }
            value |= group << shift;

            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(HeaderError::VarintOverflow { field })
    }
}
