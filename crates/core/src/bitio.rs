//! Bit-level I/O for packing and unpacking prefix codes.
//!
//! `BitWriter` and `BitReader` both operate in MSB-first order: the first bit
//! written lands in the most significant bit of the first byte.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with zero bits and reports how
//!   many were added
//! - BitReader: can be limited to a bit length shorter than its buffer, so the
//!   pad bits are never visible to the decoder
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! // Total: 10111 -> padded to 10111000
//!
//! let (bytes, pad_bits) = writer.finish_with_padding();
//! assert_eq!(pad_bits, 3);
//!
//! let mut reader = BitReader::with_bit_len(&bytes, 5).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(2).unwrap(), 0b11);
//! assert!(reader.is_empty());
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a BitWriter whose output buffer is pre-sized to `bytes`.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.bit_count as usize;
            let take = remaining.min(free);

            // Top `take` bits of what is left to write
            let shift = remaining - take;
            let bits = ((value >> shift) & ((1u64 << take) - 1)) as u8;

            self.bit_buffer |= bits << (free - take);
            self.bit_count += take as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining = shift;
        }

        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u64, 1)
    }

    /// Finish writing, returning the output bytes and the number of zero pad
    /// bits appended to complete the final byte (0-7).
    pub fn finish_with_padding(mut self) -> (Vec<u8>, u8) {
        let pad_bits = if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
            8 - self.bit_count
        } else {
            0
        };
        (self.bytes, pad_bits)
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position` never exceeds `bit_len`
/// - `bit_len` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
    /// Number of readable bits; anything past this is padding
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Create a BitReader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
            bit_len: data.len() * 8,
        }
    }

    /// Create a BitReader that only exposes the first `bit_len` bits.
    ///
    /// # Errors
    /// `BitIoError::BitLenOutOfRange` if `bit_len` is past the end of `data`.
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Result<Self> {
        let available = data.len() * 8;
        if bit_len > available {
            return Err(BitIoError::BitLenOutOfRange { bit_len, available }.into());
        }
        Ok(Self {
            data,
            bit_position: 0,
            bit_len,
        })
    }

    /// Read up to 64 bits, most significant first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            let byte_idx = self.bit_position / 8;
            let bits_in_byte = 8 - self.bit_position % 8;
            let take = remaining.min(bits_in_byte);

            let mask = ((1u16 << take) - 1) as u8;
            let bits = (self.data[byte_idx] >> (bits_in_byte - take)) & mask;

            // `take` is at most 8, so the shift never overflows a u64 for count <= 64
            result = (result << take) | bits as u64;

            self.bit_position += take;
            remaining -= take;
        }

        Ok(result)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_position >= self.bit_len {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let byte = self.data[self.bit_position / 8];
        let bit = (byte >> (7 - self.bit_position % 8)) & 1;
        self.bit_position += 1;
        Ok(bit == 1)
    }

    /// Return the number of readable bits left.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Check if every readable bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b10110011, 8).unwrap();

        let (bytes, pad) = writer.finish_with_padding();
        assert_eq!(bytes, vec![0b10110011]);
        assert_eq!(pad, 0);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(8).unwrap(), 0b10110011);
    }

    #[test]
    fn test_write_read_partial_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        writer.write_bits(0b000, 3).unwrap();

        let (bytes, pad) = writer.finish_with_padding();
        assert_eq!(bytes, vec![0b10111000]);
        assert_eq!(pad, 0);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(2).unwrap(), 0b11);
        assert_eq!(reader.read_bits(3).unwrap(), 0b000);
    }

    #[test]
    fn test_padding_count() {
        let mut writer = BitWriter::new();
        writer.write_bit(true).unwrap();
        assert_eq!(writer.bit_len(), 1);

        let (bytes, pad) = writer.finish_with_padding();
        assert_eq!(bytes, vec![0b10000000]);
        assert_eq!(pad, 7);
    }

    #[test]
    fn test_leading_zeros_survive() {
        // 0010 and 010 are different codes
        let mut writer = BitWriter::new();
        writer.write_bits(0b0010, 4).unwrap();
        writer.write_bits(0b010, 3).unwrap();
        let (bytes, pad) = writer.finish_with_padding();
        assert_eq!(bytes, vec![0b0010_0100]);
        assert_eq!(pad, 1);
    }

    #[test]
    fn test_multi_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1010101111110000, 16).unwrap();

        let (bytes, _) = writer.finish_with_padding();
        assert_eq!(bytes, vec![0b10101011, 0b11110000]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(16).unwrap(), 0b1010101111110000);
    }

    #[test]
    fn test_bit_len_hides_padding() {
        let data = [0b1100_0000];
        let mut reader = BitReader::with_bit_len(&data, 2).unwrap();
        assert!(reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert!(reader.is_empty());
        assert!(matches!(
            reader.read_bit(),
            Err(Error::BitIo(BitIoError::UnexpectedEof))
        ));
    }

    #[test]
    fn test_bit_len_out_of_range() {
        let data = [0u8; 2];
        assert!(matches!(
            BitReader::with_bit_len(&data, 17),
            Err(Error::BitIo(BitIoError::BitLenOutOfRange { bit_len: 17, available: 16 }))
        ));
    }

    #[test]
    fn test_read_past_end() {
        let data = vec![0b10101010];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(8).unwrap(), 0b10101010);
        assert!(reader.read_bits(1).is_err());
    }

    #[test]
    fn test_zero_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xFF, 0).unwrap();
        let (bytes, pad) = writer.finish_with_padding();
        assert!(bytes.is_empty());
        assert_eq!(pad, 0);

        let mut reader = BitReader::new(&[0xFF]);
        assert_eq!(reader.read_bits(0).unwrap(), 0);
    }

    #[test]
    fn test_invalid_bit_count() {
        let mut writer = BitWriter::new();
        assert!(matches!(
            writer.write_bits(0, 65),
            Err(Error::BitIo(BitIoError::InvalidBitCount(65)))
        ));
    }

    #[test]
    fn test_64_bit_values() {
        let mut writer = BitWriter::new();
        writer.write_bit(true).unwrap();
        let val = 0x123456789ABCDEF0u64;
        writer.write_bits(val, 64).unwrap();

        let (bytes, pad) = writer.finish_with_padding();
        assert_eq!(pad, 7);
        let mut reader = BitReader::new(&bytes);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(64).unwrap(), val);
    }

    #[test]
    fn test_bit_by_bit() {
        let mut writer = BitWriter::new();
        for &bit in &[true, false, true, true, false, false, true, false] {
            writer.write_bit(bit).unwrap();
        }

        let (bytes, _) = writer.finish_with_padding();
        assert_eq!(bytes, vec![0b10110010]);

        let mut reader = BitReader::new(&bytes);
        let expected = [true, false, true, true, false, false, true, false];
        for &exp in &expected {
            assert_eq!(reader.read_bit().unwrap(), exp);
        }
    }

    #[test]
    fn test_bits_remaining() {
        let data = vec![0xFF, 0xFF];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.bits_remaining(), 16);
        reader.read_bits(5).unwrap();
        assert_eq!(reader.bits_remaining(), 11);
        assert_eq!(reader.position(), 5);
        reader.read_bits(11).unwrap();
        assert_eq!(reader.bits_remaining(), 0);
        assert!(reader.is_empty());
    }
}
