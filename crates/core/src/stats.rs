//! Compression statistics for a single encode.
//!
//! Gives a view of how well the code table fits the input: sizes, ratio,
//! average code length, and the Shannon entropy lower bound for comparison.

use crate::codebook::CodeTable;
use crate::frequency::FrequencyTable;

/// Sizes and code-length figures for one encoded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionStats {
    /// Symbols in the original input
    pub input_bytes: u64,

    /// Header bytes (magic through checksum)
    pub header_bytes: u64,

    /// Packed payload bytes
    pub payload_bytes: u64,

    /// Distinct symbols in the input
    pub distinct_symbols: usize,

    /// Longest code assigned
    pub max_code_len: u8,

    /// Sum of code lengths over the whole input
    pub payload_bits: u64,

    /// Sum over symbols of count * -log2(p), rounded up to whole bits
    pub entropy_bits: u64,
}

impl CompressionStats {
    pub fn new(
        frequencies: &FrequencyTable,
        table: &CodeTable,
        header_bytes: usize,
        payload_bytes: usize,
    ) -> Self {
        let total = frequencies.total();

        let payload_bits = frequencies
            .iter()
            .map(|(symbol, count)| count * table.get(symbol).map_or(0, |c| c.len() as u64))
            .sum();

        let entropy: f64 = frequencies
            .iter()
            .map(|(_, count)| {
                let p = count as f64 / total as f64;
                -(count as f64) * p.log2()
            })
            .sum();

        Self {
            input_bytes: total,
            header_bytes: header_bytes as u64,
            payload_bytes: payload_bytes as u64,
            distinct_symbols: frequencies.len(),
            max_code_len: table.max_code_len(),
            payload_bits,
            entropy_bits: entropy.ceil() as u64,
        }
    }

    /// Total artifact size in bytes.
    pub fn output_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }

    /// Compression ratio (output / input).
    ///
    /// Returns 0.0 if the input was empty.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes() as f64 / self.input_bytes as f64
        }
    }

    /// Average code length in bits per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.input_bytes as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Compression ===");
        println!("Input:   {} bytes", self.input_bytes);
        println!(
            "Output:  {} bytes (header {} + payload {})",
            self.output_bytes(),
            self.header_bytes,
            self.payload_bytes
        );
        println!("Ratio:   {:.1}%", self.compression_ratio() * 100.0);
        println!();
        println!("=== Codes ===");
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Longest code:     {} bits", self.max_code_len);
        println!("Bits per symbol:  {:.3}", self.bits_per_symbol());
        println!("Entropy bound:    {} bits ({} in payload)", self.entropy_bits, self.payload_bits);
    }

    /// Export stats as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "input_bytes={}\n\
             output_bytes={}\n\
             header_bytes={}\n\
             payload_bytes={}\n\
             distinct_symbols={}\n\
             max_code_len={}\n\
             payload_bits={}\n\
             entropy_bits={}\n\
             compression_ratio={:.4}\n",
            self.input_bytes,
            self.output_bytes(),
            self.header_bytes,
            self.payload_bytes,
            self.distinct_symbols,
            self.max_code_len,
            self.payload_bits,
            self.entropy_bits,
            self.compression_ratio(),
        )
    }
}
