//! huffpack-core: Huffman compression with a self-describing binary header
//!
//! This library compresses a single in-memory buffer into one artifact and
//! restores it exactly:
//! - Counts byte frequencies
//! - Builds a Huffman tree with a fixed tie-break rule
//! - Derives a prefix-free code table
//! - Writes the table into a length-prefixed header
//! - Packs codes MSB-first into a byte-aligned payload with a recorded pad count
//!
//! # Architecture
//!
//! - `frequency`: symbol counting
//! - `tree`: Huffman tree construction and the decode-side tree
//! - `codebook`: prefix codes, code tables, and payload packing
//! - `bitio`: low-level bit reading/writing
//! - `header`: artifact header serialization
//! - `codec`: `encode` / `decode` entry points
//! - `stats`: compression figures for an encode
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Deterministic**: Identical input always yields a byte-identical artifact
//! - **Pure**: No file or network access; callers own all I/O
//!
//! # Example
//! ```
//! let artifact = huffpack_core::encode(b"aaaabbbcc").unwrap();
//! let restored = huffpack_core::decode(artifact.as_bytes()).unwrap();
//! assert_eq!(restored, b"aaaabbbcc");
//! ```

pub mod bitio;
pub mod codebook;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod header;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use codebook::{CodeTable, PrefixCode};
pub use codec::{decode, encode, EncodedArtifact};
pub use error::{Error, HeaderError, Result};
pub use header::Header;
pub use stats::CompressionStats;
