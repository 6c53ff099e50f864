//! Integration tests for the full encode/decode pipeline.
//!
//! These tests go through the public API only: input -> encode -> artifact
//! bytes -> decode -> output, checking that output matches input and that
//! damaged artifacts are rejected rather than decoded into garbage.

use huffpack_core::{
    codebook::CodeTable,
    decode, encode,
    error::{Error, HeaderError},
    frequency::FrequencyTable,
    header::Header,
    tree::HuffmanTree,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn round_trip(data: &[u8]) {
    let artifact = encode(data).expect("encode failed");
    let decoded = decode(artifact.as_bytes()).expect("decode failed");
    assert_eq!(decoded, data, "output doesn't match input");
}

/// Scenario: "aaaabbbcc" gets codes a=0, c=10, b=11 and round-trips.
#[test]
fn test_aaaabbbcc_scenario() {
    let data = b"aaaabbbcc";
    let artifact = encode(data).unwrap();

    let (header, offset) = Header::read(artifact.as_bytes()).unwrap();
    assert_eq!(offset, artifact.header_len());
    assert_eq!(header.symbol_count, 9);
    assert_eq!(header.pad_bits, 2);

    let a = header.table.get(b'a').unwrap();
    let b = header.table.get(b'b').unwrap();
    let c = header.table.get(b'c').unwrap();
    assert_eq!(a.to_string(), "0");
    assert_eq!(b.to_string(), "11");
    assert_eq!(c.to_string(), "10");
    assert!(a.len() <= c.len());

    assert_eq!(decode(artifact.as_bytes()).unwrap(), data);
}

/// Scenario: a single repeated symbol still gets a 1-bit code.
#[test]
fn test_single_symbol_scenario() {
    let artifact = encode(b"zzzz").unwrap();
    let (header, _) = Header::read(artifact.as_bytes()).unwrap();

    assert_eq!(header.table.len(), 1);
    assert!(header.table.get(b'z').unwrap().len() >= 1);
    assert_eq!(decode(artifact.as_bytes()).unwrap(), b"zzzz");
}

/// Scenario: flipping the magic marker is a header error, never output.
#[test]
fn test_corrupt_magic_scenario() {
    let mut bytes = encode(b"some text to protect").unwrap().into_bytes();
    for byte in &mut bytes[..4] {
        *byte ^= 0xFF;
    }

    assert!(matches!(
        decode(&bytes),
        Err(Error::CorruptHeader(HeaderError::InvalidMagic { .. }))
    ));
}

/// Scenario: dropping the last payload byte is a truncated stream.
#[test]
fn test_truncated_payload_scenario() {
    let data = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let mut bytes = encode(&data).unwrap().into_bytes();
    bytes.pop();

    assert!(matches!(decode(&bytes), Err(Error::TruncatedStream { .. })));
}

#[test]
fn test_empty_input() {
    assert!(matches!(encode(b""), Err(Error::EmptyInput)));
}

/// Test with all symbols present (full 256-byte alphabet).
#[test]
fn test_all_symbols() {
    let input_data: Vec<u8> = (0..=255).collect();
    round_trip(&input_data);
}

#[test]
fn test_non_ascii_text() {
    round_trip("naïve café — Ünïcödé ✓ 日本語".as_bytes());
}

#[test]
fn test_two_symbols() {
    round_trip(b"ab");
    round_trip(b"abbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
}

#[test]
fn test_single_byte() {
    round_trip(b"A");
}

/// Test with large data of one repeated byte.
#[test]
fn test_large_single_symbol() {
    let input_data = vec![b'X'; 128 * 1024];
    let artifact = encode(&input_data).unwrap();

    // One bit per symbol
    assert_eq!(artifact.payload_len(), input_data.len() / 8);
    assert_eq!(decode(artifact.as_bytes()).unwrap(), input_data);
}

#[test]
fn test_seeded_random_inputs() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let len = rng.gen_range(1..2000);
        let alphabet = rng.gen_range(1..=256usize);
        let data: Vec<u8> = (0..len).map(|_| rng.gen_range(0..alphabet) as u8).collect();
        round_trip(&data);
    }
}

#[test]
fn test_skewed_distribution_compresses() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let data: Vec<u8> = (0..10_000)
        .map(|_| if rng.gen_bool(0.9) { b'e' } else { rng.gen() })
        .collect();

    let artifact = encode(&data).unwrap();
    assert!(artifact.as_bytes().len() < data.len() / 2);
    assert_eq!(decode(artifact.as_bytes()).unwrap(), data);
}

#[test]
fn test_deterministic_artifacts() {
    let data = b"it was the best of times, it was the worst of times".repeat(10);
    let first = encode(&data).unwrap();
    let second = encode(&data).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_generated_tables_are_prefix_free() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..20 {
        let data: Vec<u8> = (0..rng.gen_range(1..5000)).map(|_| rng.gen()).collect();
        let freqs = FrequencyTable::from_symbols(&data).unwrap();
        let table = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap()).unwrap();

        let codes: Vec<_> = table.iter().map(|(_, c)| *c).collect();
        for (i, a) in codes.iter().enumerate() {
            assert!(a.len() >= 1);
            for b in &codes[i + 1..] {
                assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a));
            }
        }
    }
}

#[test]
fn test_header_round_trip_generated_tables() {
    let mut rng = ChaCha8Rng::seed_from_u64(1234);

    for _ in 0..20 {
        let data: Vec<u8> = (0..rng.gen_range(1..3000)).map(|_| rng.gen_range(0..64)).collect();
        let freqs = FrequencyTable::from_symbols(&data).unwrap();
        let table = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap()).unwrap();

        let header = Header {
            table,
            symbol_count: rng.gen(),
            pad_bits: rng.gen_range(0..8),
            checksum: rng.gen(),
        };
        let bytes = header.write();
        let (parsed, offset) = Header::read(&bytes).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(offset, bytes.len());
    }
}

/// Every single-bit flip of the payload must fail or restore the exact input.
#[test]
fn test_payload_bit_flips_never_decode_wrong() {
    let data = b"abracadabra, said the magician";
    let artifact = encode(data).unwrap();
    let start = artifact.header_len();

    for i in start..artifact.as_bytes().len() {
        for bit in 0..8 {
            let mut bytes = artifact.as_bytes().to_vec();
            bytes[i] ^= 1 << bit;
            if let Ok(decoded) = decode(&bytes) {
                // Only a flip inside the pad bits can leave the output intact
                assert_eq!(decoded, data);
            }
        }
    }
}

#[test]
fn test_artifact_truncations_never_panic() {
    let artifact = encode(b"hello hello hello world").unwrap();
    let bytes = artifact.as_bytes();

    for len in 0..bytes.len() {
        assert!(decode(&bytes[..len]).is_err(), "prefix of {len} bytes decoded");
    }
}

#[test]
fn test_stats_match_artifact() {
    let data = b"aaaabbbcc";
    let artifact = encode(data).unwrap();
    let stats = artifact.stats();

    assert_eq!(stats.input_bytes, 9);
    assert_eq!(stats.header_bytes as usize, artifact.header_len());
    assert_eq!(stats.payload_bytes as usize, artifact.payload_len());
    assert_eq!(stats.output_bytes() as usize, artifact.as_bytes().len());
    assert_eq!(stats.payload_bits, 14);
}
