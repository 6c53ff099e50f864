//! Sample input generation.
//!
//! Produces data with a mix of compressibility so the effect of the code
//! table is visible: long runs, prose-like word streams, short repeating
//! patterns, and uniformly random bytes.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Bytes per generated section
const SECTION_BYTES: usize = 4096;

const WORDS: &[&str] = &[
    "the", "of", "and", "a", "to", "in", "is", "you", "that", "it", "he", "was", "for", "on",
    "are", "as", "with", "his", "they", "at", "be", "this", "from", "have", "or", "by",
    "huffman", "code", "tree", "symbol", "prefix", "bit",
];

/// Generate `size_bytes` of sample data, reproducible from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes + SECTION_BYTES);

    while data.len() < size_bytes {
        let section = SECTION_BYTES.min(size_bytes - data.len());

        match rng.gen_range(0..10) {
            // Runs of a single byte
            0..=1 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }
            // Prose-like text
            2..=6 => push_words(&mut rng, &mut data, section),
            // Short repeating pattern
            7..=8 => {
                let pattern: Vec<u8> = (0..rng.gen_range(3..=16)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }
            // Incompressible
            _ => data.extend((0..section).map(|_| rng.gen::<u8>())),
        }
    }

    data.truncate(size_bytes);
    data
}

fn push_words(rng: &mut ChaCha8Rng, data: &mut Vec<u8>, section: usize) {
    let end = data.len() + section;
    while data.len() < end {
        // WORDS is non-empty, so choose always yields
        if let Some(word) = WORDS.choose(rng) {
            data.extend_from_slice(word.as_bytes());
        }
        data.push(if rng.gen_ratio(1, 12) { b'\n' } else { b' ' });
    }
}
