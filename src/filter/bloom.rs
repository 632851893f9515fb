//! Bloom filter over crawled URLs
//!
//! With the default sizing (512 bits, 3 hashes) and roughly 100 URLs per crawl
//! the false-positive rate is about `(1 - e^(-3*100/512))^3 ≈ 0.087`. A false
//! positive skips a URL that was never visited; a URL that was recorded is
//! always reported as seen.

use sha2::{Digest, Sha256, Sha384, Sha512};
use std::sync::{Mutex, PoisonError};

/// Probabilistic set of URLs already seen during one crawl run
///
/// Bits are only ever set. The filter is safe to share between concurrent
/// workers: the test and the mark happen under one lock, so two callers racing
/// on the same URL cannot both see it as new.
#[derive(Debug)]
pub struct DuplicateFilter {
    bits: Mutex<Vec<u64>>,
    size: usize,
    hashes: usize,
}

impl DuplicateFilter {
    /// Creates an empty filter with `size` bits and `hashes` hash functions
    ///
    /// Both values are clamped to at least 1.
    pub fn new(size: usize, hashes: usize) -> Self {
        let size = size.max(1);
        let words = size.div_ceil(64);
        Self {
            bits: Mutex::new(vec![0; words]),
            size,
            hashes: hashes.max(1),
        }
    }

    /// Number of bits in the filter
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of hash functions
    pub fn hashes(&self) -> usize {
        self.hashes
    }

    /// Returns true if the URL was probably recorded before; records it otherwise
    ///
    /// All positions are set unconditionally, so calling this on a seen URL is
    /// harmless.
    pub fn test_and_add(&self, url: &str) -> bool {
        let positions: Vec<usize> = (0..self.hashes).map(|i| self.position(i, url)).collect();

        let mut bits = self.bits.lock().unwrap_or_else(PoisonError::into_inner);
        let mut seen = true;
        for pos in positions {
            let (word, mask) = (pos / 64, 1u64 << (pos % 64));
            if bits[word] & mask == 0 {
                seen = false;
                bits[word] |= mask;
            }
        }
        seen
    }

    /// Returns true if every position for the URL is set, without recording it
    pub fn contains(&self, url: &str) -> bool {
        let bits = self.bits.lock().unwrap_or_else(PoisonError::into_inner);
        (0..self.hashes).all(|i| {
            let pos = self.position(i, url);
            bits[pos / 64] & (1u64 << (pos % 64)) != 0
        })
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> usize {
        let bits = self.bits.lock().unwrap_or_else(PoisonError::into_inner);
        bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Bit position for hash function `index`
    ///
    /// Functions cycle through SHA-256, SHA-384 and SHA-512; from the fourth
    /// function on, the round number is fed in as a salt ahead of the URL.
    fn position(&self, index: usize, url: &str) -> usize {
        let round = index / 3;
        let digest = match index % 3 {
            0 => salted::<Sha256>(round, url),
            1 => salted::<Sha384>(round, url),
            _ => salted::<Sha512>(round, url),
        };
        reduce(&digest, self.size)
    }
}

impl Default for DuplicateFilter {
    fn default() -> Self {
        Self::new(512, 3)
    }
}

fn salted<D: Digest>(round: usize, url: &str) -> Vec<u8> {
    let mut hasher = D::new();
    if round > 0 {
        hasher.update((round as u64).to_be_bytes());
    }
    hasher.update(url.as_bytes());
    hasher.finalize().to_vec()
}

/// Reduces a digest, read as a big-endian integer, modulo `m`
fn reduce(digest: &[u8], m: usize) -> usize {
    let m = m as u128;
    let rem = digest
        .iter()
        .fold(0u128, |acc, &byte| (acc * 256 + byte as u128) % m);
    rem as usize
}
