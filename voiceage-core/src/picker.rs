//! Content-hash deterministic picker
//!
//! The raw upload bytes are hashed once into a [`ContentSeed`]. Flavor text
//! selection, catalog fallbacks and job tie-breaks all read from that seed, so
//! the same file always yields the same report.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// SHA-256 digest of the request's raw audio bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSeed {
    digest: [u8; 32],
}

impl ContentSeed {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            digest: Sha256::digest(bytes).into(),
        }
    }

    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Reduce the full 256-bit digest (big-endian) modulo `len`
    ///
    /// `len` must be non-zero.
    fn reduce(&self, len: usize) -> usize {
        let modulus = len as u128;
        let mut remainder: u128 = 0;
        for &byte in &self.digest {
            remainder = ((remainder << 8) | byte as u128) % modulus;
        }
        remainder as usize
    }

    /// Select one element of `pool`
    pub fn pick<'a, T>(&self, pool: &'a [T]) -> Result<&'a T> {
        if pool.is_empty() {
            return Err(Error::EmptyPool("pick called with an empty pool"));
        }
        Ok(&pool[self.reduce(pool.len())])
    }

    /// Lowest 16 bits of the digest
    pub fn low16(&self) -> u16 {
        u16::from_be_bytes([self.digest[30], self.digest[31]])
    }

    /// Secondary ranking key for `name`: seed XOR name hash, truncated to 16 bits
    pub fn tiebreak_key(&self, name: &str) -> u16 {
        let name_digest: [u8; 32] = Sha256::digest(name.as_bytes()).into();
        let name_low = u16::from_be_bytes([name_digest[30], name_digest[31]]);
        self.low16() ^ name_low
    }
}

/// Select one element of `pool` from the hash of `seed_bytes`
///
/// Same seed bytes always select the same element. An empty pool is a
/// configuration error.
pub fn pick<'a, T>(pool: &'a [T], seed_bytes: &[u8]) -> Result<&'a T> {
    ContentSeed::from_bytes(seed_bytes).pick(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_is_deterministic() {
        let pool = ["a", "b", "c", "d", "e", "f"];
        let seed = b"RIFF....WAVEfmt some audio bytes";
        let first = pick(&pool, seed).unwrap();
        for _ in 0..10 {
            assert_eq!(pick(&pool, seed).unwrap(), first);
        }
    }

    #[test]
    fn test_pick_empty_pool_fails() {
        let pool: [u8; 0] = [];
        let result = pick(&pool, b"bytes");
        assert!(matches!(result, Err(Error::EmptyPool(_))));
    }

    #[test]
    fn test_single_element_pool() {
        let pool = [42];
        assert_eq!(*pick(&pool, b"").unwrap(), 42);
        assert_eq!(*pick(&pool, b"anything").unwrap(), 42);
    }

    #[test]
    fn test_varying_seed_never_fails() {
        let pool = [1, 2, 3, 4, 5, 6, 7];
        let mut seen = std::collections::HashSet::new();
        for i in 0u8..=255 {
            let seed = [b'x', i, b'y'];
            let value = pick(&pool, &seed).unwrap();
            seen.insert(*value);
        }
        // 256 different seeds over 7 slots should hit more than one slot
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_reduce_matches_big_integer_modulo() {
        // Digest of the empty input is a published constant
        let seed = ContentSeed::from_bytes(b"");
        assert_eq!(
            seed.digest()[..4],
            [0xe3, 0xb0, 0xc4, 0x42],
        );
        // Modulo 256 only depends on the last byte
        assert_eq!(seed.reduce(256), seed.digest()[31] as usize);
        // Modulo 65536 only depends on the last two bytes
        assert_eq!(seed.reduce(65536), seed.low16() as usize);
    }

    #[test]
    fn test_tiebreak_key_depends_on_name_and_seed() {
        let seed_a = ContentSeed::from_bytes(b"file a");
        let seed_b = ContentSeed::from_bytes(b"file b");
        assert_eq!(seed_a.tiebreak_key("MC"), seed_a.tiebreak_key("MC"));
        // The name hash cancels out between two seeds
        assert_eq!(
            seed_a.tiebreak_key("MC") ^ seed_b.tiebreak_key("MC"),
            seed_a.low16() ^ seed_b.low16()
        );
    }
}
