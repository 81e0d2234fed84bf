//! Secure randomness capability.

use crate::error::{FairDiceError, Result};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Source of cryptographically secure randomness.
///
/// The protocol receives this as a capability instead of reaching for a
/// process-global generator. Implementations:
/// - OsCryptoProvider for real games
/// - SeededCryptoProvider for reproducible tests
pub trait CryptoProvider {
    /// Fill `dest` entirely with random bytes
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;

    /// Return `n` random bytes
    fn secure_random_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; n];
        self.fill_bytes(&mut bytes)?;
        Ok(bytes)
    }

    /// Uniform integer in `[0, range)` with no modulo bias.
    ///
    /// Samples the fewest whole bytes that cover `range - 1` and rejects any
    /// sample at or above the largest multiple of `range` in that space.
    fn secure_random_int(&mut self, range: u64) -> Result<u64> {
        if range == 0 {
            return Err(FairDiceError::InvalidRange(range));
        }
        if range == 1 {
            return Ok(0);
        }

        let width = sample_width(range);
        let space = 1u128 << (8 * width);
        let range_wide = u128::from(range);
        let limit = space - space % range_wide;

        let mut buf = [0u8; 8];
        loop {
            self.fill_bytes(&mut buf[8 - width..])?;
            let sample = u128::from(u64::from_be_bytes(buf));
            if sample < limit {
                return Ok((sample % range_wide) as u64);
            }
        }
    }
}

/// Number of bytes needed to represent every value in `[0, range)`
fn sample_width(range: u64) -> usize {
    let bits = (u64::BITS - (range - 1).leading_zeros()) as usize;
    bits.div_ceil(8).max(1)
}

/// Operating system CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct OsCryptoProvider;

impl OsCryptoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl CryptoProvider for OsCryptoProvider {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| FairDiceError::EntropyUnavailable(e.to_string()))
    }
}

/// Deterministic provider seeded from a `u64`.
///
/// Reproduces the same byte stream for the same seed. Only for tests and
/// replays, never for a live game.
#[derive(Clone, Debug)]
pub struct SeededCryptoProvider {
    rng: StdRng,
}

impl SeededCryptoProvider {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CryptoProvider for SeededCryptoProvider {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.rng
            .try_fill_bytes(dest)
            .map_err(|e| FairDiceError::EntropyUnavailable(e.to_string()))
    }
}
