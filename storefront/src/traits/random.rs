//! Entropy seam for mock transaction hashes.

use rand::RngCore;

/// Source of random bytes.
///
/// Production wallets draw from the thread RNG; tests inject a seeded
/// stream so hashes are reproducible.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);

    /// 32 bytes, the width of a transaction hash.
    fn random_bytes_32(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.fill_bytes(&mut bytes);
        bytes
    }
}

/// Thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRng;

impl ThreadRng {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRng {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rand::thread_rng().fill_bytes(dest);
    }
}
