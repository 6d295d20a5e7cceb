//! Fingerprint Hashing
//!
//! Deterministic SHA-256 fingerprints used to tag search runs:
//! - Which target layout a report was produced for
//! - Which search parameters were in effect
//!
//! Order of updates is part of the fingerprint.

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type Fingerprint = [u8; 32];

/// SHA-256 over a domain tag followed by fixed-width fields.
pub struct FingerprintHasher {
    hasher: Sha256,
}

impl FingerprintHasher {
    fn with_domain(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Start a target layout fingerprint.
    pub fn for_layout() -> Self {
        Self::with_domain(b"SEEDCRACKER_LAYOUT_V1")
    }

    /// Start a search parameter fingerprint.
    pub fn for_search() -> Self {
        Self::with_domain(b"SEEDCRACKER_SEARCH_V1")
    }

    /// Item ids, stack counts and enum tags.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Chunk coordinates, little-endian.
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Seeds and ranges, little-endian. Signed seeds go in by bit pattern.
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Consume the hasher.
    pub fn finalize(self) -> Fingerprint {
        self.hasher.finalize().into()
    }
}

/// Short hex form (first 8 bytes) for log lines.
pub fn short_hex(fingerprint: &Fingerprint) -> String {
    hex::encode(&fingerprint[..8])
}
