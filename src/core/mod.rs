//! Core deterministic primitives.
//!
//! Bit-exact emulation of the game's random number generator and the seed
//! derivations built on it. Everything above depends on these matching the
//! game to the last bit.

pub mod lcg;
pub mod seeds;
pub mod hash;

// Re-export core types
pub use lcg::{JavaRng, LcgStep, MASK_48};
pub use seeds::{decorator_seed, population_seed, region_seed};
pub use hash::{Fingerprint, FingerprintHasher};
