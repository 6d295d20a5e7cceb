//! Structure Viability Oracle
//!
//! Loot and layout only depend on the lower 48 bits of the seed. Whether the
//! treasure actually generates there (biome, terrain) is a separate question
//! answered by an external oracle, checked last because it is by far the
//! most expensive test.

use tracing::debug;

use crate::core::lcg::MASK_48;

/// Offset of the treasure block inside its chunk, on both axes.
pub const STRUCTURE_OFFSET: i32 = 9;

/// Number of 64-bit world seeds sharing one 48-bit structure seed.
pub const UPPER_SEEDS: u64 = 1 << 16;

/// Deterministic "can the structure generate here" predicate.
pub trait StructureOracle: Sync {
    /// Is the structure viable for `world_seed` at block `(block_x, block_z)`?
    fn is_viable(&self, world_seed: i64, block_x: i32, block_z: i32) -> bool;
}

impl<F> StructureOracle for F
where
    F: Fn(i64, i32, i32) -> bool + Sync,
{
    #[inline]
    fn is_viable(&self, world_seed: i64, block_x: i32, block_z: i32) -> bool {
        self(world_seed, block_x, block_z)
    }
}

/// Accepts every position.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyTerrain;

impl StructureOracle for AnyTerrain {
    #[inline]
    fn is_viable(&self, _world_seed: i64, _block_x: i32, _block_z: i32) -> bool {
        true
    }
}

/// Block coordinate of the treasure in chunk `chunk`.
#[inline]
pub const fn structure_block(chunk: i32) -> i32 {
    chunk.wrapping_mul(16).wrapping_add(STRUCTURE_OFFSET)
}

/// Every world seed whose lower 48 bits are `structure_seed` and that the
/// oracle accepts for the treasure in `(chunk_x, chunk_z)`.
pub fn expand_world_seeds<O: StructureOracle + ?Sized>(
    structure_seed: i64,
    chunk_x: i32,
    chunk_z: i32,
    oracle: &O,
) -> Vec<i64> {
    let lower = structure_seed as u64 & MASK_48;
    let (block_x, block_z) = (structure_block(chunk_x), structure_block(chunk_z));

    let seeds: Vec<i64> = (0..UPPER_SEEDS)
        .map(|upper| ((upper << 48) | lower) as i64)
        .filter(|world| oracle.is_viable(*world, block_x, block_z))
        .collect();

    debug!(structure_seed, viable = seeds.len(), "expanded world seeds");
    seeds
}
