//! Treasure Placement Gate
//!
//! Buried treasure tries to spawn in every chunk but succeeds only 1% of the
//! time. One float draw decides it, which makes this the cheapest possible
//! first filter: roughly 99 of every 100 candidates stop here.

use crate::core::lcg::JavaRng;
use crate::core::seeds::region_seed;

/// Structure salt for buried treasure.
pub const TREASURE_SALT: i64 = 10_387_320;

/// Spawn probability per chunk.
pub const TREASURE_CHANCE: f32 = 0.01;

/// Would a buried treasure spawn in this chunk for `seed`?
///
/// Only the lower 48 bits of `seed` matter.
#[inline]
pub fn can_generate_treasure(seed: i64, chunk_x: i32, chunk_z: i32) -> bool {
    let mut rng = JavaRng::new(region_seed(seed, chunk_x, chunk_z, TREASURE_SALT));
    rng.next_float() < TREASURE_CHANCE
}
