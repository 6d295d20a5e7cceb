//! Seed Derivations
//!
//! The world generator never feeds the world seed straight into a structure.
//! It first derives a per-location seed: a region seed for placement rolls,
//! and a population/decorator seed pair for chest contents.

use super::lcg::{JavaRng, MASK_48};

/// Region X coefficient.
pub const REGION_A: i64 = 341_873_128_712;

/// Region Z coefficient.
pub const REGION_B: i64 = 132_897_987_541;

/// Region seed for a structure salt at region coordinates.
///
/// Buried treasure uses a region size of one chunk, so chunk coordinates are
/// region coordinates.
#[inline]
pub const fn region_seed(world_seed: i64, region_x: i32, region_z: i32, salt: i64) -> i64 {
    (region_x as i64)
        .wrapping_mul(REGION_A)
        .wrapping_add((region_z as i64).wrapping_mul(REGION_B))
        .wrapping_add(world_seed)
        .wrapping_add(salt)
}

/// Population seed for the chunk whose corner is at block `(block_x, block_z)`.
///
/// Returned unscrambled and masked to 48 bits.
#[inline]
pub fn population_seed(world_seed: i64, block_x: i32, block_z: i32) -> i64 {
    let mut rng = JavaRng::new(world_seed);
    let a = rng.next_long() | 1;
    let b = rng.next_long() | 1;

    let seed = (block_x as i64)
        .wrapping_mul(a)
        .wrapping_add((block_z as i64).wrapping_mul(b))
        ^ world_seed;
    (seed as u64 & MASK_48) as i64
}

/// Decorator seed: the population seed offset by a feature salt.
///
/// Returned unscrambled and masked to 48 bits; pass it to [`JavaRng::new`].
#[inline]
pub fn decorator_seed(world_seed: i64, block_x: i32, block_z: i32, salt: i32) -> i64 {
    let seed = population_seed(world_seed, block_x, block_z).wrapping_add(salt as i64);
    (seed as u64 & MASK_48) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_seed() {
        let seed = region_seed(5714378552345, 55, 6, 53415);
        assert_eq!(seed as u64 & MASK_48, 25314788610166);
    }

    #[test]
    fn test_population_seed() {
        assert_eq!(population_seed(5235023985902385, 234, 256), 72830530974919);

        let world = 1623024503030186110;
        assert_eq!(population_seed(world, 8813070, 19620696), 276708866249204);
        assert_eq!(population_seed(world, 10631644, 17944910), 82207099186384);
        assert_eq!(population_seed(world, 8680417, -2211947), 52052742490216);
        assert_eq!(population_seed(world, -7948852, -21332830), 163831676759108);
        assert_eq!(population_seed(world, 12335895, -11909847), 151511376819346);

        let world = -64717746766552495;
        assert_eq!(population_seed(world, 2740243, 1899490), 130413670911044);
        assert_eq!(population_seed(world, -8214147, -12478584), 69615404979304);
        assert_eq!(population_seed(world, -1286895, -4889865), 265740562613851);
        assert_eq!(population_seed(world, 4519653, -5541236), 270226422630940);
        assert_eq!(population_seed(world, 12780884, 10681218), 222319640432763);

        let world = 7662337536138481453;
        assert_eq!(population_seed(world, -10544675, -1740511), 230880289381329);
        assert_eq!(population_seed(world, -19152966, 11187829), 274098607373610);
        assert_eq!(population_seed(world, -20502464, 16797556), 212766799447785);
    }

    #[test]
    fn test_decorator_seed() {
        assert_eq!(decorator_seed(571437852345, 10, 25, 5), 234602471937219);
    }

    #[test]
    fn test_decorator_seed_scrambled_state() {
        // Reference vectors are the generator state right after seeding.
        let state = |world, x, z| JavaRng::new(decorator_seed(world, x, z, 30001)).state();

        let world = -5722685173690564176;
        assert_eq!(state(world, -11802949, -20424998), 57497380696337);
        assert_eq!(state(world, 14315429, 12010478), 185917727096387);
        assert_eq!(state(world, 7992747, -8213193), 8710054481704);
        assert_eq!(state(world, 2824118, -7744489), 238047743234483);
        assert_eq!(state(world, 15651473, 8160347), 198544346382006);

        let world = 8525635622147715264;
        assert_eq!(state(world, 3081075, 3845640), 43123668257949);
        assert_eq!(state(world, 16389156, 4623318), 107431622875698);
        assert_eq!(state(world, -17997345, 189507), 209839608913572);

        let world = 4917349648921975370;
        assert_eq!(state(world, -11362826, 11542523), 121265705332649);
        assert_eq!(state(world, 3363792, 1936537), 178611928168781);
        assert_eq!(state(world, -703110, 10173674), 71988513566814);
    }

    #[test]
    fn test_only_low_bits_matter() {
        let world: i64 = -4872636734044769429;
        let low = (world as u64 & MASK_48) as i64;
        assert_eq!(population_seed(world, -448, -1168), population_seed(low, -448, -1168));
    }
}
