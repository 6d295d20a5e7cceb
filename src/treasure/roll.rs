//! Loot Roll Simulator
//!
//! Replays the buried-treasure loot table draw for draw. The filtered
//! variant checks every phase against the target's item counts and bails
//! out at the first mismatch, so most candidates that survive placement die
//! within a handful of draws.
//!
//! ## Loot Table
//!
//! ```text
//! heart of the sea          always, x1
//! common metals   5-8 rolls iron 20 (1-4) | gold 10 (1-4) | tnt 5 (1-2)
//! valuables       1-3 rolls emerald 5 (4-8) | diamond 5 (1-2) | prismarine 5 (1-5)
//! bonus gear      0-1 roll  leather chestplate 1 | iron sword 1
//! food            2 rolls   cooked cod 1 (2-4) | cooked salmon 1 (2-4)
//! ```

use crate::core::lcg::JavaRng;
use crate::core::seeds::decorator_seed;
use super::inventory::LootBag;
use super::item::{Item, ItemStack};
use super::layout::{ItemCounts, TargetLayout};
use super::{Rejected, Stage};

/// Feature salt of the buried-treasure decorator.
pub const DECORATOR_SALT: i32 = 30_001;

// =============================================================================
// TABLE
// =============================================================================

struct LootEntry {
    item: Item,
    weight: i32,
    min: i32,
    max: i32,
}

struct LootPool {
    stage: Stage,
    min_rolls: i32,
    max_rolls: i32,
    total_weight: i32,
    entries: &'static [LootEntry],
}

impl LootPool {
    /// Select an entry from a weight draw in `[0, total_weight)`.
    #[inline]
    fn pick(&self, mut weight: i32) -> &LootEntry {
        let last = self.entries.len() - 1;
        for entry in &self.entries[..last] {
            if weight < entry.weight {
                return entry;
            }
            weight -= entry.weight;
        }
        &self.entries[last]
    }
}

const fn entry(item: Item, weight: i32, min: i32, max: i32) -> LootEntry {
    LootEntry { item, weight, min, max }
}

const COMMON_METALS: LootPool = LootPool {
    stage: Stage::CommonMetals,
    min_rolls: 5,
    max_rolls: 8,
    total_weight: 35,
    entries: &[
        entry(Item::IronIngot, 20, 1, 4),
        entry(Item::GoldIngot, 10, 1, 4),
        entry(Item::Tnt, 5, 1, 2),
    ],
};

const VALUABLES: LootPool = LootPool {
    stage: Stage::Valuables,
    min_rolls: 1,
    max_rolls: 3,
    total_weight: 15,
    entries: &[
        entry(Item::Emerald, 5, 4, 8),
        entry(Item::Diamond, 5, 1, 2),
        entry(Item::PrismarineCrystals, 5, 1, 5),
    ],
};

const BONUS_GEAR: LootPool = LootPool {
    stage: Stage::BonusGear,
    min_rolls: 1,
    max_rolls: 1,
    total_weight: 2,
    entries: &[
        entry(Item::LeatherChestplate, 1, 1, 1),
        entry(Item::IronSword, 1, 1, 1),
    ],
};

const FOOD: LootPool = LootPool {
    stage: Stage::Food,
    min_rolls: 2,
    max_rolls: 2,
    total_weight: 2,
    entries: &[
        entry(Item::CookedCod, 1, 2, 4),
        entry(Item::CookedSalmon, 1, 2, 4),
    ],
};

// =============================================================================
// ROLLING
// =============================================================================

/// The generator that rolls loot for the treasure in chunk `(chunk_x, chunk_z)`.
///
/// The chest simulation continues on the same generator afterwards.
pub fn loot_rng(seed: i64, chunk_x: i32, chunk_z: i32) -> JavaRng {
    let decorator = decorator_seed(
        seed,
        chunk_x.wrapping_mul(16),
        chunk_z.wrapping_mul(16),
        DECORATOR_SALT,
    );
    let mut rng = JavaRng::new(decorator);
    JavaRng::new(rng.next_long())
}

/// Roll one pool into `bag`.
///
/// With a target, an item the target never holds rejects before its count
/// is drawn, and the pool's tallies must match the target afterwards.
fn roll_pool(
    rng: &mut JavaRng,
    pool: &LootPool,
    target: Option<&TargetLayout>,
    bag: &mut LootBag,
) -> Result<(), Rejected> {
    let mut tally: ItemCounts = [0; Item::COUNT];

    let rolls = rng.next_int_between(pool.min_rolls, pool.max_rolls);
    for _ in 0..rolls {
        let entry = pool.pick(rng.next_int(pool.total_weight));

        if let Some(target) = target {
            if target.count(entry.item) == 0 {
                return Err(Rejected(pool.stage));
            }
        }

        let count = rng.next_int_between(entry.min, entry.max);
        tally[entry.item.index()] += count as u16;
        bag.push(ItemStack::new(entry.item, count as u8));
    }

    if let Some(target) = target {
        let mismatch = pool
            .entries
            .iter()
            .any(|e| tally[e.item.index()] != target.count(e.item));
        if mismatch {
            return Err(Rejected(pool.stage));
        }
    }

    Ok(())
}

fn roll(rng: &mut JavaRng, target: Option<&TargetLayout>) -> Result<LootBag, Rejected> {
    let mut bag = LootBag::new();
    bag.push(ItemStack::new(Item::HeartOfTheSea, 1));

    roll_pool(rng, &COMMON_METALS, target, &mut bag)?;
    roll_pool(rng, &VALUABLES, target, &mut bag)?;

    let has_gear = rng.next_bool();
    if let Some(target) = target {
        if has_gear != target.has_bonus_gear() {
            return Err(Rejected(Stage::BonusGear));
        }
    }
    if has_gear {
        roll_pool(rng, &BONUS_GEAR, target, &mut bag)?;
    }

    roll_pool(rng, &FOOD, target, &mut bag)?;

    Ok(bag)
}

/// Roll loot and check it against `target` phase by phase.
///
/// On success the bag holds exactly the target's item totals and `rng` is
/// positioned for the chest simulation.
#[inline]
pub fn roll_loot(rng: &mut JavaRng, target: &TargetLayout) -> Result<LootBag, Rejected> {
    roll(rng, Some(target))
}

/// Roll loot with no target, producing the full bag.
pub fn roll_loot_unfiltered(rng: &mut JavaRng) -> LootBag {
    match roll(rng, None) {
        Ok(bag) => bag,
        Err(Rejected(stage)) => unreachable!("unfiltered roll rejected at {stage}"),
    }
}
