//! Buried Treasure Simulation
//!
//! Bit-exact replay of how a buried-treasure chest comes to be, from the
//! placement roll to the final slot layout. Every function here is pure and
//! deterministic in the seed it is given.
//!
//! ## Module Structure
//!
//! - `item`: Item kinds and stacks
//! - `inventory`: Fixed-capacity 27-slot sequences
//! - `layout`: Validated target layout with precomputed counts
//! - `placement`: Cheap "does a treasure spawn here" gate
//! - `roll`: Loot table replay with per-phase early exit
//! - `chest`: Slot shuffle, stack splitting and placement check

pub mod item;
pub mod inventory;
pub mod layout;
pub mod placement;
pub mod roll;
pub mod chest;

use std::fmt;

use serde::{Serialize, Deserialize};

// Re-export key types
pub use item::{Item, ItemStack};
pub use inventory::{identity_slots, InventoryVec, LootBag, SlotPermutation, CapacityError, CONTAINER_SIZE};
pub use layout::{TargetLayout, LayoutError, ItemCounts};
pub use placement::can_generate_treasure;
pub use roll::{loot_rng, roll_loot, roll_loot_unfiltered};
pub use chest::{LayoutCheck, generate_chest, verify_layout};

/// Where in the pipeline a candidate was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Treasure placement roll failed.
    Placement,
    /// Iron/gold/TNT tallies did not match.
    CommonMetals,
    /// Emerald/diamond/prismarine tallies did not match.
    Valuables,
    /// Chestplate/sword gate or roll did not match.
    BonusGear,
    /// Cod/salmon tallies did not match.
    Food,
    /// Slot layout did not match.
    Layout,
    /// Structure oracle rejected the position.
    Structure,
}

impl Stage {
    /// Every stage in pipeline order.
    pub const ALL: [Stage; 7] = [
        Stage::Placement,
        Stage::CommonMetals,
        Stage::Valuables,
        Stage::BonusGear,
        Stage::Food,
        Stage::Layout,
        Stage::Structure,
    ];

    /// Short name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Placement => "placement",
            Stage::CommonMetals => "common_metals",
            Stage::Valuables => "valuables",
            Stage::BonusGear => "bonus_gear",
            Stage::Food => "food",
            Stage::Layout => "layout",
            Stage::Structure => "structure",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate failed at `Stage`.
///
/// Rejection is the common case, so it is a plain value and not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rejected(pub Stage);
