//! Target Chest Layout
//!
//! The ground truth the search hunts for: the exact contents of all 27
//! chest slots. Per-item totals are computed once here so the roll
//! simulator can reject on counts long before any shuffling happens.

use serde::{Serialize, Deserialize};

use crate::core::hash::{Fingerprint, FingerprintHasher};
use super::inventory::CONTAINER_SIZE;
use super::item::{Item, ItemStack};

/// Total count per item kind, indexed by [`Item::index`].
pub type ItemCounts = [u16; Item::COUNT];

/// Errors from building a target layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Wrong number of slots.
    #[error("Layout must have {CONTAINER_SIZE} slots, got {0}")]
    SlotCount(usize),

    /// The `none` sentinel is not a valid slot value.
    #[error("Slot {0} holds the `none` sentinel; use `empty` for vacant slots")]
    Sentinel(usize),

    /// A vacant slot with a non-zero count, or an item with a zero count.
    #[error("Slot {slot} has inconsistent count {count} for {item:?}")]
    InconsistentCount {
        /// Slot index.
        slot: usize,
        /// Item in the slot.
        item: Item,
        /// Offending count.
        count: u8,
    },

    /// Buried treasure always holds exactly one heart of the sea.
    #[error("Layout must hold exactly one heart of the sea, found {0}")]
    HeartOfTheSea(u16),

    /// Only one bonus gear item is ever rolled.
    #[error("Layout holds both a leather chestplate and an iron sword")]
    BothBonusGear,

    /// JSON could not be parsed.
    #[error("Invalid layout JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A validated 27-slot target layout with precomputed item counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ItemStack>", into = "Vec<ItemStack>")]
pub struct TargetLayout {
    slots: [ItemStack; CONTAINER_SIZE],
    counts: ItemCounts,
    occupied: usize,
}

impl TargetLayout {
    /// Validate slots and precompute counts.
    pub fn new(slots: [ItemStack; CONTAINER_SIZE]) -> Result<Self, LayoutError> {
        let mut counts: ItemCounts = [0; Item::COUNT];
        let mut occupied = 0;

        for (slot, stack) in slots.iter().enumerate() {
            match stack.item {
                Item::None => return Err(LayoutError::Sentinel(slot)),
                Item::Empty if stack.count != 0 => {
                    return Err(LayoutError::InconsistentCount {
                        slot,
                        item: stack.item,
                        count: stack.count,
                    });
                }
                Item::Empty => {}
                item if stack.count == 0 => {
                    return Err(LayoutError::InconsistentCount {
                        slot,
                        item,
                        count: 0,
                    });
                }
                item => {
                    counts[item.index()] += stack.count as u16;
                    occupied += 1;
                }
            }
        }

        let hearts = counts[Item::HeartOfTheSea.index()];
        if hearts != 1 {
            return Err(LayoutError::HeartOfTheSea(hearts));
        }

        if counts[Item::LeatherChestplate.index()] > 0 && counts[Item::IronSword.index()] > 0 {
            return Err(LayoutError::BothBonusGear);
        }

        Ok(Self {
            slots,
            counts,
            occupied,
        })
    }

    /// Parse from a JSON array of 27 `{ "item": ..., "count": ... }` objects.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The chest found at chunk (-28, -73) for structure seed
    /// `-4872636734044769429`.
    pub fn known_treasure() -> Self {
        use Item::*;

        let s = ItemStack::new;
        let slots = [
            s(LeatherChestplate, 1),
            s(IronIngot, 2),
            s(IronIngot, 1),
            s(GoldIngot, 1),
            s(GoldIngot, 1),
            s(CookedCod, 1),
            ItemStack::EMPTY,
            s(IronIngot, 1),
            s(IronIngot, 1),
            s(Diamond, 1),
            s(GoldIngot, 1),
            s(CookedCod, 2),
            s(GoldIngot, 1),
            s(Diamond, 1),
            s(HeartOfTheSea, 1),
            s(CookedSalmon, 1),
            s(IronIngot, 1),
            s(Emerald, 6),
            s(IronIngot, 1),
            s(GoldIngot, 1),
            s(CookedSalmon, 2),
            s(Tnt, 1),
            s(CookedSalmon, 1),
            s(GoldIngot, 1),
            s(IronIngot, 1),
            s(GoldIngot, 1),
            s(Emerald, 1),
        ];

        match Self::new(slots) {
            Ok(layout) => layout,
            Err(e) => unreachable!("built-in layout is valid: {e}"),
        }
    }

    /// All slots in chest order.
    #[inline]
    pub fn slots(&self) -> &[ItemStack; CONTAINER_SIZE] {
        &self.slots
    }

    /// Target stack at a slot.
    #[inline]
    pub fn slot(&self, index: usize) -> ItemStack {
        self.slots[index]
    }

    /// Total count of an item across all slots.
    #[inline]
    pub fn count(&self, item: Item) -> u16 {
        self.counts[item.index()]
    }

    /// All per-item totals.
    #[inline]
    pub fn counts(&self) -> &ItemCounts {
        &self.counts
    }

    /// Number of non-empty slots.
    #[inline]
    pub fn occupied_slots(&self) -> usize {
        self.occupied
    }

    /// Whether the chest contains the bonus gear roll (chestplate or sword).
    #[inline]
    pub fn has_bonus_gear(&self) -> bool {
        self.count(Item::LeatherChestplate) > 0 || self.count(Item::IronSword) > 0
    }

    /// Deterministic fingerprint of the slot contents.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = FingerprintHasher::for_layout();
        for stack in &self.slots {
            hasher.update_u8(stack.item as u8);
            hasher.update_u8(stack.count);
        }
        hasher.finalize()
    }
}

impl Default for TargetLayout {
    fn default() -> Self {
        Self::known_treasure()
    }
}

impl TryFrom<Vec<ItemStack>> for TargetLayout {
    type Error = LayoutError;

    fn try_from(slots: Vec<ItemStack>) -> Result<Self, Self::Error> {
        let len = slots.len();
        let slots: [ItemStack; CONTAINER_SIZE] = slots
            .try_into()
            .map_err(|_| LayoutError::SlotCount(len))?;
        Self::new(slots)
    }
}

impl From<TargetLayout> for Vec<ItemStack> {
    fn from(layout: TargetLayout) -> Self {
        layout.slots.to_vec()
    }
}
