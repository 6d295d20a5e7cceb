//! Chest Layout Simulator
//!
//! Rolled loot does not land in the chest as-is. The game shuffles the slot
//! order, splits random stacks into smaller ones until the chest would be
//! full, shuffles the resulting stacks and then fills slots from the back of
//! the shuffled order. This module replays that on the loot generator right
//! where the roll left it.

use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::core::lcg::JavaRng;
use super::inventory::{identity_slots, LootBag, SlotPermutation, CONTAINER_SIZE};
use super::item::ItemStack;
use super::layout::TargetLayout;
use super::roll::{loot_rng, roll_loot_unfiltered};
use super::{Rejected, Stage};

/// How a simulated chest is compared with the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCheck {
    /// Every slot must equal the target, placed or not.
    #[default]
    Exact,
    /// Only reject when a stack lands in a slot the target has empty.
    ///
    /// Reproduces an older, weaker check. Accepts any arrangement that puts
    /// stacks in the target's occupied slots, whatever the stacks are.
    SlotProbe,
}

impl FromStr for LayoutCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(LayoutCheck::Exact),
            "slot_probe" => Ok(LayoutCheck::SlotProbe),
            other => Err(format!("unknown layout check `{other}`")),
        }
    }
}

/// Slot order and stacks ready for placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrangement {
    /// Shuffled container slot indices.
    pub slots: SlotPermutation,
    /// Shuffled stacks, placed front to back.
    pub items: LootBag,
}

impl Arrangement {
    /// `(slot, stack)` pairs in placement order.
    ///
    /// The n-th stack goes to the n-th slot counted from the end of the
    /// permutation.
    pub fn placements(&self) -> impl Iterator<Item = (usize, ItemStack)> + '_ {
        self.items
            .iter()
            .zip(self.slots.iter().rev())
            .map(|(stack, slot)| (*slot as usize, *stack))
    }

    /// Materialize the chest contents.
    pub fn to_slots(&self) -> [ItemStack; CONTAINER_SIZE] {
        let mut chest = [ItemStack::EMPTY; CONTAINER_SIZE];
        for (slot, stack) in self.placements() {
            chest[slot] = if stack.is_empty() { ItemStack::EMPTY } else { stack };
        }
        chest
    }
}

/// Split stacks until the chest would be full or nothing is splittable.
fn split_stacks(rng: &mut JavaRng, bag: &LootBag) -> LootBag {
    let mut splittable = LootBag::new();
    let mut settled = LootBag::new();

    for stack in bag {
        if stack.count > 1 {
            splittable.push(*stack);
        } else {
            settled.push(*stack);
        }
    }

    while settled.len() + splittable.len() < CONTAINER_SIZE && !splittable.is_empty() {
        let index = rng.next_int_between(0, splittable.len() as i32 - 1) as usize;
        let mut rest = splittable.remove(index);
        let taken = rng.next_int_between(1, (rest.count / 2) as i32) as u8;
        let part = rest.split(taken);

        // The bool is only drawn for stacks that could split again.
        for piece in [rest, part] {
            if piece.count > 1 && rng.next_bool() {
                splittable.push(piece);
            } else {
                settled.push(piece);
            }
        }
    }

    // Each pass removes one stack and adds two, so this never exceeds capacity.
    if settled.try_extend_from_slice(&splittable).is_err() {
        unreachable!("split produced more than {CONTAINER_SIZE} stacks");
    }
    settled
}

/// Shuffle slots, split stacks and shuffle the stacks.
pub fn arrange(rng: &mut JavaRng, bag: &LootBag) -> Arrangement {
    let mut slots = identity_slots();
    rng.shuffle(&mut slots);

    let mut items = split_stacks(rng, bag);
    rng.shuffle(&mut items);

    Arrangement { slots, items }
}

/// Simulate the chest for `bag` and compare it with `target`.
pub fn verify_layout(
    rng: &mut JavaRng,
    bag: &LootBag,
    target: &TargetLayout,
    check: LayoutCheck,
) -> Result<(), Rejected> {
    let arrangement = arrange(rng, bag);

    match check {
        LayoutCheck::Exact => {
            let mut placed = 0;
            for (slot, stack) in arrangement.placements() {
                let expected = target.slot(slot);
                let matches = if stack.is_empty() {
                    expected.is_empty()
                } else {
                    placed += 1;
                    stack == expected
                };
                if !matches {
                    return Err(Rejected(Stage::Layout));
                }
            }
            // Slots that received nothing must be empty in the target too.
            if placed != target.occupied_slots() {
                return Err(Rejected(Stage::Layout));
            }
        }
        LayoutCheck::SlotProbe => {
            for (slot, stack) in arrangement.placements() {
                if !stack.is_empty() && target.slot(slot).is_empty() {
                    return Err(Rejected(Stage::Layout));
                }
            }
        }
    }

    Ok(())
}

/// Full chest contents for the treasure in chunk `(chunk_x, chunk_z)`.
pub fn generate_chest(seed: i64, chunk_x: i32, chunk_z: i32) -> [ItemStack; CONTAINER_SIZE] {
    let mut rng = loot_rng(seed, chunk_x, chunk_z);
    let bag = roll_loot_unfiltered(&mut rng);
    arrange(&mut rng, &bag).to_slots()
}
