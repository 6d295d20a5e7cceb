//! Fixed-Capacity Inventory Sequences
//!
//! A chest has 27 slots and nothing in the simulation ever holds more, so
//! loot bags, split lists and slot permutations are inline `ArrayVec`s.
//! No allocation per candidate.

use arrayvec::ArrayVec;

use super::item::ItemStack;

pub use arrayvec::CapacityError;

/// Slots in a single chest.
pub const CONTAINER_SIZE: usize = 27;

/// Ordered sequence of at most [`CONTAINER_SIZE`] elements.
pub type InventoryVec<T> = ArrayVec<T, CONTAINER_SIZE>;

/// Loot produced by the roll simulator.
pub type LootBag = InventoryVec<ItemStack>;

/// Order in which container slots are filled.
pub type SlotPermutation = InventoryVec<u8>;

/// The identity permutation `0, 1, ..., 26`.
pub fn identity_slots() -> SlotPermutation {
    (0..CONTAINER_SIZE as u8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treasure::item::Item;

    #[test]
    fn test_remove_shifts_left() {
        let mut bag = LootBag::new();
        bag.push(ItemStack::new(Item::IronIngot, 1));
        bag.push(ItemStack::new(Item::GoldIngot, 2));
        bag.push(ItemStack::new(Item::Tnt, 3));

        assert_eq!(bag.remove(1), ItemStack::new(Item::GoldIngot, 2));
        assert_eq!(&bag[..], &[ItemStack::new(Item::IronIngot, 1), ItemStack::new(Item::Tnt, 3)]);
    }

    #[test]
    fn test_capacity_is_chest_size() {
        let mut slots = identity_slots();
        assert!(slots.is_full());
        assert!(slots.try_push(0).is_err());

        // A failed extend leaves the sequence untouched
        let mut partial = SlotPermutation::new();
        partial.push(1);
        assert!(partial.try_extend_from_slice(&[0; CONTAINER_SIZE]).is_err());
        assert_eq!(&partial[..], &[1]);
    }

    #[test]
    fn test_identity_slots() {
        let slots = identity_slots();
        assert_eq!(slots.len(), CONTAINER_SIZE);
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(*slot as usize, i);
        }
    }
}
