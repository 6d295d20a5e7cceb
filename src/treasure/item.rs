//! Items and Item Stacks
//!
//! The closed set of items the buried-treasure loot table can produce,
//! plus the two sentinels used by inventories and layouts.

use serde::{Serialize, Deserialize};

/// Item kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
#[derive(Default)]
pub enum Item {
    /// No item at all. Fills unused inventory capacity.
    #[default]
    None = 0,
    /// An empty stack. Marks vacant slots in a layout.
    Empty = 1,
    /// Heart of the sea (always exactly one)
    HeartOfTheSea = 2,
    /// Iron ingot
    IronIngot = 3,
    /// Gold ingot
    GoldIngot = 4,
    /// TNT
    Tnt = 5,
    /// Emerald
    Emerald = 6,
    /// Diamond
    Diamond = 7,
    /// Prismarine crystals
    PrismarineCrystals = 8,
    /// Leather chestplate
    LeatherChestplate = 9,
    /// Iron sword
    IronSword = 10,
    /// Cooked cod
    CookedCod = 11,
    /// Cooked salmon
    CookedSalmon = 12,
}

impl Item {
    /// Number of item kinds, sentinels included.
    pub const COUNT: usize = 13;

    /// Every real (non-sentinel) item.
    pub const LOOT: [Item; 11] = [
        Item::HeartOfTheSea,
        Item::IronIngot,
        Item::GoldIngot,
        Item::Tnt,
        Item::Emerald,
        Item::Diamond,
        Item::PrismarineCrystals,
        Item::LeatherChestplate,
        Item::IronSword,
        Item::CookedCod,
        Item::CookedSalmon,
    ];

    /// Index into per-item tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Is this one of the two sentinels?
    #[inline]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Item::None | Item::Empty)
    }
}

/// An item with a count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub struct ItemStack {
    /// Item kind
    pub item: Item,
    /// Number of items in the stack
    pub count: u8,
}

impl ItemStack {
    /// The stack a vacant container slot holds.
    pub const EMPTY: ItemStack = ItemStack::new(Item::Empty, 0);

    /// Create a stack.
    #[inline]
    pub const fn new(item: Item, count: u8) -> Self {
        Self { item, count }
    }

    /// Is this stack logically empty?
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.item.is_sentinel() || self.count == 0
    }

    /// Take up to `count` items off this stack into a new stack.
    #[inline]
    pub fn split(&mut self, count: u8) -> ItemStack {
        let taken = count.min(self.count);
        self.count -= taken;
        ItemStack::new(self.item, taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let mut stack = ItemStack::new(Item::Emerald, 7);
        let taken = stack.split(3);
        assert_eq!(taken, ItemStack::new(Item::Emerald, 3));
        assert_eq!(stack, ItemStack::new(Item::Emerald, 4));

        // Never takes more than is there
        let rest = stack.split(10);
        assert_eq!(rest.count, 4);
        assert_eq!(stack.count, 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_empty_sentinels() {
        assert!(ItemStack::EMPTY.is_empty());
        assert!(ItemStack::default().is_empty());
        assert!(ItemStack::new(Item::None, 3).is_empty());
        assert!(!ItemStack::new(Item::Diamond, 1).is_empty());
        assert_ne!(ItemStack::EMPTY, ItemStack::default());
    }

    #[test]
    fn test_indices_fit_tables() {
        for item in Item::LOOT {
            assert!(item.index() < Item::COUNT);
            assert!(!item.is_sentinel());
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ItemStack::new(Item::HeartOfTheSea, 1)).unwrap();
        assert_eq!(json, r#"{"item":"heart_of_the_sea","count":1}"#);

        let stack: ItemStack = serde_json::from_str(r#"{"item":"tnt","count":2}"#).unwrap();
        assert_eq!(stack, ItemStack::new(Item::Tnt, 2));
    }
}
