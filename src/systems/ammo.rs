//! Ammo resolver - locating and consuming cartridges in an inventory.

use crate::components::Inventory;
use crate::types::{Hand, ItemKind, ItemStack};

/// Handle to a resolvable ammo stack.
///
/// Returned by [`find_ammo`] and consumed by [`consume_ammo`]; valid only as
/// long as the inventory is not rearranged in between. The per-tick driver
/// resolves and consumes within the same tick, so this holds by construction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AmmoSlot {
    /// Cartridges held in the off hand
    OffHand,
    /// Cartridges held in the main hand
    MainHand,
    /// Cartridges in a general inventory slot
    Slot(usize),
}

fn is_ammo(stack: &ItemStack) -> bool {
    stack.kind == ItemKind::Cartridge && stack.count > 0
}

/// Finds the first compatible ammo stack.
///
/// Search order is strictly: off-hand, main-hand, then general inventory
/// slots in index order. Returns `None` when the actor has no cartridges;
/// exemption from ammo cost is the caller's concern.
pub fn find_ammo(inventory: &Inventory) -> Option<AmmoSlot> {
    if inventory.held(Hand::Off).is_some_and(is_ammo) {
        return Some(AmmoSlot::OffHand);
    }
    if inventory.held(Hand::Main).is_some_and(is_ammo) {
        return Some(AmmoSlot::MainHand);
    }
    inventory
        .slots
        .iter()
        .position(is_ammo)
        .map(AmmoSlot::Slot)
}

/// Consumes one cartridge from the resolved stack.
///
/// Decrements the stack by one and removes it entirely when it reaches zero.
pub fn consume_ammo(inventory: &mut Inventory, slot: AmmoSlot) {
    let stack = match slot {
        AmmoSlot::OffHand => &mut inventory.off_hand,
        AmmoSlot::MainHand => &mut inventory.main_hand,
        AmmoSlot::Slot(index) => {
            if let Some(stack) = inventory.slots.get_mut(index) {
                stack.count = stack.count.saturating_sub(1);
                if stack.count == 0 {
                    inventory.slots.remove(index);
                }
            }
            return;
        }
    };

    if let Some(held) = stack {
        held.count = held.count.saturating_sub(1);
        if held.count == 0 {
            *stack = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cartridges(count: u32) -> ItemStack {
        ItemStack::new(ItemKind::Cartridge, count)
    }

    #[test]
    fn test_search_order_prefers_off_hand() {
        let inventory = Inventory {
            main_hand: Some(cartridges(4)),
            off_hand: Some(cartridges(4)),
            slots: vec![cartridges(4)],
        };
        assert_eq!(find_ammo(&inventory), Some(AmmoSlot::OffHand));
    }

    #[test]
    fn test_search_order_main_hand_before_slots() {
        let inventory = Inventory {
            main_hand: Some(cartridges(1)),
            off_hand: Some(ItemStack::new(ItemKind::Musket, 1)),
            slots: vec![cartridges(8)],
        };
        assert_eq!(find_ammo(&inventory), Some(AmmoSlot::MainHand));
    }

    #[test]
    fn test_slots_searched_in_index_order() {
        let inventory = Inventory {
            main_hand: None,
            off_hand: None,
            slots: vec![
                ItemStack::new(ItemKind::Other, 1),
                cartridges(2),
                cartridges(9),
            ],
        };
        assert_eq!(find_ammo(&inventory), Some(AmmoSlot::Slot(1)));
    }

    #[test]
    fn test_no_ammo_resolves_none() {
        let inventory = Inventory {
            main_hand: Some(ItemStack::new(ItemKind::Musket, 1)),
            off_hand: None,
            slots: vec![ItemStack::new(ItemKind::Other, 12)],
        };
        assert_eq!(find_ammo(&inventory), None);
    }

    #[test]
    fn test_consume_decrements_stack() {
        let mut inventory = Inventory {
            main_hand: None,
            off_hand: None,
            slots: vec![cartridges(3)],
        };
        consume_ammo(&mut inventory, AmmoSlot::Slot(0));
        assert_eq!(inventory.slots[0].count, 2);
    }

    #[test]
    fn test_consume_removes_empty_stack() {
        let mut inventory = Inventory {
            main_hand: None,
            off_hand: Some(cartridges(1)),
            slots: vec![cartridges(1)],
        };
        consume_ammo(&mut inventory, AmmoSlot::OffHand);
        assert!(inventory.off_hand.is_none());

        consume_ammo(&mut inventory, AmmoSlot::Slot(0));
        assert!(inventory.slots.is_empty());
    }
}
