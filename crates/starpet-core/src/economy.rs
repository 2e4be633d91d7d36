//! Star economy: balance, owned items and equipped items

use crate::{ItemId, ItemSlot, Rejection};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// What a toggle-equip did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipChange {
    Equipped,
    Unequipped,
}

/// Stars and cosmetics
///
/// Every equipped item is owned, and the balance never goes negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Economy {
    #[serde(default)]
    pub total_stars: u32,
    #[serde(default)]
    pub owned_items: BTreeSet<ItemId>,
    #[serde(default)]
    pub equipped_items: BTreeMap<ItemSlot, ItemId>,
}

impl Economy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add earned stars
    pub fn earn(&mut self, stars: u32) {
        self.total_stars = self.total_stars.saturating_add(stars);
    }

    pub fn owns(&self, item: &ItemId) -> bool {
        self.owned_items.contains(item)
    }

    /// Item equipped in a slot
    pub fn equipped(&self, slot: ItemSlot) -> Option<&ItemId> {
        self.equipped_items.get(&slot)
    }

    /// Buy an item, rejecting if it is unaffordable or already owned
    pub fn purchase(&mut self, item: ItemId, cost: u32) -> Result<(), Rejection> {
        if self.owns(&item) {
            return Err(Rejection::AlreadyOwned(item));
        }
        if self.total_stars < cost {
            return Err(Rejection::InsufficientStars {
                needed: cost,
                available: self.total_stars,
            });
        }
        self.total_stars -= cost;
        self.owned_items.insert(item);
        Ok(())
    }

    /// Equip an owned item, or unequip it if it is already in that slot
    pub fn toggle_equip(
        &mut self,
        item: ItemId,
        slot: ItemSlot,
    ) -> Result<EquipChange, Rejection> {
        if !self.owns(&item) {
            return Err(Rejection::NotOwned(item));
        }
        if self.equipped_items.get(&slot) == Some(&item) {
            self.equipped_items.remove(&slot);
            Ok(EquipChange::Unequipped)
        } else {
            self.equipped_items.insert(slot, item);
            Ok(EquipChange::Equipped)
        }
    }

    /// Drop equipped entries that point at items no longer owned
    ///
    /// Used when loading persisted data written by an older build.
    pub fn repaired(mut self) -> Self {
        let owned = &self.owned_items;
        self.equipped_items.retain(|_, item| owned.contains(item));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(s: &str) -> ItemId {
        ItemId::new(s)
    }

    #[test]
    fn test_purchase_requires_funds() {
        let mut economy = Economy::new();
        economy.earn(10);

        assert_eq!(
            economy.purchase(item("x"), 15),
            Err(Rejection::InsufficientStars {
                needed: 15,
                available: 10
            })
        );
        assert_eq!(economy.total_stars, 10);
        assert!(!economy.owns(&item("x")));

        assert_eq!(economy.purchase(item("x"), 10), Ok(()));
        assert_eq!(economy.total_stars, 0);
        assert!(economy.owns(&item("x")));
    }

    #[test]
    fn test_purchase_rejects_owned_item() {
        let mut economy = Economy::new();
        economy.earn(30);
        economy.purchase(item("crown"), 10).unwrap();
        assert_eq!(
            economy.purchase(item("crown"), 10),
            Err(Rejection::AlreadyOwned(item("crown")))
        );
        assert_eq!(economy.total_stars, 20);
    }

    #[test]
    fn test_toggle_equip() {
        let mut economy = Economy::new();
        economy.earn(100);
        economy.purchase(item("crown"), 40).unwrap();
        economy.purchase(item("party_hat"), 10).unwrap();

        assert_eq!(
            economy.toggle_equip(item("crown"), ItemSlot::Hat),
            Ok(EquipChange::Equipped)
        );
        assert_eq!(economy.equipped(ItemSlot::Hat), Some(&item("crown")));

        // Another item replaces the slot.
        economy.toggle_equip(item("party_hat"), ItemSlot::Hat).unwrap();
        assert_eq!(economy.equipped(ItemSlot::Hat), Some(&item("party_hat")));

        // Same item again unequips.
        assert_eq!(
            economy.toggle_equip(item("party_hat"), ItemSlot::Hat),
            Ok(EquipChange::Unequipped)
        );
        assert_eq!(economy.equipped(ItemSlot::Hat), None);
    }

    #[test]
    fn test_equip_requires_ownership() {
        let mut economy = Economy::new();
        assert_eq!(
            economy.toggle_equip(item("space"), ItemSlot::Background),
            Err(Rejection::NotOwned(item("space")))
        );
        assert!(economy.equipped_items.is_empty());
    }

    #[test]
    fn test_repaired_drops_unowned_equips() {
        let mut economy = Economy::new();
        economy.owned_items.insert(item("scarf"));
        economy.equipped_items.insert(ItemSlot::Accessory, item("scarf"));
        economy.equipped_items.insert(ItemSlot::Hat, item("ghost"));

        let economy = economy.repaired();
        assert_eq!(economy.equipped_items.len(), 1);
        assert_eq!(economy.equipped(ItemSlot::Accessory), Some(&item("scarf")));
    }

    #[test]
    fn test_missing_fields_default() {
        let economy: Economy = serde_json::from_str("{\"totalStars\": 7}").unwrap();
        assert_eq!(economy.total_stars, 7);
        assert!(economy.owned_items.is_empty());
    }
}
