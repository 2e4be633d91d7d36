//! Shop catalog of cosmetic items for the pet

use crate::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Where an item is worn; at most one item is equipped per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSlot {
    Hat,
    Accessory,
    Background,
}

impl ItemSlot {
    pub const ALL: [ItemSlot; 3] = [ItemSlot::Hat, ItemSlot::Accessory, ItemSlot::Background];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemSlot::Hat => "hat",
            ItemSlot::Accessory => "accessory",
            ItemSlot::Background => "background",
        }
    }
}

impl fmt::Display for ItemSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item that can be bought with stars
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub id: ItemId,
    pub name: String,
    pub slot: ItemSlot,
    pub cost: u32,
    pub asset: String,
}

static SHOP_ITEMS: LazyLock<Vec<ShopItem>> = LazyLock::new(|| {
    [
        ("party_hat", "Party Hat", ItemSlot::Hat, 10),
        ("crown", "Golden Crown", ItemSlot::Hat, 40),
        ("flower_wreath", "Flower Wreath", ItemSlot::Hat, 20),
        ("bow_tie", "Bow Tie", ItemSlot::Accessory, 8),
        ("magic_wand", "Magic Wand", ItemSlot::Accessory, 25),
        ("scarf", "Cozy Scarf", ItemSlot::Accessory, 15),
        ("meadow", "Sunny Meadow", ItemSlot::Background, 30),
        ("space", "Outer Space", ItemSlot::Background, 50),
    ]
    .into_iter()
    .map(|(id, name, slot, cost)| ShopItem {
        id: ItemId::new(id),
        name: name.to_string(),
        slot,
        cost,
        asset: format!("items/{}/{}.png", slot.as_str(), id),
    })
    .collect()
});

/// Every item in the shop
pub fn shop_items() -> &'static [ShopItem] {
    &SHOP_ITEMS
}

/// Look an item up by id
pub fn get_item_by_id(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.id.as_str() == id)
}

/// Items worn in the given slot
pub fn items_in_slot(slot: ItemSlot) -> impl Iterator<Item = &'static ShopItem> {
    SHOP_ITEMS.iter().filter(move |item| item.slot == slot)
}
