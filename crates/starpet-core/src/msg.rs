//! User actions fed to the update function

use crate::{CharacterType, ItemId, ItemSlot, MissionDraft, MissionId, MissionPatch};
use serde::{Deserialize, Serialize};

/// A discrete user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    /// Mark a mission done for today and collect its stars
    CompleteMission { mission: MissionId, star_reward: u32 },
    /// Buy an item for `cost` stars
    PurchaseItem { item: ItemId, cost: u32 },
    /// Equip an owned item, or unequip it if already worn in `slot`
    ToggleEquipItem { item: ItemId, slot: ItemSlot },
    /// Switch the active pet
    SelectCharacter(CharacterType),
    /// Set or clear the child's name
    SetChildName(Option<String>),
    /// Flip a mission's active flag
    ToggleMission(MissionId),
    /// Merge edits into a mission
    UpdateMission { mission: MissionId, patch: MissionPatch },
    /// Remove a custom mission
    DeleteCustomMission(MissionId),
    /// Create a custom mission under a fresh id
    AddCustomMission { mission: MissionId, draft: MissionDraft },
}

impl Msg {
    pub fn complete(mission: impl Into<MissionId>, star_reward: u32) -> Self {
        Msg::CompleteMission {
            mission: mission.into(),
            star_reward,
        }
    }

    pub fn purchase(item: impl Into<ItemId>, cost: u32) -> Self {
        Msg::PurchaseItem {
            item: item.into(),
            cost,
        }
    }

    pub fn toggle_equip(item: impl Into<ItemId>, slot: ItemSlot) -> Self {
        Msg::ToggleEquipItem {
            item: item.into(),
            slot,
        }
    }

    pub fn update_mission(mission: impl Into<MissionId>, patch: MissionPatch) -> Self {
        Msg::UpdateMission {
            mission: mission.into(),
            patch,
        }
    }

    /// Create a custom mission with a newly generated id
    pub fn add_custom(draft: MissionDraft) -> Self {
        Msg::AddCustomMission {
            mission: MissionId::generate_custom(),
            draft,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Msg::CompleteMission { .. } => "complete_mission",
            Msg::PurchaseItem { .. } => "purchase_item",
            Msg::ToggleEquipItem { .. } => "toggle_equip_item",
            Msg::SelectCharacter(_) => "select_character",
            Msg::SetChildName(_) => "set_child_name",
            Msg::ToggleMission(_) => "toggle_mission",
            Msg::UpdateMission { .. } => "update_mission",
            Msg::DeleteCustomMission(_) => "delete_custom_mission",
            Msg::AddCustomMission { .. } => "add_custom_mission",
        }
    }
}
