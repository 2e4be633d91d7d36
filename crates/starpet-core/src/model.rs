//! Progression state

use crate::registry::{self, preset_missions};
use crate::{CharacterType, CompletedMap, Economy, Mission, MissionId, MissionPatch, PetState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pet progress for every character that has been selected at least once
pub type Pets = BTreeMap<CharacterType, PetState>;

/// Who is using the app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub child_name: Option<String>,
    #[serde(default)]
    pub selected_character: CharacterType,
}

impl Profile {
    pub fn new(selected_character: CharacterType) -> Self {
        Self {
            child_name: None,
            selected_character,
        }
    }
}

/// The complete progression state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Preset catalog with user edits applied
    pub preset_missions: Vec<Mission>,
    /// User-created missions
    pub custom_missions: Vec<Mission>,
    /// Merged, sort-ordered view; refreshed by `reload_all_missions`
    pub all_missions: Vec<Mission>,
    pub completed: CompletedMap,
    pub pets: Pets,
    pub economy: Economy,
    pub profile: Profile,
}

impl Model {
    /// First-run state
    pub fn new(default_character: CharacterType) -> Self {
        let mut model = Self {
            preset_missions: preset_missions().to_vec(),
            custom_missions: Vec::new(),
            all_missions: Vec::new(),
            completed: CompletedMap::new(),
            pets: Pets::new(),
            economy: Economy::new(),
            profile: Profile::new(default_character),
        };
        model.ensure_active_pet();
        model.reload_all_missions();
        model
    }

    /// Recompute the merged mission view from presets and custom missions
    pub fn reload_all_missions(&mut self) {
        self.all_missions = registry::merge_missions(&self.preset_missions, &self.custom_missions);
    }

    /// Bring one entry of the merged view in line with the authoritative lists
    ///
    /// Edits replace the cached record and deletions drop it. Missions not yet
    /// in the view stay out until the next `reload_all_missions`.
    pub fn refresh_cached_mission(&mut self, id: &MissionId) {
        let current = self.find_mission(id).cloned();
        match current {
            Some(mission) => {
                if let Some(cached) = self.all_missions.iter_mut().find(|m| &m.id == id) {
                    *cached = mission;
                }
            }
            None => self.all_missions.retain(|m| &m.id != id),
        }
    }

    /// Active missions from the merged view
    pub fn active_missions(&self) -> impl Iterator<Item = &Mission> {
        self.all_missions.iter().filter(|m| m.is_active)
    }

    /// Find a mission by id in the authoritative lists
    pub fn find_mission(&self, id: &MissionId) -> Option<&Mission> {
        self.preset_missions
            .iter()
            .chain(self.custom_missions.iter())
            .find(|m| &m.id == id)
    }

    pub(crate) fn find_mission_mut(&mut self, id: &MissionId) -> Option<&mut Mission> {
        self.preset_missions
            .iter_mut()
            .chain(self.custom_missions.iter_mut())
            .find(|m| &m.id == id)
    }

    /// Next free `sort_order` for a new mission
    pub fn next_sort_order(&self) -> i32 {
        self.preset_missions
            .iter()
            .chain(self.custom_missions.iter())
            .map(|m| m.sort_order)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Missions to persist: edited presets followed by custom missions
    pub fn missions_snapshot(&self) -> Vec<Mission> {
        self.preset_missions
            .iter()
            .chain(self.custom_missions.iter())
            .cloned()
            .collect()
    }

    /// Rebuild mission lists from a persisted snapshot
    ///
    /// Presets always come from the catalog; saved preset records only
    /// contribute their editable fields. Saved presets missing from the
    /// catalog and custom missions whose id clashes with a preset are dropped.
    pub fn restore_missions(&mut self, saved: Vec<Mission>) {
        let mut presets = preset_missions().to_vec();
        let mut custom: Vec<Mission> = Vec::new();

        for mission in saved {
            if let Some(preset) = presets.iter_mut().find(|p| p.id == mission.id) {
                let patch = MissionPatch::from(&mission);
                if mission.is_preset && patch.validate().is_ok() {
                    preset.apply(patch);
                }
            } else if !mission.is_preset && !custom.iter().any(|c| c.id == mission.id) {
                custom.push(mission);
            }
        }

        self.preset_missions = presets;
        self.custom_missions = custom;
        self.reload_all_missions();
    }

    /// The currently selected pet
    pub fn pet(&self) -> PetState {
        let character = self.profile.selected_character;
        self.pets
            .get(&character)
            .copied()
            .unwrap_or_else(|| PetState::new(character))
    }

    pub(crate) fn active_pet_mut(&mut self) -> &mut PetState {
        let character = self.profile.selected_character;
        self.pets
            .entry(character)
            .or_insert_with(|| PetState::new(character))
    }

    /// Make sure the selected character has a progress record
    pub fn ensure_active_pet(&mut self) {
        self.active_pet_mut();
    }

    /// Replace pet progress with persisted records, repairing bad entries
    pub fn restore_pets(&mut self, saved: Pets) {
        self.pets = saved
            .into_iter()
            .map(|(character, pet)| {
                let pet = PetState { character, ..pet }.clamped();
                (character, pet)
            })
            .collect();
        self.ensure_active_pet();
    }

    pub fn is_mission_completed(&self, today: NaiveDate, id: &MissionId) -> bool {
        self.completed.is_completed(today, id)
    }

    pub fn today_completed(&self, today: NaiveDate) -> Vec<MissionId> {
        self.completed.completed_on(today)
    }

    pub fn streak_days(&self, today: NaiveDate) -> u32 {
        self.completed.streak_days(today)
    }

    pub fn total_stars(&self) -> u32 {
        self.economy.total_stars
    }

    /// Stars from today's completions, at each mission's current reward
    ///
    /// Completions of missions that no longer exist are not counted.
    pub fn today_earned_stars(&self, today: NaiveDate) -> u32 {
        self.completed
            .completed_on(today)
            .iter()
            .filter_map(|id| self.find_mission(id))
            .map(|m| m.star_reward)
            .fold(0, u32::saturating_add)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(CharacterType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MissionCategory, MissionDraft};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_run_defaults() {
        let model = Model::new(CharacterType::Dino);
        assert_eq!(model.all_missions.len(), 10);
        assert!(model.custom_missions.is_empty());
        assert!(model.completed.is_empty());
        assert_eq!(model.total_stars(), 0);
        assert_eq!(model.profile.child_name, None);
        assert_eq!(model.pet(), PetState::new(CharacterType::Dino));
        assert!(model.pets.contains_key(&CharacterType::Dino));
    }

    #[test]
    fn test_next_sort_order() {
        let model = Model::default();
        assert_eq!(model.next_sort_order(), 11);
    }

    #[test]
    fn test_next_sort_order_saturates() {
        let mut model = Model::default();
        model.custom_missions.push(Mission::from_draft(
            MissionId::new("custom-last"),
            MissionDraft::new("Last", MissionCategory::Health, 1),
            i32::MAX,
        ));
        assert_eq!(model.next_sort_order(), i32::MAX);
    }

    #[test]
    fn test_today_earned_stars_saturates() {
        let mut model = Model::default();
        let today = day(2024, 6, 1);
        for name in ["custom-big-a", "custom-big-b"] {
            model.custom_missions.push(Mission::from_draft(
                MissionId::new(name),
                MissionDraft::new(name, MissionCategory::Study, u32::MAX),
                20,
            ));
            model.completed.mark(today, MissionId::new(name));
        }
        assert_eq!(model.today_earned_stars(today), u32::MAX);
    }

    #[test]
    fn test_restore_missions_keeps_catalog_identity() {
        let mut edited = preset_missions()[0].clone();
        edited.name = "Rise and shine".to_string();
        edited.is_active = false;
        edited.sort_order = 999;

        let custom = Mission::from_draft(
            MissionId::new("custom-1"),
            MissionDraft::new("Water plants", MissionCategory::Daytime, 1),
            11,
        );
        let mut impostor = custom.clone();
        impostor.id = MissionId::new("homework");
        let mut retired_preset = custom.clone();
        retired_preset.id = MissionId::new("retired");
        retired_preset.is_preset = true;

        let mut model = Model::default();
        model.restore_missions(vec![edited, custom.clone(), impostor, retired_preset]);

        let wake = model.find_mission(&MissionId::new("wake_up")).unwrap();
        assert_eq!(wake.name, "Rise and shine");
        assert!(!wake.is_active);
        assert_eq!(wake.sort_order, 1);

        assert_eq!(model.custom_missions, vec![custom]);
        assert_eq!(model.preset_missions.len(), 10);
        assert_eq!(model.all_missions.len(), 11);
        assert_eq!(
            model.find_mission(&MissionId::new("homework")).unwrap().name,
            "Do homework"
        );
    }

    #[test]
    fn test_restore_pets_repairs_records() {
        let mut saved = Pets::new();
        saved.insert(
            CharacterType::Robot,
            PetState {
                character: CharacterType::Fairy,
                stage: 7,
                exp: 12,
            },
        );
        let mut model = Model::new(CharacterType::Fairy);
        model.restore_pets(saved);

        let robot = model.pets[&CharacterType::Robot];
        assert_eq!(robot.character, CharacterType::Robot);
        assert_eq!(robot.stage, 3);
        assert!(model.pets.contains_key(&CharacterType::Fairy));
    }

    #[test]
    fn test_today_earned_stars() {
        let mut model = Model::default();
        let today = day(2024, 6, 1);
        model.completed.mark(today, MissionId::new("homework"));
        model.completed.mark(today, MissionId::new("wake_up"));
        model.completed.mark(today, MissionId::new("deleted-long-ago"));
        assert_eq!(model.today_earned_stars(today), 4);
    }
}
