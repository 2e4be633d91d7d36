//! The progression store
//!
//! Owns the authoritative in-memory `Model`. Every mutation runs the pure
//! `update` function synchronously, so its effects are visible to the next
//! read immediately, then hands the returned `Cmd` to the background writer.
//! Storage completion is only observable through [`ProgressionStore::flush`].

use crate::writer::{WriteOp, Writer};
use crate::{EngineConfig, Result};
use chrono::NaiveDate;
use starpet_core::shop;
use starpet_core::{
    update, CharacterType, Cmd, CompletedMap, DayClock, Economy, ItemId, ItemSlot, LocalClock,
    Mission, MissionDraft, MissionId, MissionPatch, Model, Msg, Outcome, PetState, Pets, Profile,
    Rejection, Slice, UpdateResult,
};
use starpet_db::{KeyValueStore, Persistence};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stateful orchestrator for missions, streaks, stars and the pet
///
/// Must be created inside a tokio runtime: construction spawns the
/// persistence writer task.
pub struct ProgressionStore<S: KeyValueStore + 'static> {
    config: EngineConfig,
    model: Model,
    is_loaded: bool,
    clock: Arc<dyn DayClock>,
    persistence: Arc<Persistence<S>>,
    writer: Writer,
}

impl<S: KeyValueStore + 'static> ProgressionStore<S> {
    /// Create a store over `backend` using the local device date
    pub fn new(backend: S, config: EngineConfig) -> Self {
        Self::with_clock(backend, config, Arc::new(LocalClock))
    }

    /// Create a store with an explicit day clock
    pub fn with_clock(backend: S, config: EngineConfig, clock: Arc<dyn DayClock>) -> Self {
        let persistence = Arc::new(Persistence::with_prefix(backend, config.key_prefix()));
        let writer = Writer::spawn(Arc::clone(&persistence));
        Self {
            model: Model::new(config.default_character()),
            config,
            is_loaded: false,
            clock,
            persistence,
            writer,
        }
    }

    /// Read every persisted slice, falling back to first-run values
    ///
    /// Safe to call repeatedly; each call replaces the in-memory state with
    /// what storage holds once queued writes have landed.
    pub async fn load_data(&mut self) {
        if let Err(e) = self.writer.flush().await {
            warn!(error = %e, "could not flush pending writes before load");
        }

        let default_character = self.config.default_character();
        let p = &self.persistence;
        let missions: Vec<Mission> = p.get(Slice::Missions.key(), Vec::new()).await;
        let completed: CompletedMap = p.get(Slice::Completed.key(), CompletedMap::new()).await;
        let pets: Pets = p.get(Slice::Pets.key(), Pets::new()).await;
        let economy: Economy = p.get(Slice::Economy.key(), Economy::new()).await;
        let profile: Profile = p
            .get(Slice::Profile.key(), Profile::new(default_character))
            .await;

        let mut model = Model::new(default_character);
        model.profile = profile;
        model.restore_missions(missions);
        model.completed = completed;
        model.economy = economy.repaired();
        model.restore_pets(pets);

        self.model = model;
        self.is_loaded = true;
        info!(
            missions = self.model.all_missions.len(),
            stars = self.model.total_stars(),
            character = %self.model.profile.selected_character,
            "progress loaded"
        );
    }

    /// Apply a message and schedule persistence of what it changed
    pub fn dispatch(&mut self, msg: Msg) -> UpdateResult {
        let name = msg.name();
        let today = self.today();
        let result = update(&mut self.model, msg, today);

        match &result.outcome {
            Outcome::Applied => debug!(action = name, "applied"),
            Outcome::Rejected(reason) => debug!(action = name, %reason, "rejected"),
        }
        if let Some(evolution) = &result.evolution {
            info!(
                character = %evolution.character,
                from = evolution.from_stage,
                to = evolution.to_stage,
                "pet evolved"
            );
        }

        self.execute(&result.cmd);
        result
    }

    fn execute(&self, cmd: &Cmd) {
        for slice in cmd.slices() {
            match self.slice_value(slice) {
                Ok(value) => self.writer.submit(WriteOp::Set {
                    key: slice.key(),
                    value,
                }),
                Err(e) => warn!(slice = slice.key(), error = %e, "could not encode slice"),
            }
        }
    }

    fn slice_value(&self, slice: Slice) -> serde_json::Result<serde_json::Value> {
        match slice {
            Slice::Missions => serde_json::to_value(self.model.missions_snapshot()),
            Slice::Completed => serde_json::to_value(&self.model.completed),
            Slice::Pets => serde_json::to_value(&self.model.pets),
            Slice::Economy => serde_json::to_value(&self.model.economy),
            Slice::Profile => serde_json::to_value(&self.model.profile),
        }
    }

    /// Wait for every write scheduled so far to reach storage
    pub async fn flush(&self) -> Result<()> {
        self.writer.flush().await
    }

    /// Erase persisted progress and return to first-run state
    pub async fn reset(&mut self) -> Result<()> {
        for slice in Slice::ALL {
            self.writer.submit(WriteOp::Remove { key: slice.key() });
        }
        self.writer.flush().await?;
        self.model = Model::new(self.config.default_character());
        info!("progress reset");
        Ok(())
    }

    // Missions

    /// Mark a mission done today; a repeat on the same day changes nothing
    pub fn complete_mission(
        &mut self,
        mission: impl Into<MissionId>,
        star_reward: u32,
    ) -> UpdateResult {
        self.dispatch(Msg::complete(mission, star_reward))
    }

    pub fn is_mission_completed_today(&self, mission: &MissionId) -> bool {
        self.model.is_mission_completed(self.today(), mission)
    }

    pub fn get_today_completed(&self) -> Vec<MissionId> {
        self.model.today_completed(self.today())
    }

    /// Consecutive days with a completion, ending today or yesterday
    pub fn get_streak_days(&self) -> u32 {
        self.model.streak_days(self.today())
    }

    /// Stars earned from today's completions
    pub fn today_earned_stars(&self) -> u32 {
        self.model.today_earned_stars(self.today())
    }

    pub fn toggle_mission(&mut self, mission: impl Into<MissionId>) -> Outcome {
        self.dispatch(Msg::ToggleMission(mission.into())).outcome
    }

    pub fn update_mission(
        &mut self,
        mission: impl Into<MissionId>,
        patch: MissionPatch,
    ) -> Outcome {
        self.dispatch(Msg::update_mission(mission, patch)).outcome
    }

    pub fn delete_custom_mission(&mut self, mission: impl Into<MissionId>) -> Outcome {
        self.dispatch(Msg::DeleteCustomMission(mission.into())).outcome
    }

    /// Create a custom mission, returning its id
    pub fn add_custom_mission(
        &mut self,
        draft: MissionDraft,
    ) -> std::result::Result<MissionId, Rejection> {
        let mission = MissionId::generate_custom();
        let msg = Msg::AddCustomMission {
            mission: mission.clone(),
            draft,
        };
        match self.dispatch(msg).outcome {
            Outcome::Applied => Ok(mission),
            Outcome::Rejected(reason) => Err(reason),
        }
    }

    /// Recompute the merged, sort-ordered mission view
    pub fn reload_all_missions(&mut self) {
        self.model.reload_all_missions();
    }

    /// Merged mission view as of the last reload
    pub fn all_missions(&self) -> &[Mission] {
        &self.model.all_missions
    }

    /// Active missions from the merged view
    pub fn active_missions(&self) -> Vec<&Mission> {
        self.model.active_missions().collect()
    }

    pub fn custom_missions(&self) -> &[Mission] {
        &self.model.custom_missions
    }

    /// Current record for a mission, independent of the cached view
    pub fn find_mission(&self, mission: &MissionId) -> Option<&Mission> {
        self.model.find_mission(mission)
    }

    // Economy

    /// Buy an item; unaffordable or already-owned purchases change nothing
    pub fn purchase_item(&mut self, item: impl Into<ItemId>, cost: u32) -> Outcome {
        self.dispatch(Msg::purchase(item, cost)).outcome
    }

    /// Buy a shop item at its catalog price
    pub fn purchase_catalog_item(&mut self, item: &str) -> Outcome {
        match shop::get_item_by_id(item) {
            Some(shop_item) => self.purchase_item(shop_item.id.clone(), shop_item.cost),
            None => {
                debug!(item, "unknown shop item");
                Outcome::Rejected(Rejection::UnknownItem(ItemId::new(item)))
            }
        }
    }

    pub fn toggle_equip_item(&mut self, item: impl Into<ItemId>, slot: ItemSlot) -> Outcome {
        self.dispatch(Msg::toggle_equip(item, slot)).outcome
    }

    pub fn total_stars(&self) -> u32 {
        self.model.total_stars()
    }

    pub fn owned_items(&self) -> &BTreeSet<ItemId> {
        &self.model.economy.owned_items
    }

    pub fn equipped_items(&self) -> &BTreeMap<ItemSlot, ItemId> {
        &self.model.economy.equipped_items
    }

    // Profile and pet

    pub fn select_character(&mut self, character: CharacterType) -> Outcome {
        self.dispatch(Msg::SelectCharacter(character)).outcome
    }

    pub fn set_child_name(&mut self, name: Option<String>) -> Outcome {
        self.dispatch(Msg::SetChildName(name)).outcome
    }

    pub fn selected_character(&self) -> CharacterType {
        self.model.profile.selected_character
    }

    pub fn child_name(&self) -> Option<&str> {
        self.model.profile.child_name.as_deref()
    }

    /// The active pet
    pub fn pet(&self) -> PetState {
        self.model.pet()
    }

    // State

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn completed_map(&self) -> &CompletedMap {
        &self.model.completed
    }

    /// Read-only view of the whole state
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current calendar day
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Writes that reached storage so far
    pub fn writes_applied(&self) -> u64 {
        self.writer.applied()
    }

    /// Writes storage refused so far
    pub fn writes_failed(&self) -> u64 {
        self.writer.failed()
    }

    /// The persistence adapter, for inspecting stored slices
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }
}
