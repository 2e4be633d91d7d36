//! Elm-style update: apply a `Msg` to the `Model`
//!
//! `update` is synchronous and pure apart from mutating the model. It
//! returns the `Cmd` describing which slices must be persisted; rejected
//! messages leave the model untouched and return `Cmd::None`.

use crate::{Cmd, Evolution, Mission, MissionId, Model, Msg, Outcome, Rejection, Slice};
use chrono::NaiveDate;

/// Result of an update cycle
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult {
    /// Whether the message changed anything
    pub outcome: Outcome,
    /// Commands to execute
    pub cmd: Cmd,
    /// Pet stage change triggered by this message
    pub evolution: Option<Evolution>,
}

impl UpdateResult {
    /// Applied, persisting the given slices
    pub fn applied(slices: &[Slice]) -> Self {
        Self {
            outcome: Outcome::Applied,
            cmd: Cmd::persist_all(slices),
            evolution: None,
        }
    }

    /// Rejected, nothing to persist
    pub fn rejected(reason: Rejection) -> Self {
        Self {
            outcome: Outcome::Rejected(reason),
            cmd: Cmd::None,
            evolution: None,
        }
    }

    fn from_result(result: Result<(), Rejection>, slices: &[Slice]) -> Self {
        match result {
            Ok(()) => Self::applied(slices),
            Err(reason) => Self::rejected(reason),
        }
    }
}

/// Apply one user action to the model
pub fn update(model: &mut Model, msg: Msg, today: NaiveDate) -> UpdateResult {
    match msg {
        Msg::CompleteMission {
            mission,
            star_reward,
        } => complete_mission(model, mission, star_reward, today),

        Msg::PurchaseItem { item, cost } => UpdateResult::from_result(
            model.economy.purchase(item, cost),
            &[Slice::Economy],
        ),

        Msg::ToggleEquipItem { item, slot } => UpdateResult::from_result(
            model.economy.toggle_equip(item, slot).map(|_| ()),
            &[Slice::Economy],
        ),

        Msg::SelectCharacter(character) => {
            model.profile.selected_character = character;
            model.ensure_active_pet();
            UpdateResult::applied(&[Slice::Profile, Slice::Pets])
        }

        Msg::SetChildName(name) => {
            model.profile.child_name = name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty());
            UpdateResult::applied(&[Slice::Profile])
        }

        Msg::ToggleMission(id) => match model.find_mission_mut(&id) {
            Some(mission) => {
                mission.is_active = !mission.is_active;
                model.refresh_cached_mission(&id);
                UpdateResult::applied(&[Slice::Missions])
            }
            None => UpdateResult::rejected(Rejection::UnknownMission(id)),
        },

        Msg::UpdateMission { mission, patch } => {
            if let Err(reason) = patch.validate() {
                return UpdateResult::rejected(reason);
            }
            match model.find_mission_mut(&mission) {
                Some(target) => {
                    target.apply(patch);
                    model.refresh_cached_mission(&mission);
                    UpdateResult::applied(&[Slice::Missions])
                }
                None => UpdateResult::rejected(Rejection::UnknownMission(mission)),
            }
        }

        Msg::DeleteCustomMission(id) => {
            if model.preset_missions.iter().any(|m| m.id == id) {
                return UpdateResult::rejected(Rejection::PresetNotDeletable(id));
            }
            let before = model.custom_missions.len();
            model.custom_missions.retain(|m| m.id != id);
            if model.custom_missions.len() == before {
                UpdateResult::rejected(Rejection::UnknownMission(id))
            } else {
                model.refresh_cached_mission(&id);
                UpdateResult::applied(&[Slice::Missions])
            }
        }

        Msg::AddCustomMission { mission, draft } => {
            if let Err(reason) = draft.validate() {
                return UpdateResult::rejected(reason);
            }
            if model.find_mission(&mission).is_some() {
                return UpdateResult::rejected(Rejection::DuplicateMission(mission));
            }
            let sort_order = model.next_sort_order();
            model
                .custom_missions
                .push(Mission::from_draft(mission, draft, sort_order));
            UpdateResult::applied(&[Slice::Missions])
        }
    }
}

/// Record today's completion, pay out stars and feed the pet
///
/// Completing the same mission twice on one day pays nothing the second time.
fn complete_mission(
    model: &mut Model,
    mission: MissionId,
    star_reward: u32,
    today: NaiveDate,
) -> UpdateResult {
    if !model.completed.mark(today, mission.clone()) {
        return UpdateResult::rejected(Rejection::AlreadyCompletedToday(mission));
    }
    model.economy.earn(star_reward);
    let evolution = model.active_pet_mut().gain_exp(star_reward);

    UpdateResult {
        evolution,
        ..UpdateResult::applied(&[Slice::Completed, Slice::Economy, Slice::Pets])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CharacterType, ItemSlot, MissionCategory, MissionDraft, MissionPatch, PetState};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    #[test]
    fn test_complete_mission_is_idempotent() {
        let mut model = Model::default();
        let first = update(&mut model, Msg::complete("homework", 3), today());
        assert!(first.outcome.is_applied());
        assert_eq!(
            first.cmd.slices(),
            vec![Slice::Completed, Slice::Economy, Slice::Pets]
        );

        let second = update(&mut model, Msg::complete("homework", 3), today());
        assert_eq!(
            second.outcome,
            Outcome::Rejected(Rejection::AlreadyCompletedToday(MissionId::new("homework")))
        );
        assert!(second.cmd.is_none());
        assert_eq!(model.total_stars(), 3);
        assert_eq!(model.pet().exp, 3);
        assert_eq!(model.today_completed(today()).len(), 1);
    }

    #[test]
    fn test_completion_next_day_pays_again() {
        let mut model = Model::default();
        update(&mut model, Msg::complete("read_book", 2), today());
        let tomorrow = today().succ_opt().unwrap();
        let result = update(&mut model, Msg::complete("read_book", 2), tomorrow);
        assert!(result.outcome.is_applied());
        assert_eq!(model.total_stars(), 4);
        assert_eq!(model.streak_days(tomorrow), 2);
    }

    #[test]
    fn test_completion_evolves_active_pet_once() {
        let mut model = Model::new(CharacterType::Robot);
        model.pets.insert(
            CharacterType::Robot,
            PetState {
                character: CharacterType::Robot,
                stage: 1,
                exp: 28,
            },
        );

        let result = update(&mut model, Msg::complete("exercise", 200), today());
        let evolution = result.evolution.unwrap();
        assert_eq!((evolution.from_stage, evolution.to_stage), (1, 2));
        assert_eq!(model.pet().stage, 2);
        // 28 + 200 - 30 carried into stage 2, even though it clears stage 2 too.
        assert_eq!(model.pet().exp, 198);
    }

    #[test]
    fn test_purchase_scenario() {
        let mut model = Model::default();
        model.economy.earn(10);

        let result = update(&mut model, Msg::purchase("x", 15), today());
        assert!(result.outcome.is_rejected());
        assert!(result.cmd.is_none());
        assert_eq!(model.total_stars(), 10);

        let result = update(&mut model, Msg::purchase("x", 10), today());
        assert!(result.outcome.is_applied());
        assert_eq!(result.cmd, Cmd::Persist(Slice::Economy));
        assert_eq!(model.total_stars(), 0);
        assert!(model.economy.owns(&"x".into()));
    }

    #[test]
    fn test_toggle_equip_unowned_rejected() {
        let mut model = Model::default();
        let result = update(&mut model, Msg::toggle_equip("crown", ItemSlot::Hat), today());
        assert!(matches!(
            result.outcome,
            Outcome::Rejected(Rejection::NotOwned(_))
        ));
    }

    #[test]
    fn test_select_character_keeps_other_progress() {
        let mut model = Model::new(CharacterType::Fairy);
        update(&mut model, Msg::complete("homework", 3), today());
        update(&mut model, Msg::SelectCharacter(CharacterType::Dino), today());
        assert_eq!(model.pet(), PetState::new(CharacterType::Dino));

        update(&mut model, Msg::SelectCharacter(CharacterType::Fairy), today());
        assert_eq!(model.pet().exp, 3);
    }

    #[test]
    fn test_set_child_name_trims_and_clears() {
        let mut model = Model::default();
        update(&mut model, Msg::SetChildName(Some("  Mina ".into())), today());
        assert_eq!(model.profile.child_name.as_deref(), Some("Mina"));
        update(&mut model, Msg::SetChildName(Some("   ".into())), today());
        assert_eq!(model.profile.child_name, None);
    }

    #[test]
    fn test_toggle_mission() {
        let mut model = Model::default();
        let id = MissionId::new("bedtime");
        update(&mut model, Msg::ToggleMission(id.clone()), today());
        assert!(!model.find_mission(&id).unwrap().is_active);
        update(&mut model, Msg::ToggleMission(id.clone()), today());
        assert!(model.find_mission(&id).unwrap().is_active);

        let result = update(&mut model, Msg::ToggleMission("nope".into()), today());
        assert!(result.outcome.is_rejected());
    }

    #[test]
    fn test_update_mission_preset_fields() {
        let mut model = Model::default();
        let result = update(
            &mut model,
            Msg::update_mission("homework", MissionPatch::reward(5)),
            today(),
        );
        assert!(result.outcome.is_applied());
        let homework = model.find_mission(&"homework".into()).unwrap();
        assert_eq!(homework.star_reward, 5);
        assert!(homework.is_preset);
        assert_eq!(homework.sort_order, 8);

        let result = update(
            &mut model,
            Msg::update_mission("homework", MissionPatch::reward(0)),
            today(),
        );
        assert_eq!(result.outcome, Outcome::Rejected(Rejection::InvalidStarReward));
    }

    #[test]
    fn test_add_and_delete_custom_mission() {
        let mut model = Model::default();
        let draft = MissionDraft::new("Walk the dog", MissionCategory::Health, 2);
        let msg = Msg::add_custom(draft);
        let Msg::AddCustomMission { mission: id, .. } = msg.clone() else {
            panic!("Expected AddCustomMission");
        };
        let result = update(&mut model, msg, today());
        assert!(result.outcome.is_applied());

        let created = model.find_mission(&id).unwrap();
        assert!(!created.is_preset);
        assert_eq!(created.sort_order, 11);

        let result = update(&mut model, Msg::DeleteCustomMission(id.clone()), today());
        assert!(result.outcome.is_applied());
        assert!(model.find_mission(&id).is_none());

        let result = update(&mut model, Msg::DeleteCustomMission(id.clone()), today());
        assert_eq!(result.outcome, Outcome::Rejected(Rejection::UnknownMission(id)));
    }

    #[test]
    fn test_mission_edits_show_in_cached_view() {
        let mut model = Model::default();
        let msg = Msg::add_custom(MissionDraft::new("Feed fish", MissionCategory::Daytime, 1));
        let Msg::AddCustomMission { mission: id, .. } = msg.clone() else {
            panic!("Expected AddCustomMission");
        };
        update(&mut model, msg, today());
        // New missions join the view on the next reload.
        assert!(!model.all_missions.iter().any(|m| m.id == id));
        model.reload_all_missions();
        assert_eq!(model.all_missions.len(), 11);

        update(&mut model, Msg::ToggleMission("read_book".into()), today());
        assert!(!model.active_missions().any(|m| m.id.as_str() == "read_book"));

        update(
            &mut model,
            Msg::update_mission("homework", MissionPatch::rename("Study hour")),
            today(),
        );
        let homework = model.all_missions.iter().find(|m| m.id.as_str() == "homework");
        assert_eq!(homework.unwrap().name, "Study hour");

        update(&mut model, Msg::DeleteCustomMission(id.clone()), today());
        assert!(!model.all_missions.iter().any(|m| m.id == id));
        assert_eq!(model.all_missions.len(), 10);
    }

    #[test]
    fn test_delete_preset_rejected() {
        let mut model = Model::default();
        let result = update(&mut model, Msg::DeleteCustomMission("wake_up".into()), today());
        assert_eq!(
            result.outcome,
            Outcome::Rejected(Rejection::PresetNotDeletable("wake_up".into()))
        );
        assert_eq!(model.preset_missions.len(), 10);
    }

    #[test]
    fn test_add_custom_mission_rejects_empty_name() {
        let mut model = Model::default();
        let draft = MissionDraft::new(" ", MissionCategory::Study, 1);
        let result = update(&mut model, Msg::add_custom(draft), today());
        assert_eq!(result.outcome, Outcome::Rejected(Rejection::EmptyName));
        assert!(model.custom_missions.is_empty());
    }

    #[test]
    fn test_add_custom_mission_rejects_taken_id() {
        let mut model = Model::default();
        let msg = Msg::AddCustomMission {
            mission: MissionId::new("homework"),
            draft: MissionDraft::new("More homework", MissionCategory::Study, 1),
        };
        let result = update(&mut model, msg, today());
        assert_eq!(
            result.outcome,
            Outcome::Rejected(Rejection::DuplicateMission("homework".into()))
        );
        assert!(model.custom_missions.is_empty());
    }
}
