//! Preset mission catalog and mission lookup/grouping utilities
//!
//! The catalog is static: ten preset missions with distinct ids and
//! distinct `sort_order` values. Custom missions are supplied by callers.

use crate::{Mission, MissionCategory, MissionId};
use indexmap::IndexMap;
use std::sync::LazyLock;

/// The fixed category ordering used for every grouping or enumeration
pub const CATEGORY_ORDER: [MissionCategory; 5] = MissionCategory::ALL;

/// Display label per category, in `CATEGORY_ORDER`
pub const CATEGORY_LABELS: [(MissionCategory, &str); 5] = [
    (MissionCategory::Morning, MissionCategory::Morning.label()),
    (MissionCategory::Daytime, MissionCategory::Daytime.label()),
    (MissionCategory::Evening, MissionCategory::Evening.label()),
    (MissionCategory::Study, MissionCategory::Study.label()),
    (MissionCategory::Health, MissionCategory::Health.label()),
];

/// Missions grouped by category, keyed in `CATEGORY_ORDER`
pub type MissionGroups = IndexMap<MissionCategory, Vec<Mission>>;

struct PresetDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    category: MissionCategory,
    timer_seconds: u32,
    star_reward: u32,
    start: &'static str,
    complete: &'static str,
}

const PRESETS: [PresetDef; 10] = [
    PresetDef {
        id: "wake_up",
        name: "Wake up on time",
        description: "Get out of bed when the alarm rings",
        icon: "sunrise",
        category: MissionCategory::Morning,
        timer_seconds: 0,
        star_reward: 1,
        start: "Good morning! Ready to start the day?",
        complete: "You're up! What a bright start!",
    },
    PresetDef {
        id: "brush_teeth_morning",
        name: "Brush teeth",
        description: "Brush every tooth for three whole minutes",
        icon: "toothbrush",
        category: MissionCategory::Morning,
        timer_seconds: 180,
        star_reward: 2,
        start: "Let's make those teeth sparkle!",
        complete: "So shiny! Your smile is glowing!",
    },
    PresetDef {
        id: "eat_breakfast",
        name: "Eat breakfast",
        description: "Finish a healthy breakfast",
        icon: "bowl",
        category: MissionCategory::Morning,
        timer_seconds: 0,
        star_reward: 1,
        start: "Yum, breakfast time!",
        complete: "Full of energy for today!",
    },
    PresetDef {
        id: "tidy_toys",
        name: "Tidy up toys",
        description: "Put every toy back where it lives",
        icon: "blocks",
        category: MissionCategory::Daytime,
        timer_seconds: 600,
        star_reward: 2,
        start: "The toys want to go home. Can you help?",
        complete: "Wow, the room looks brand new!",
    },
    PresetDef {
        id: "help_chores",
        name: "Help with a chore",
        description: "Help a grown-up with one job around the house",
        icon: "broom",
        category: MissionCategory::Daytime,
        timer_seconds: 0,
        star_reward: 2,
        start: "Helpers are heroes!",
        complete: "Thank you, super helper!",
    },
    PresetDef {
        id: "brush_teeth_night",
        name: "Brush teeth before bed",
        description: "Brush away the day",
        icon: "moon_toothbrush",
        category: MissionCategory::Evening,
        timer_seconds: 180,
        star_reward: 2,
        start: "One more brush before dreamland!",
        complete: "Clean teeth, sweet dreams!",
    },
    PresetDef {
        id: "bedtime",
        name: "Go to bed on time",
        description: "Be in bed when it's time to sleep",
        icon: "moon",
        category: MissionCategory::Evening,
        timer_seconds: 0,
        star_reward: 1,
        start: "Time to get cozy.",
        complete: "Good night! See you tomorrow!",
    },
    PresetDef {
        id: "homework",
        name: "Do homework",
        description: "Finish today's homework",
        icon: "pencil",
        category: MissionCategory::Study,
        timer_seconds: 1200,
        star_reward: 3,
        start: "Let's think hard together!",
        complete: "Brain power! Homework done!",
    },
    PresetDef {
        id: "read_book",
        name: "Read a book",
        description: "Read for fifteen minutes",
        icon: "book",
        category: MissionCategory::Study,
        timer_seconds: 900,
        star_reward: 2,
        start: "Which story shall we visit today?",
        complete: "What an adventure that was!",
    },
    PresetDef {
        id: "exercise",
        name: "Move your body",
        description: "Jump, dance or play outside for ten minutes",
        icon: "running",
        category: MissionCategory::Health,
        timer_seconds: 600,
        star_reward: 2,
        start: "Ready, set, go!",
        complete: "Strong and speedy!",
    },
];

static PRESET_MISSIONS: LazyLock<Vec<Mission>> = LazyLock::new(|| {
    PRESETS
        .iter()
        .zip(1..)
        .map(|(def, sort_order)| Mission {
            id: MissionId::new(def.id),
            name: def.name.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            category: def.category,
            timer_seconds: def.timer_seconds,
            star_reward: def.star_reward,
            fairy_message_start: def.start.to_string(),
            fairy_message_complete: def.complete.to_string(),
            is_preset: true,
            is_active: true,
            sort_order,
        })
        .collect()
});

/// The preset mission catalog, in `sort_order`
pub fn preset_missions() -> &'static [Mission] {
    &PRESET_MISSIONS
}

/// Check whether an id belongs to the preset catalog
pub fn is_preset_id(id: &str) -> bool {
    PRESET_MISSIONS.iter().any(|m| m.id.as_str() == id)
}

/// Look a mission up by id
///
/// Searches the preset catalog first, then `custom`. A `None` id or an
/// unmatched id yields `None`.
pub fn get_mission_by_id<'a>(id: Option<&str>, custom: &'a [Mission]) -> Option<&'a Mission> {
    let id = id?;
    PRESET_MISSIONS
        .iter()
        .chain(custom.iter())
        .find(|m| m.id.as_str() == id)
}

/// Group missions by category, preserving input order within each group
///
/// Every category is present in the result, even when empty.
pub fn group_missions_by_category<'a, I>(missions: I) -> MissionGroups
where
    I: IntoIterator<Item = &'a Mission>,
{
    let mut groups = empty_groups();
    for mission in missions {
        if let Some(group) = groups.get_mut(&mission.category) {
            group.push(mission.clone());
        }
    }
    groups
}

/// Group missions decoded from loosely typed JSON
///
/// Anything that is not an array yields all-empty groups; array elements
/// that are not missions are skipped.
pub fn group_missions_json(value: &serde_json::Value) -> MissionGroups {
    let Some(items) = value.as_array() else {
        return empty_groups();
    };
    let missions: Vec<Mission> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();
    group_missions_by_category(&missions)
}

/// Merge presets and custom missions into one list ordered by `sort_order`
pub fn merge_missions(presets: &[Mission], custom: &[Mission]) -> Vec<Mission> {
    let mut all: Vec<Mission> = presets.iter().chain(custom.iter()).cloned().collect();
    all.sort_by_key(|m| m.sort_order);
    all
}

fn empty_groups() -> MissionGroups {
    CATEGORY_ORDER.iter().map(|c| (*c, Vec::new())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MissionDraft;
    use std::collections::HashSet;

    fn custom(id: &str, category: MissionCategory, sort_order: i32) -> Mission {
        Mission::from_draft(
            MissionId::new(id),
            MissionDraft::new(format!("Custom {}", id), category, 1),
            sort_order,
        )
    }

    #[test]
    fn test_preset_catalog_shape() {
        let presets = preset_missions();
        assert_eq!(presets.len(), 10);

        let ids: HashSet<_> = presets.iter().map(|m| m.id.clone()).collect();
        let orders: HashSet<_> = presets.iter().map(|m| m.sort_order).collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(orders.len(), 10);

        for mission in presets {
            assert!(mission.is_preset);
            assert!(mission.is_active);
            assert!(mission.star_reward > 0);
        }
    }

    #[test]
    fn test_get_mission_by_id_absent_inputs() {
        assert!(get_mission_by_id(None, &[]).is_none());
        assert!(get_mission_by_id(Some("no_such_mission"), &[]).is_none());
        assert!(get_mission_by_id(Some(""), &[]).is_none());
    }

    #[test]
    fn test_get_mission_by_id_presets_and_custom() {
        let found = get_mission_by_id(Some("homework"), &[]).unwrap();
        assert_eq!(found.category, MissionCategory::Study);

        let customs = vec![custom("custom-a", MissionCategory::Health, 11)];
        assert!(get_mission_by_id(Some("custom-a"), &[]).is_none());
        let found = get_mission_by_id(Some("custom-a"), &customs).unwrap();
        assert!(!found.is_preset);
    }

    #[test]
    fn test_group_empty_input_has_every_category() {
        let groups = group_missions_by_category(&[] as &[Mission]);
        assert_eq!(groups.len(), 5);
        assert!(groups.values().all(|g| g.is_empty()));
        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, CATEGORY_ORDER.to_vec());
    }

    #[test]
    fn test_group_preserves_input_order() {
        let missions = vec![
            custom("b", MissionCategory::Study, 30),
            custom("a", MissionCategory::Study, 10),
            custom("c", MissionCategory::Morning, 20),
        ];
        let groups = group_missions_by_category(&missions);
        let study: Vec<_> = groups[&MissionCategory::Study]
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(study, vec!["b", "a"]);
        assert_eq!(groups[&MissionCategory::Morning].len(), 1);
        assert!(groups[&MissionCategory::Evening].is_empty());
    }

    #[test]
    fn test_group_json_tolerates_invalid_input() {
        for value in [
            serde_json::Value::Null,
            serde_json::json!("missions"),
            serde_json::json!({ "id": "homework" }),
            serde_json::json!(42),
        ] {
            let groups = group_missions_json(&value);
            assert_eq!(groups.len(), 5);
            assert!(groups.values().all(|g| g.is_empty()));
        }
    }

    #[test]
    fn test_group_json_skips_malformed_elements() {
        let valid = serde_json::to_value(&preset_missions()[0]).unwrap();
        let value = serde_json::json!([valid, { "nope": true }, 7]);
        let groups = group_missions_json(&value);
        assert_eq!(groups[&MissionCategory::Morning].len(), 1);
    }

    #[test]
    fn test_merge_orders_by_sort_order() {
        let customs = vec![
            custom("late", MissionCategory::Health, 99),
            custom("early", MissionCategory::Health, 0),
        ];
        let merged = merge_missions(preset_missions(), &customs);
        assert_eq!(merged.len(), 12);
        assert_eq!(merged.first().unwrap().id.as_str(), "early");
        assert_eq!(merged.last().unwrap().id.as_str(), "late");
    }

    #[test]
    fn test_category_labels_follow_order() {
        for ((category, label), ordered) in CATEGORY_LABELS.iter().zip(CATEGORY_ORDER) {
            assert_eq!(*category, ordered);
            assert_eq!(category.label(), *label);
        }
    }
}
