//! Static mission catalog
//!
//! Missions are not persisted. The catalog is rebuilt on every call and
//! filtered by the level the client asks for.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::scores::Category;

/// A playable mission card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mission {
    pub mission_id: &'static str,
    #[serde(serialize_with = "category_label")]
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    pub target_age_group: &'static str,
    pub level_required: u8,
    pub score_reward: BTreeMap<Category, i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_data: Option<GameData>,
}

/// Scene setup consumed by the game client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameData {
    pub scene_type: &'static str,
    pub environment: &'static str,
    pub litter_items: Vec<LitterItem>,
    pub npcs: Vec<Npc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LitterItem {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub count: u32,
    pub bin_target: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Npc {
    pub name: &'static str,
    pub dialogue_start: &'static str,
    pub dialogue_end: &'static str,
}

fn category_label<S: Serializer>(category: &Category, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(category.display_name())
}

/// Missions whose `level_required` equals `level`.
///
/// Any integer is accepted; levels without content yield an empty list.
pub fn missions_for_level(level: i64) -> Vec<Mission> {
    catalog()
        .into_iter()
        .filter(|mission| i64::from(mission.level_required) == level)
        .collect()
}

fn catalog() -> Vec<Mission> {
    vec![tap_the_trash(), clean_the_park()]
}

fn tap_the_trash() -> Mission {
    Mission {
        mission_id: "mission_hyg_000",
        category: Category::Hygiene,
        title: "Tap the Trash",
        description: "Tap the trash to make it disappear.",
        target_age_group: "1-3",
        level_required: 1,
        score_reward: BTreeMap::from([(Category::Hygiene, 5)]),
        game_data: None,
    }
}

fn clean_the_park() -> Mission {
    Mission {
        mission_id: "mission_hyg_001",
        category: Category::Hygiene,
        title: "Clean the Park",
        description: "Pick up the littered wrappers and throw them in the correct dustbin.",
        target_age_group: "4-6",
        level_required: 2,
        score_reward: BTreeMap::from([(Category::Hygiene, 10), (Category::Environment, 5)]),
        game_data: Some(GameData {
            scene_type: "cleanup_drag_drop",
            environment: "park",
            litter_items: vec![
                LitterItem {
                    kind: "wrapper",
                    count: 3,
                    bin_target: "dry_waste",
                },
                LitterItem {
                    kind: "banana_peel",
                    count: 2,
                    bin_target: "wet_waste",
                },
            ],
            npcs: vec![Npc {
                name: "Park Ranger",
                dialogue_start: "Oh no! The park is dirty. Can you help clean it?",
                dialogue_end: "Thank you! The park looks beautiful and everyone is happy.",
            }],
        }),
    }
}
