//! Pet growth catalog and pet progress
//!
//! Each character type grows through a fixed list of stages. A stage can be
//! left once its `max_exp` is reached; the last stage is final.
//!
//! Evolution carries surplus over: when a pet evolves, the stage threshold is
//! subtracted from its exp and the remainder stays with the new stage. One
//! evaluation advances at most one stage.

use crate::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Selectable pet characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CharacterType {
    #[default]
    Fairy,
    Dino,
    Robot,
}

impl CharacterType {
    /// All character types, in selection-screen order
    pub const ALL: [CharacterType; 3] = [
        CharacterType::Fairy,
        CharacterType::Dino,
        CharacterType::Robot,
    ];

    /// Stable identifier used in persisted data
    pub const fn as_str(&self) -> &'static str {
        match self {
            CharacterType::Fairy => "fairy",
            CharacterType::Dino => "dino",
            CharacterType::Robot => "robot",
        }
    }

    fn index(self) -> usize {
        match self {
            CharacterType::Fairy => 0,
            CharacterType::Dino => 1,
            CharacterType::Robot => 2,
        }
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CharacterType::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::InvalidCharacterType(s.to_string()))
    }
}

/// Type-level metadata for a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterConfig {
    pub id: CharacterType,
    pub display_name: String,
    pub max_stage: u8,
}

/// One growth stage of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageConfig {
    pub stage: u8,
    pub name: String,
    pub display_name: String,
    /// Exp needed to leave this stage
    pub max_exp: u32,
    /// Lines the pet may say at this stage (never empty)
    pub dialogues: Vec<String>,
    /// Visual asset reference
    pub asset: String,
}

struct CharacterDef {
    config: CharacterConfig,
    stages: Vec<StageConfig>,
}

fn character(
    id: CharacterType,
    display_name: &str,
    stages: &[(&str, &str, u32, [&str; 3])],
) -> CharacterDef {
    let stages: Vec<StageConfig> = stages
        .iter()
        .zip(1u8..)
        .map(|((name, display, max_exp, dialogues), stage)| StageConfig {
            stage,
            name: name.to_string(),
            display_name: display.to_string(),
            max_exp: *max_exp,
            dialogues: dialogues.iter().map(|d| d.to_string()).collect(),
            asset: format!("pets/{}/stage{}.png", id.as_str(), stage),
        })
        .collect();
    CharacterDef {
        config: CharacterConfig {
            id,
            display_name: display_name.to_string(),
            max_stage: stages.len() as u8,
        },
        stages,
    }
}

static CATALOG: LazyLock<[CharacterDef; 3]> = LazyLock::new(|| {
    [
        character(
            CharacterType::Fairy,
            "Fairy",
            &[
                (
                    "sprout",
                    "Little Sprout",
                    30,
                    [
                        "Hello! I'm so tiny!",
                        "Will you help me grow?",
                        "I love sunshine!",
                    ],
                ),
                (
                    "sprite",
                    "Flower Sprite",
                    80,
                    [
                        "Look, I can fly a little!",
                        "Your missions make me sparkle!",
                        "Let's do our best today!",
                    ],
                ),
                (
                    "fairy",
                    "Star Fairy",
                    150,
                    [
                        "You made me a real fairy!",
                        "Together we shine brightest!",
                        "I'm proud of you every day!",
                    ],
                ),
            ],
        ),
        character(
            CharacterType::Dino,
            "Dino",
            &[
                (
                    "egg",
                    "Dino Egg",
                    30,
                    [
                        "*wobble wobble*",
                        "Something is moving inside!",
                        "Keep me warm, please!",
                    ],
                ),
                (
                    "hatchling",
                    "Baby Dino",
                    80,
                    [
                        "Rawr! I hatched!",
                        "I'm hungry for stars!",
                        "Stomp stomp, let's play!",
                    ],
                ),
                (
                    "rex",
                    "Mighty Rex",
                    150,
                    [
                        "ROAR! I'm the biggest!",
                        "Nothing can stop us!",
                        "Thanks for raising me, buddy!",
                    ],
                ),
            ],
        ),
        character(
            CharacterType::Robot,
            "Robot",
            &[
                (
                    "bolt",
                    "Tiny Bolt",
                    30,
                    [
                        "Beep! Booting up...",
                        "Charging with your stars!",
                        "Hello, human friend!",
                    ],
                ),
                (
                    "bot",
                    "Helper Bot",
                    80,
                    [
                        "Systems upgraded!",
                        "Mission complete: happy!",
                        "Beep boop, good job!",
                    ],
                ),
                (
                    "mecha",
                    "Mega Mecha",
                    150,
                    [
                        "Maximum power reached!",
                        "Best team in the galaxy!",
                        "All systems: awesome!",
                    ],
                ),
            ],
        ),
    ]
});

fn def(character: CharacterType) -> &'static CharacterDef {
    &CATALOG[character.index()]
}

/// Type-level metadata for a character
pub fn get_config(character: CharacterType) -> &'static CharacterConfig {
    &def(character).config
}

/// Stage record for a character, failing for stages outside `1..=max_stage`
pub fn get_stage_config(character: CharacterType, stage: u8) -> Result<&'static StageConfig> {
    let def = def(character);
    if stage == 0 {
        return Err(stage_error(character, stage));
    }
    def.stages
        .get(stage as usize - 1)
        .ok_or_else(|| stage_error(character, stage))
}

fn stage_error(character: CharacterType, stage: u8) -> Error {
    Error::StageOutOfRange {
        character: character.to_string(),
        stage,
        max: get_config(character).max_stage,
    }
}

/// Visual asset reference for a stage
pub fn get_asset(character: CharacterType, stage: u8) -> Result<&'static str> {
    get_stage_config(character, stage).map(|s| s.asset.as_str())
}

/// Pick one line from the stage's dialogue pool
pub fn get_random_dialogue(character: CharacterType, stage: u8) -> Result<&'static str> {
    get_random_dialogue_with(character, stage, &mut rand::thread_rng())
}

/// Pick one line from the stage's dialogue pool using the given RNG
pub fn get_random_dialogue_with<R: Rng + ?Sized>(
    character: CharacterType,
    stage: u8,
    rng: &mut R,
) -> Result<&'static str> {
    let config = get_stage_config(character, stage)?;
    // Pools are never empty, so choose only fails on a catalog bug.
    Ok(config
        .dialogues
        .choose(rng)
        .map(String::as_str)
        .unwrap_or_default())
}

/// Whether a pet at `stage` with `exp` is ready for the next stage
///
/// Always false at the final stage.
pub fn can_evolve(character: CharacterType, stage: u8, exp: u32) -> bool {
    if stage >= get_config(character).max_stage {
        return false;
    }
    get_stage_config(character, stage)
        .map(|config| exp >= config.max_exp)
        .unwrap_or(false)
}

/// Every character type in the catalog
pub fn get_all_types() -> &'static [CharacterType] {
    &CharacterType::ALL
}

/// A stage transition that just happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evolution {
    pub character: CharacterType,
    pub from_stage: u8,
    pub to_stage: u8,
}

/// Growth progress of one pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    #[serde(rename = "type")]
    pub character: CharacterType,
    pub stage: u8,
    pub exp: u32,
}

impl PetState {
    /// A freshly adopted pet
    pub fn new(character: CharacterType) -> Self {
        Self {
            character,
            stage: 1,
            exp: 0,
        }
    }

    /// Add exp and evolve at most one stage
    pub fn gain_exp(&mut self, amount: u32) -> Option<Evolution> {
        self.exp = self.exp.saturating_add(amount);
        self.try_evolve()
    }

    /// Advance one stage if the threshold is met, carrying surplus exp over
    pub fn try_evolve(&mut self) -> Option<Evolution> {
        if !can_evolve(self.character, self.stage, self.exp) {
            return None;
        }
        let threshold = get_stage_config(self.character, self.stage).ok()?.max_exp;
        let from_stage = self.stage;
        self.exp -= threshold;
        self.stage += 1;
        Some(Evolution {
            character: self.character,
            from_stage,
            to_stage: self.stage,
        })
    }

    /// Fraction of the current stage's threshold reached, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        match get_stage_config(self.character, self.stage) {
            Ok(config) if config.max_exp > 0 => (self.exp as f32 / config.max_exp as f32).min(1.0),
            _ => 0.0,
        }
    }

    /// Whether the pet has reached its final stage
    pub fn is_final_stage(&self) -> bool {
        self.stage >= get_config(self.character).max_stage
    }

    /// Stage record for the current stage
    pub fn stage_config(&self) -> Result<&'static StageConfig> {
        get_stage_config(self.character, self.stage)
    }

    /// Bring a loaded record back inside the catalog's stage range
    pub fn clamped(mut self) -> Self {
        let max = get_config(self.character).max_stage;
        self.stage = self.stage.clamp(1, max);
        self
    }
}
