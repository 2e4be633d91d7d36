//! Starpet Core - Progression rules for a children's habit tracker
//!
//! This crate provides the pure, synchronous half of starpet:
//! - Preset mission catalog with category grouping (`registry`)
//! - Pet growth catalog with evolution thresholds (`pet`)
//! - Shop catalog of cosmetic items (`shop`)
//! - Completion history, streaks and the star economy
//! - Elm-style `Model`, `Msg`, `Cmd` and the `update` function
//!
//! Nothing here performs I/O. The engine crate executes the `Cmd`s that
//! `update` returns.

mod cmd;
mod completed;
mod economy;
mod error;
mod identity;
mod mission;
mod model;
mod msg;
mod outcome;
pub mod pet;
pub mod registry;
pub mod shop;
pub mod time;
mod update;

pub use cmd::{Cmd, Slice};
pub use completed::CompletedMap;
pub use economy::{Economy, EquipChange};
pub use error::{Error, Result};
pub use identity::{ItemId, MissionId};
pub use mission::{Mission, MissionCategory, MissionDraft, MissionPatch};
pub use model::{Model, Pets, Profile};
pub use msg::Msg;
pub use outcome::{Outcome, Rejection};
pub use pet::{CharacterConfig, CharacterType, Evolution, PetState, StageConfig};
pub use registry::{MissionGroups, CATEGORY_LABELS, CATEGORY_ORDER};
pub use shop::{ItemSlot, ShopItem};
pub use time::{DayClock, FixedClock, LocalClock};
pub use update::{update, UpdateResult};
