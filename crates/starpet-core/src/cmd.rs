//! Commands (side effects) produced by the update function

use serde::{Deserialize, Serialize};

/// A persisted slice of the progression state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slice {
    /// Presets with user edits plus custom missions
    Missions,
    /// Per-day completion history
    Completed,
    /// Pet progress per character
    Pets,
    /// Stars, owned and equipped items
    Economy,
    /// Child name and selected character
    Profile,
}

impl Slice {
    pub const ALL: [Slice; 5] = [
        Slice::Missions,
        Slice::Completed,
        Slice::Pets,
        Slice::Economy,
        Slice::Profile,
    ];

    /// Storage key (before namespacing)
    pub const fn key(&self) -> &'static str {
        match self {
            Slice::Missions => "missions",
            Slice::Completed => "completed",
            Slice::Pets => "pet",
            Slice::Economy => "economy",
            Slice::Profile => "profile",
        }
    }
}

/// A command to be executed by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// No operation
    None,

    /// Batch multiple commands
    Batch(Vec<Cmd>),

    /// Write a slice of the current state to storage
    Persist(Slice),
}

impl Cmd {
    /// Create an empty command
    pub fn none() -> Self {
        Cmd::None
    }

    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        // Flatten nested batches and filter out None
        let mut flattened: Vec<Cmd> = cmds
            .into_iter()
            .flat_map(|cmd| match cmd {
                Cmd::None => vec![],
                Cmd::Batch(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            0 => Cmd::None,
            1 => flattened.pop().unwrap_or(Cmd::None),
            _ => Cmd::Batch(flattened),
        }
    }

    /// Create a persist command
    pub fn persist(slice: Slice) -> Self {
        Cmd::Persist(slice)
    }

    /// Persist several slices
    pub fn persist_all(slices: &[Slice]) -> Self {
        Self::batch(slices.iter().copied().map(Cmd::Persist).collect())
    }

    /// Check if this is a None command
    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Slices this command writes, each once, in first-mention order
    pub fn slices(&self) -> Vec<Slice> {
        let mut out = Vec::new();
        self.collect_slices(&mut out);
        out
    }

    fn collect_slices(&self, out: &mut Vec<Slice>) {
        match self {
            Cmd::None => {}
            Cmd::Persist(slice) => {
                if !out.contains(slice) {
                    out.push(*slice);
                }
            }
            Cmd::Batch(cmds) => cmds.iter().for_each(|cmd| cmd.collect_slices(out)),
        }
    }
}
