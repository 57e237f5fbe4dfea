//! Deck-related types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A deck served by the study server, identified by its URL prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeckRoute {
    /// English listening, spelling and writing practice (`/api`).
    #[default]
    English,
    /// French shadowing with pronunciation scoring (`/api/fr`).
    French,
    /// French vocabulary dictation (`/api/fv`).
    FrenchVocab,
}

impl DeckRoute {
    /// All routes, in menu order.
    pub const ALL: [DeckRoute; 3] = [DeckRoute::English, DeckRoute::French, DeckRoute::FrenchVocab];

    /// URL prefix for the route's review endpoints.
    pub fn prefix(self) -> &'static str {
        match self {
            DeckRoute::English => "/api",
            DeckRoute::French => "/api/fr",
            DeckRoute::FrenchVocab => "/api/fv",
        }
    }

    /// Name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            DeckRoute::English => "english",
            DeckRoute::French => "french",
            DeckRoute::FrenchVocab => "french-vocab",
        }
    }
}

impl fmt::Display for DeckRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeckRoute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "english" | "en" => Ok(DeckRoute::English),
            "french" | "fr" => Ok(DeckRoute::French),
            "french-vocab" | "fv" => Ok(DeckRoute::FrenchVocab),
            _ => Err(format!(
                "Invalid deck: {}. Use 'english', 'french' or 'french-vocab'",
                s
            )),
        }
    }
}

/// Progress counters the server sends with each card.
///
/// Unlike the card envelope, these keys are snake_case on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckCounts {
    /// Review cards due today.
    pub due: u32,
    /// New cards available today.
    pub new: u32,
    /// Cards in learning.
    pub learning: u32,
    /// Notes in the deck.
    pub words_total: u32,
    /// Notes that have been studied at least once.
    pub words_learned: u32,
    /// Notes never studied.
    pub words_remaining: u32,
}
