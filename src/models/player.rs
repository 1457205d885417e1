//! Player data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in pairings and lookups).
pub type PlayerId = Uuid;

/// Longest accepted display name, in characters.
pub const MAX_PLAYER_NAME_LEN: usize = 64;

/// A player registered to a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: u32,
    pub registered_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player with a fresh id, registered now.
    pub fn new(name: impl Into<String>, rating: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rating,
            registered_at: Utc::now(),
        }
    }

    /// Case-insensitive name comparison used for duplicate detection.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
