//! Game state snapshots - the reconstructed player/game status attached to
//! a log record, valid as of that record's position in the timeline.

use serde::{Deserialize, Serialize};

use crate::roles::is_evil_role;

/// Status of a single seat at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Unique within a game, stable across the whole log.
    pub name: String,
    /// Monotonic: once false, stays false for the rest of the game.
    pub alive: bool,
    /// A dead player's single extra vote is a one-time resource.
    #[serde(default)]
    pub used_dead_vote: bool,
    /// True role name; fixed at game start.
    pub character: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drunk: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poisoned: Option<bool>,
    /// The role this player believes they are while drunk. Display-only;
    /// never equals the true `character` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drunk_character: Option<String>,
}

impl PlayerState {
    pub fn is_drunk(&self) -> bool {
        self.drunk.unwrap_or(false)
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned.unwrap_or(false)
    }
}

/// The currently-leading nomination pending execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoppingBlock {
    pub nominee: String,
    pub votes: u32,
}

/// Full derived game state as of one record.
///
/// `player_state` is in seating order around the circular table; the order
/// is semantically meaningful (neighbor-based abilities, ring layout) and
/// must never be sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    #[serde(default)]
    pub player_state: Vec<PlayerState>,
    #[serde(default)]
    pub round_number: u32,
    #[serde(default)]
    pub current_phase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chopping_block: Option<ChoppingBlock>,
    #[serde(default)]
    pub nominatable_players: Vec<String>,
    #[serde(default)]
    pub nominations_open: bool,
    /// Token-key (e.g. `"Fortuneteller_Red_Herring"`) to the player it is
    /// currently attached to. At most one player per token-key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_tokens: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GameStateSnapshot {
    /// Lookup a player's state by name.
    pub fn player(&self, name: &str) -> Option<&PlayerState> {
        self.player_state.iter().find(|p| p.name == name)
    }

    /// Partition the seating into good and evil seats, preserving seating
    /// order within each side.
    pub fn team_partition(&self) -> (Vec<&PlayerState>, Vec<&PlayerState>) {
        self.player_state
            .iter()
            .partition(|p| !is_evil_role(&p.character))
    }

    /// The player a reminder token is currently attached to, if any.
    pub fn reminder_token_holder(&self, token_key: &str) -> Option<&str> {
        self.reminder_tokens
            .as_ref()
            .and_then(|tokens| tokens.get(token_key))
            .and_then(|holder| holder.as_str())
    }

    pub fn alive_count(&self) -> usize {
        self.player_state.iter().filter(|p| p.alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> GameStateSnapshot {
        serde_json::from_str(
            r#"{
                "player_state": [
                    {"name": "Alice", "alive": true, "used_dead_vote": false, "character": "Empath"},
                    {"name": "Bob", "alive": false, "used_dead_vote": true, "character": "Imp"},
                    {"name": "Carol", "alive": true, "used_dead_vote": false, "character": "Poisoner", "poisoned": true}
                ],
                "round_number": 2,
                "current_phase": "Day",
                "chopping_block": {"nominee": "Bob", "votes": 3},
                "nominatable_players": ["Alice", "Carol"],
                "nominations_open": true,
                "reminder_tokens": {"Fortuneteller_Red_Herring": "Alice"}
            }"#,
        )
        .expect("parse")
    }

    #[test]
    fn test_player_lookup() {
        let snap = snapshot();
        assert_eq!(snap.player("Bob").map(|p| p.alive), Some(false));
        assert!(snap.player("Mallory").is_none());
    }

    #[test]
    fn test_team_partition_preserves_seating_order() {
        let snap = snapshot();
        let (good, evil) = snap.team_partition();
        assert_eq!(good.iter().map(|p| &p.name).collect::<Vec<_>>(), ["Alice"]);
        assert_eq!(
            evil.iter().map(|p| &p.name).collect::<Vec<_>>(),
            ["Bob", "Carol"]
        );
    }

    #[test]
    fn test_reminder_token_holder() {
        let snap = snapshot();
        assert_eq!(
            snap.reminder_token_holder("Fortuneteller_Red_Herring"),
            Some("Alice")
        );
        assert_eq!(snap.reminder_token_holder("Virgin_Power_Used"), None);
    }

    #[test]
    fn test_alive_count() {
        assert_eq!(snapshot().alive_count(), 2);
    }
}
