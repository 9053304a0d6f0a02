//! Typed decoding of the open per-event metadata bag.
//!
//! `event_type` is an open vocabulary, so [`EventDetails`] covers every
//! type the pipeline understands and falls back to [`EventDetails::Unknown`]
//! for anything else. Decoding is lenient: absent or mistyped metadata
//! yields the variant's defaults rather than an error, matching the
//! forward-compatibility rules of the log format.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::LogRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSetup {
    #[serde(default)]
    pub player_count: u32,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nomination {
    #[serde(default)]
    pub nominator: Option<String>,
    #[serde(default)]
    pub nominee: Option<String>,
    #[serde(default)]
    pub public_reasoning: Option<String>,
    #[serde(default)]
    pub private_reasoning: Option<String>,
}

/// Per-voter breakdown attached to a nomination result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteDetail {
    #[serde(default)]
    pub voter: Option<String>,
    #[serde(default)]
    pub nominee: Option<String>,
    /// `"Yes"`, `"No"`, or `"Cant_Vote"`.
    #[serde(default)]
    pub vote: Option<String>,
    #[serde(default)]
    pub voter_character: Option<String>,
    #[serde(default)]
    pub nominee_character: Option<String>,
    #[serde(default)]
    pub public_reasoning: Option<String>,
    #[serde(default)]
    pub private_reasoning: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NominationResult {
    #[serde(default)]
    pub nominator: Option<String>,
    #[serde(default)]
    pub nominee: Option<String>,
    /// `"success"`, `"tie"`, or `"fail"`.
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub votes: Option<u32>,
    #[serde(default)]
    pub vote_details: Vec<VoteDetail>,
    #[serde(default)]
    pub required_to_nominate: Option<u32>,
    #[serde(default)]
    pub required_to_tie: Option<u32>,
}

/// Merge product of a `nomination` and its immediately-following
/// `nomination_result`: the nomination's reasoning plus the result's
/// outcome and vote breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NominationComplete {
    #[serde(default)]
    pub nominator: Option<String>,
    #[serde(default)]
    pub nominee: Option<String>,
    #[serde(default)]
    pub public_reasoning: Option<String>,
    #[serde(default)]
    pub private_reasoning: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub votes: Option<u32>,
    #[serde(default)]
    pub vote_details: Vec<VoteDetail>,
    #[serde(default)]
    pub required_to_nominate: Option<u32>,
    #[serde(default)]
    pub required_to_tie: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotesUpdate {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One grouped entry inside a combined notes event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteEntry {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub timestamp: Option<crate::record::Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotesUpdateCombined {
    #[serde(default)]
    pub notes_updates: Vec<NoteEntry>,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPass {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub private_reasoning: Option<String>,
}

/// One grouped entry inside a combined pass event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassEntry {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub private_reasoning: Option<String>,
    #[serde(default)]
    pub timestamp: Option<crate::record::Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPassCombined {
    #[serde(default)]
    pub pass_events: Vec<PassEntry>,
    #[serde(default)]
    pub count: u32,
}

/// A power aimed at one player: slay, poison, demon attack, monk
/// protection, butler master choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetedPower {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub private_reasoning: Option<String>,
}

/// Empath: learns how many of the two alive neighbors are evil.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborCheck {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub neighbors: Vec<String>,
    #[serde(default)]
    pub evil_count: Option<u32>,
}

/// Fortuneteller: picks two players, learns yes/no whether either is the
/// demon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeerCheck {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub private_reasoning: Option<String>,
}

/// Washerwoman / Librarian / Investigator: shown two candidate players,
/// one of whom is a particular character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateReveal {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub shown_players: Vec<String>,
    #[serde(default)]
    pub shown_character: Option<String>,
}

/// Ravenkeeper / Undertaker: learns the true character of one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleLearned {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub executed_player: Option<String>,
    #[serde(default)]
    pub learned_character: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChefCount {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub evil_pairs: Option<u32>,
}

/// Powers with an actor but no modeled target (spy grimoire view, virgin
/// trigger).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoloPower {
    #[serde(default)]
    pub player_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    #[serde(default)]
    pub executed_player: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerDeath {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub killed_by_demon: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeathAnnouncement {
    #[serde(default)]
    pub dead_players: Vec<String>,
}

/// Minion reference in alignment-reveal events. Early logs wrote bare
/// names, later logs wrote `{name, character}` objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinionRef {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        character: Option<String>,
    },
}

impl MinionRef {
    pub fn name(&self) -> &str {
        match self {
            MinionRef::Name(name) => name,
            MinionRef::Full { name, .. } => name,
        }
    }
}

/// Night-one reveal to a minion: who the demon is, and the co-minions.
/// `participants[1]` on the owning record is the minion being informed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinionInfo {
    #[serde(default)]
    pub demon: Option<String>,
    #[serde(default)]
    pub demon_character: Option<String>,
    #[serde(default)]
    pub minions: Vec<MinionRef>,
}

/// Night-one reveal to the demon: the minions and the out-of-play bluffs.
/// `participants[1]` on the owning record is the demon being informed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemonInfo {
    #[serde(default)]
    pub minions: Vec<MinionRef>,
    #[serde(default)]
    pub not_in_play: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameEnd {
    #[serde(default)]
    pub winner: Option<String>,
}

/// Typed view of one event, keyed by the owning record's `event_type`.
#[derive(Debug, Clone, PartialEq)]
pub enum EventDetails {
    GameSetup(GameSetup),
    GameStart,
    RoundStart,
    NominationsOpen,
    Nomination(Nomination),
    NominationResult(NominationResult),
    NominationComplete(NominationComplete),
    Message(Message),
    NotesUpdate(NotesUpdate),
    NotesUpdateCombined(NotesUpdateCombined),
    PlayerPass(PlayerPass),
    PlayerPassCombined(PlayerPassCombined),
    TargetedPower(TargetedPower),
    NeighborCheck(NeighborCheck),
    SeerCheck(SeerCheck),
    CandidateReveal(CandidateReveal),
    RoleLearned(RoleLearned),
    ChefCount(ChefCount),
    SoloPower(SoloPower),
    Execution(Execution),
    PlayerDeath(PlayerDeath),
    DeathAnnouncement(DeathAnnouncement),
    MinionInfo(MinionInfo),
    DemonInfo(DemonInfo),
    GameEnd(GameEnd),
    /// Any `event_type` the pipeline does not recognize. Rendered from the
    /// record's free-text `description`.
    Unknown,
}

impl EventDetails {
    /// Decode a record's metadata according to its `event_type`.
    pub fn from_record(record: &LogRecord) -> Self {
        let meta = &record.metadata;
        match record.event_type.as_str() {
            "game_setup" => Self::GameSetup(decode(meta)),
            "game_start" => Self::GameStart,
            "round_start" => Self::RoundStart,
            "nominations_open" => Self::NominationsOpen,
            "nomination" => Self::Nomination(decode(meta)),
            "nomination_result" => Self::NominationResult(decode(meta)),
            "nomination_complete" => Self::NominationComplete(decode(meta)),
            "message" => Self::Message(decode(meta)),
            "notes_update" => Self::NotesUpdate(decode(meta)),
            "notes_update_combined" => Self::NotesUpdateCombined(decode(meta)),
            "player_pass" => Self::PlayerPass(decode(meta)),
            "player_pass_combined" => Self::PlayerPassCombined(decode(meta)),
            "slayer_power" | "poisoner_power" | "imp_power" | "monk_power" | "butler_power" => {
                Self::TargetedPower(decode(meta))
            }
            "empath_power" => Self::NeighborCheck(decode(meta)),
            "fortuneteller_power" => Self::SeerCheck(decode(meta)),
            "washerwoman_power" | "librarian_power" | "investigator_power" => {
                Self::CandidateReveal(decode(meta))
            }
            "ravenkeeper_power" | "undertaker_power" => Self::RoleLearned(decode(meta)),
            "chef_power" => Self::ChefCount(decode(meta)),
            "spy_power" | "virgin_power" => Self::SoloPower(decode(meta)),
            "execution" => Self::Execution(decode(meta)),
            "player_death" => Self::PlayerDeath(decode(meta)),
            "death_announcement" => Self::DeathAnnouncement(decode(meta)),
            "minion_info" => Self::MinionInfo(decode(meta)),
            "demon_info" => Self::DemonInfo(decode(meta)),
            "game_end" => Self::GameEnd(decode(meta)),
            _ => Self::Unknown,
        }
    }
}

/// Lenient metadata decode: unknown keys are ignored, and a bag that does
/// not fit the expected shape at all degrades to the type's defaults.
fn decode<T: Default + DeserializeOwned>(meta: &Map<String, Value>) -> T {
    serde_json::from_value(Value::Object(meta.clone())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event_type: &str, metadata: Value) -> LogRecord {
        serde_json::from_value(serde_json::json!({
            "event_type": event_type,
            "metadata": metadata,
        }))
        .expect("record")
    }

    #[test]
    fn test_nomination_decodes_reasoning() {
        let rec = record(
            "nomination",
            serde_json::json!({
                "nominator": "Alice",
                "nominee": "Bob",
                "public_reasoning": "acting oddly",
                "private_reasoning": "empath ping",
            }),
        );
        match EventDetails::from_record(&rec) {
            EventDetails::Nomination(n) => {
                assert_eq!(n.nominator.as_deref(), Some("Alice"));
                assert_eq!(n.nominee.as_deref(), Some("Bob"));
                assert_eq!(n.public_reasoning.as_deref(), Some("acting oddly"));
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_type_falls_back() {
        let rec = record("brand_new_event", serde_json::json!({"anything": 1}));
        assert_eq!(EventDetails::from_record(&rec), EventDetails::Unknown);
    }

    #[test]
    fn test_missing_metadata_yields_defaults() {
        let rec = record("empath_power", serde_json::json!({}));
        match EventDetails::from_record(&rec) {
            EventDetails::NeighborCheck(check) => {
                assert!(check.player_name.is_none());
                assert!(check.neighbors.is_empty());
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn test_minion_ref_accepts_both_shapes() {
        let rec = record(
            "minion_info",
            serde_json::json!({
                "demon": "Eve",
                "minions": ["Mallory", {"name": "Trent", "character": "Baron"}],
            }),
        );
        match EventDetails::from_record(&rec) {
            EventDetails::MinionInfo(info) => {
                let names: Vec<&str> = info.minions.iter().map(|m| m.name()).collect();
                assert_eq!(names, ["Mallory", "Trent"]);
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn test_mistyped_metadata_degrades_to_defaults() {
        let rec = record("player_pass", serde_json::json!({"player_name": 42}));
        assert_eq!(
            EventDetails::from_record(&rec),
            EventDetails::PlayerPass(PlayerPass::default())
        );
    }
}
