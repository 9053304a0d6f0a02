//! Log record model - the wire shape of one line of a game log
//!
//! A game log is newline-delimited JSON produced by the game engine; each
//! line is one [`LogRecord`]. Line order is authoritative for event ordering,
//! the timestamp is display-only. Unknown top-level fields and unknown
//! `metadata` keys are forward-compatible extensions and are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::details::EventDetails;
use crate::snapshot::GameStateSnapshot;

/// Wall-clock timestamp as written by the game engine.
///
/// Older logs carry ISO strings, some revisions wrote epoch numbers. Either
/// way it is only ever displayed, never used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Number(f64),
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Text(s) => write!(f, "{s}"),
            Timestamp::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One line of the input event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub round_number: u32,
    #[serde(default)]
    pub phase: String,
    pub event_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Authoritative game state as of this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameStateSnapshot>,
    /// Legacy alias for `game_state`; old logs are immutable, so this field
    /// is supported indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_game_state: Option<GameStateSnapshot>,
}

impl LogRecord {
    /// The snapshot attached to this record, preferring the current field
    /// name over the legacy alias. `None` when the record carries no
    /// snapshot at all; callers must render a distinct "no data" state
    /// rather than an empty player ring.
    pub fn snapshot(&self) -> Option<&GameStateSnapshot> {
        self.game_state.as_ref().or(self.public_game_state.as_ref())
    }
}

/// A display-ready event: one raw record, or a merge of several related
/// records (nomination plus its result, a run of consecutive passes, all
/// notes updates within one phase).
///
/// The `record` holds the representative raw fields (for a merged event,
/// those of the *first* subsumed record, with the synthetic type and
/// metadata written over them); `details` is the typed decoding of
/// `record.event_type` plus `record.metadata`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeEvent {
    pub record: LogRecord,
    pub details: EventDetails,
}

impl CompositeEvent {
    pub fn event_type(&self) -> &str {
        &self.record.event_type
    }

    pub fn snapshot(&self) -> Option<&GameStateSnapshot> {
        self.record.snapshot()
    }
}

impl From<LogRecord> for CompositeEvent {
    fn from(record: LogRecord) -> Self {
        let details = EventDetails::from_record(&record);
        Self { record, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parses_with_minimal_fields() {
        let record: LogRecord =
            serde_json::from_str(r#"{"event_type":"game_start"}"#).expect("parse");
        assert_eq!(record.event_type, "game_start");
        assert_eq!(record.round_number, 0);
        assert!(record.participants.is_empty());
        assert!(record.snapshot().is_none());
    }

    #[test]
    fn test_record_ignores_unknown_fields() {
        let record: LogRecord = serde_json::from_str(
            r#"{"event_type":"message","some_future_field":{"x":1},"metadata":{"sender":"Alice"}}"#,
        )
        .expect("parse");
        assert_eq!(record.metadata["sender"], "Alice");
    }

    #[test]
    fn test_timestamp_accepts_string_or_number() {
        let a: LogRecord =
            serde_json::from_str(r#"{"event_type":"x","timestamp":"2025-05-28T15:43:56"}"#)
                .expect("parse");
        let b: LogRecord =
            serde_json::from_str(r#"{"event_type":"x","timestamp":1748446.5}"#).expect("parse");
        assert_eq!(
            a.timestamp,
            Some(Timestamp::Text("2025-05-28T15:43:56".into()))
        );
        assert_eq!(b.timestamp, Some(Timestamp::Number(1748446.5)));
    }
}
