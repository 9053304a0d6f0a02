//! Event normalization: turn the raw heterogeneous record stream into a
//! clean, display-ready timeline.
//!
//! Two passes over the input, both order-preserving:
//!
//! 1. Drop-list filter: internal bookkeeping records (raw vote casts,
//!    voting-round wrappers, redundant phase markers, initial character
//!    assignment, broadcast plumbing) are removed outright.
//! 2. Merge scan, left to right, one rule per consumed record:
//!    all `notes_update` records sharing a `(round, phase)` key collapse
//!    into one combined event at the group's first position; runs of two
//!    or more consecutive `player_pass` records collapse into one; a
//!    `nomination` immediately followed by its matching
//!    `nomination_result` merges into a single `nomination_complete`.
//!
//! A merged event sits where the *first* record it subsumes sat; nothing is
//! ever reordered. Normalizing an already-normalized sequence is a no-op:
//! the combined types match no merge trigger and are not on the drop list.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use grimview_domain::{CompositeEvent, EventDetails, NoteEntry, PassEntry};

/// Record types that never reach the timeline.
pub const DROPPED_EVENT_TYPES: &[&str] = &[
    "info_broadcast",
    "player_setup",
    "phase_change",
    "voting_round",
    "voting",
    "storyteller_info",
];

/// Exact description text of the engine's skipped-turn passthrough record.
pub const SKIPPED_TURN_DESCRIPTION: &str = "Player passed their turn";

/// Static filter tables owned by the normalizer; kept explicit so the core
/// stays pure and independently testable.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    pub dropped_event_types: Vec<String>,
    pub dropped_descriptions: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            dropped_event_types: DROPPED_EVENT_TYPES.iter().map(|t| t.to_string()).collect(),
            dropped_descriptions: vec![SKIPPED_TURN_DESCRIPTION.to_string()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// `normalize(records) -> composite events`, preserving the relative
    /// order of first-occurrence positions.
    pub fn normalize(&self, events: Vec<CompositeEvent>) -> Vec<CompositeEvent> {
        let filtered: Vec<CompositeEvent> = events
            .into_iter()
            .filter(|event| !self.is_dropped(event))
            .collect();

        // Collect notes groups up front; each group is emitted combined at
        // its first member's position.
        let mut notes_groups: HashMap<(u32, String), Vec<usize>> = HashMap::new();
        for (index, event) in filtered.iter().enumerate() {
            if matches!(event.details, EventDetails::NotesUpdate(_)) {
                notes_groups
                    .entry(notes_key(event))
                    .or_default()
                    .push(index);
            }
        }

        let mut out = Vec::with_capacity(filtered.len());
        let mut emitted_note_phases: HashSet<(u32, String)> = HashSet::new();
        let mut i = 0;
        while i < filtered.len() {
            let event = &filtered[i];
            match &event.details {
                EventDetails::NotesUpdate(_) => {
                    let key = notes_key(event);
                    if emitted_note_phases.insert(key.clone()) {
                        if let Some(combined) = notes_groups
                            .get(&key)
                            .and_then(|indices| combine_notes(&filtered, indices))
                        {
                            out.push(combined);
                        }
                    }
                    // later members of the group vanish from the stream
                    i += 1;
                }
                EventDetails::PlayerPass(_) => {
                    let mut j = i + 1;
                    while j < filtered.len()
                        && matches!(filtered[j].details, EventDetails::PlayerPass(_))
                    {
                        j += 1;
                    }
                    if j - i >= 2 {
                        out.push(combine_passes(&filtered[i..j]));
                    } else {
                        out.push(event.clone());
                    }
                    i = j;
                }
                EventDetails::Nomination(nomination) => {
                    let merged = filtered.get(i + 1).and_then(|next| match &next.details {
                        EventDetails::NominationResult(result)
                            if result.nominator == nomination.nominator
                                && result.nominee == nomination.nominee =>
                        {
                            Some(combine_nomination(event, next))
                        }
                        _ => None,
                    });
                    match merged {
                        Some(combined) => {
                            out.push(combined);
                            i += 2;
                        }
                        None => {
                            // no immediately-following matching result:
                            // a display gap, not an error
                            out.push(event.clone());
                            i += 1;
                        }
                    }
                }
                _ => {
                    out.push(event.clone());
                    i += 1;
                }
            }
        }
        out
    }

    fn is_dropped(&self, event: &CompositeEvent) -> bool {
        self.config
            .dropped_event_types
            .iter()
            .any(|dropped| dropped == event.event_type())
            || self
                .config
                .dropped_descriptions
                .iter()
                .any(|dropped| dropped == &event.record.description)
    }
}

fn notes_key(event: &CompositeEvent) -> (u32, String) {
    (event.record.round_number, event.record.phase.clone())
}

fn combine_notes(filtered: &[CompositeEvent], indices: &[usize]) -> Option<CompositeEvent> {
    let entries: Vec<NoteEntry> = indices
        .iter()
        .filter_map(|&index| {
            let event = filtered.get(index)?;
            match &event.details {
                EventDetails::NotesUpdate(notes) => Some(NoteEntry {
                    player_name: notes.player_name.clone(),
                    character: notes.character.clone(),
                    notes: notes.notes.clone(),
                    timestamp: event.record.timestamp.clone(),
                }),
                _ => None,
            }
        })
        .collect();

    let first = indices.first().and_then(|&index| filtered.get(index))?;

    let mut record = first.record.clone();
    record.event_type = "notes_update_combined".into();
    record.description = format!("{} players updated their notes", entries.len());
    record.participants = entries
        .iter()
        .filter_map(|entry| entry.player_name.clone())
        .filter(|name| !name.is_empty())
        .collect();
    record.metadata = as_object(serde_json::json!({
        "notes_updates": entries,
        "count": entries.len(),
    }));
    Some(CompositeEvent::from(record))
}

fn combine_passes(run: &[CompositeEvent]) -> CompositeEvent {
    let entries: Vec<PassEntry> = run
        .iter()
        .filter_map(|event| match &event.details {
            EventDetails::PlayerPass(pass) => Some(PassEntry {
                player_name: pass.player_name.clone(),
                private_reasoning: pass.private_reasoning.clone(),
                timestamp: event.record.timestamp.clone(),
            }),
            _ => None,
        })
        .collect();

    let mut record = run[0].record.clone();
    record.event_type = "player_pass_combined".into();
    record.description = format!("{} players passed their turn", entries.len());
    record.participants = entries
        .iter()
        .filter_map(|entry| entry.player_name.clone())
        .filter(|name| !name.is_empty())
        .collect();
    record.metadata = as_object(serde_json::json!({
        "pass_events": entries,
        "count": entries.len(),
    }));
    CompositeEvent::from(record)
}

fn combine_nomination(nomination: &CompositeEvent, result: &CompositeEvent) -> CompositeEvent {
    let mut record = nomination.record.clone();
    record.event_type = "nomination_complete".into();

    let nominator = record
        .metadata
        .get("nominator")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let nominee = record
        .metadata
        .get("nominee")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    record.description = format!("{nominator} nominated {nominee} for execution");

    // Result fields overlay the nomination's, except the reasoning, which
    // only the nomination carries.
    let mut metadata = nomination.record.metadata.clone();
    for (key, value) in result.record.metadata.clone() {
        metadata.insert(key, value);
    }
    for key in ["public_reasoning", "private_reasoning"] {
        match nomination.record.metadata.get(key) {
            Some(value) => {
                metadata.insert(key.to_string(), value.clone());
            }
            None => {
                metadata.remove(key);
            }
        }
    }
    record.metadata = metadata;
    CompositeEvent::from(record)
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
