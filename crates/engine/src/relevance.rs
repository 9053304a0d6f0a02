//! Relationship resolution: for one event, who acted and who was
//! targeted or informed. Drives cross-highlighting between the timeline
//! and the player ring.

use std::collections::BTreeSet;

use grimview_domain::{CompositeEvent, EventDetails};

/// The acting players vs. the targeted/informed players for one event.
///
/// Sets never contain the empty string; absent metadata fields contribute
/// nothing. Unknown event types yield empty sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelevantPlayers {
    pub originators: BTreeSet<String>,
    pub affected: BTreeSet<String>,
}

impl RelevantPlayers {
    pub fn is_empty(&self) -> bool {
        self.originators.is_empty() && self.affected.is_empty()
    }

    fn originator(mut self, name: Option<&str>) -> Self {
        insert(&mut self.originators, name);
        self
    }

    fn affected_one(mut self, name: Option<&str>) -> Self {
        insert(&mut self.affected, name);
        self
    }

    fn affected_all<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        for name in names {
            insert(&mut self.affected, Some(name));
        }
        self
    }
}

fn insert(set: &mut BTreeSet<String>, name: Option<&str>) {
    if let Some(name) = name {
        if !name.is_empty() {
            set.insert(name.to_string());
        }
    }
}

/// The neutral narrator; never an originator.
const STORYTELLER: &str = "Storyteller";

/// Derive the originator/affected sets for one event.
pub fn relevant_players(event: &CompositeEvent) -> RelevantPlayers {
    let sets = RelevantPlayers::default();
    match &event.details {
        EventDetails::Nomination(n) => sets
            .originator(n.nominator.as_deref())
            .affected_one(n.nominee.as_deref()),
        EventDetails::NominationResult(n) => sets
            .originator(n.nominator.as_deref())
            .affected_one(n.nominee.as_deref()),
        EventDetails::NominationComplete(n) => sets
            .originator(n.nominator.as_deref())
            .affected_one(n.nominee.as_deref()),

        // Message fan-out is not modeled as "affecting" recipients for
        // highlight purposes; only the sender originates, and the neutral
        // narrator does not count.
        EventDetails::Message(m) => {
            sets.originator(m.sender.as_deref().filter(|sender| *sender != STORYTELLER))
        }

        EventDetails::NotesUpdate(n) => sets.originator(n.player_name.as_deref()),
        EventDetails::PlayerPass(p) => sets.originator(p.player_name.as_deref()),

        EventDetails::TargetedPower(p) => sets
            .originator(p.player_name.as_deref())
            .affected_one(p.target.as_deref()),

        EventDetails::NeighborCheck(c) => sets
            .originator(c.player_name.as_deref())
            .affected_all(c.neighbors.iter().map(String::as_str)),
        EventDetails::SeerCheck(c) => sets
            .originator(c.player_name.as_deref())
            .affected_all(c.choices.iter().map(String::as_str)),
        EventDetails::CandidateReveal(c) => sets
            .originator(c.player_name.as_deref())
            .affected_all(c.shown_players.iter().map(String::as_str)),
        EventDetails::RoleLearned(r) => sets
            .originator(r.player_name.as_deref())
            .affected_one(r.target.as_deref())
            .affected_one(r.executed_player.as_deref()),

        EventDetails::ChefCount(c) => sets.originator(c.player_name.as_deref()),
        EventDetails::SoloPower(p) => sets.originator(p.player_name.as_deref()),

        EventDetails::Execution(e) => sets.affected_one(e.executed_player.as_deref()),
        EventDetails::PlayerDeath(d) => sets.affected_one(d.player_name.as_deref()),
        EventDetails::DeathAnnouncement(d) => {
            sets.affected_all(d.dead_players.iter().map(String::as_str))
        }

        // The informed minion originates; the demon and co-minions
        // (excluding the informed minion) are affected.
        EventDetails::MinionInfo(info) => {
            let informed = event.record.participants.get(1).map(String::as_str);
            let sets = sets.originator(informed).affected_one(info.demon.as_deref());
            sets.affected_all(
                info.minions
                    .iter()
                    .map(|minion| minion.name())
                    .filter(|name| Some(*name) != informed),
            )
        }

        // The demon receiving the reveal originates; the named minions are
        // affected.
        EventDetails::DemonInfo(info) => sets
            .originator(event.record.participants.get(1).map(String::as_str))
            .affected_all(info.minions.iter().map(|minion| minion.name())),

        // Setup, round/phase markers, game end, combined events, unknown
        // types: nothing to highlight.
        EventDetails::GameSetup(_)
        | EventDetails::GameStart
        | EventDetails::RoundStart
        | EventDetails::NominationsOpen
        | EventDetails::NotesUpdateCombined(_)
        | EventDetails::PlayerPassCombined(_)
        | EventDetails::GameEnd(_)
        | EventDetails::Unknown => sets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimview_domain::LogRecord;
    use serde_json::json;

    fn event(event_type: &str, participants: &[&str], metadata: serde_json::Value) -> CompositeEvent {
        let record: LogRecord = serde_json::from_value(json!({
            "event_type": event_type,
            "participants": participants,
            "metadata": metadata,
        }))
        .expect("record");
        CompositeEvent::from(record)
    }

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_nomination_family() {
        for event_type in ["nomination", "nomination_result", "nomination_complete"] {
            let sets = relevant_players(&event(
                event_type,
                &[],
                json!({"nominator": "Alice", "nominee": "Bob"}),
            ));
            assert_eq!(names(&sets.originators), ["Alice"], "{event_type}");
            assert_eq!(names(&sets.affected), ["Bob"], "{event_type}");
        }
    }

    #[test]
    fn test_storyteller_messages_have_no_originator() {
        let sets = relevant_players(&event(
            "message",
            &[],
            json!({"sender": "Storyteller", "recipients": ["Alice", "Bob"]}),
        ));
        assert!(sets.is_empty());

        let sets = relevant_players(&event(
            "message",
            &[],
            json!({"sender": "Alice", "recipients": ["Bob"]}),
        ));
        assert_eq!(names(&sets.originators), ["Alice"]);
        assert!(sets.affected.is_empty());
    }

    #[test]
    fn test_targeted_power() {
        let sets = relevant_players(&event(
            "poisoner_power",
            &[],
            json!({"player_name": "Eve", "target": "Alice", "success": true}),
        ));
        assert_eq!(names(&sets.originators), ["Eve"]);
        assert_eq!(names(&sets.affected), ["Alice"]);
    }

    #[test]
    fn test_multi_target_information_power() {
        let sets = relevant_players(&event(
            "empath_power",
            &[],
            json!({"player_name": "Alice", "neighbors": ["Bob", "Carol"], "evil_count": 1}),
        ));
        assert_eq!(names(&sets.originators), ["Alice"]);
        assert_eq!(names(&sets.affected), ["Bob", "Carol"]);

        let sets = relevant_players(&event(
            "fortuneteller_power",
            &[],
            json!({"player_name": "Alice", "choices": ["Dave", "Eve"], "result": "yes"}),
        ));
        assert_eq!(names(&sets.affected), ["Dave", "Eve"]);
    }

    #[test]
    fn test_deaths_have_no_originator() {
        let sets = relevant_players(&event(
            "execution",
            &[],
            json!({"executed_player": "Bob"}),
        ));
        assert!(sets.originators.is_empty());
        assert_eq!(names(&sets.affected), ["Bob"]);

        let sets = relevant_players(&event(
            "death_announcement",
            &[],
            json!({"dead_players": ["Bob", "Carol"]}),
        ));
        assert_eq!(names(&sets.affected), ["Bob", "Carol"]);
    }

    #[test]
    fn test_minion_info_excludes_self() {
        let sets = relevant_players(&event(
            "minion_info",
            &["Storyteller", "Mallory"],
            json!({
                "demon": "Eve",
                "demon_character": "Imp",
                "minions": ["Mallory", {"name": "Trent", "character": "Baron"}],
            }),
        ));
        assert_eq!(names(&sets.originators), ["Mallory"]);
        assert_eq!(names(&sets.affected), ["Eve", "Trent"]);
    }

    #[test]
    fn test_demon_info_names_minions() {
        let sets = relevant_players(&event(
            "demon_info",
            &["Storyteller", "Eve"],
            json!({"minions": ["Mallory", "Trent"], "not_in_play": ["Soldier", "Chef"]}),
        ));
        assert_eq!(names(&sets.originators), ["Eve"]);
        assert_eq!(names(&sets.affected), ["Mallory", "Trent"]);
    }

    #[test]
    fn test_unknown_event_type_yields_empty_sets() {
        let sets = relevant_players(&event(
            "some_future_event",
            &["Alice"],
            json!({"player_name": "Alice"}),
        ));
        assert!(sets.is_empty());
    }

    #[test]
    fn test_absent_fields_contribute_nothing() {
        let sets = relevant_players(&event("nomination", &[], json!({"nominator": ""})));
        assert!(sets.is_empty());

        let sets = relevant_players(&event("imp_power", &[], json!({"player_name": "Eve"})));
        assert_eq!(names(&sets.originators), ["Eve"]);
        assert!(sets.affected.is_empty());
    }

    #[test]
    fn test_markers_and_combined_events_are_neutral() {
        for event_type in [
            "game_setup",
            "round_start",
            "game_end",
            "notes_update_combined",
            "player_pass_combined",
        ] {
            let sets = relevant_players(&event(event_type, &[], json!({})));
            assert!(sets.is_empty(), "{event_type}");
        }
    }
}
