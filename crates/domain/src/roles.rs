//! Role alignment tables and character-name display helpers.
//!
//! Alignment is a closed allow-list of the evil roles (demons and minions)
//! in the Trouble Brewing script; every other character name - including
//! unrecognized custom roles - is good by default.

/// Demon roles.
const DEMON_ROLES: &[&str] = &["Imp"];

/// Minion roles. `Scarlet_Woman` appears both with a space and with an
/// underscore across log revisions.
const MINION_ROLES: &[&str] = &["Poisoner", "Spy", "Baron", "Scarlet Woman", "Scarlet_Woman"];

/// True iff `character` names a demon or minion role. Unrecognized names
/// are good by default (allow-list, not a general rule).
pub fn is_evil_role(character: &str) -> bool {
    DEMON_ROLES.contains(&character) || MINION_ROLES.contains(&character)
}

pub fn is_demon_role(character: &str) -> bool {
    DEMON_ROLES.contains(&character)
}

/// Cosmetic formatting for character names: underscores to spaces
/// (`"Scarlet_Woman"` renders as `"Scarlet Woman"`).
pub fn display_name(character: &str) -> String {
    character.replace('_', " ")
}
