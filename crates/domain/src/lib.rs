//! Grimview domain layer - the data model for replaying recorded
//! social-deduction games.
//!
//! Everything here is a read-only projection of an immutable input log:
//! records, snapshots, and the typed per-event detail union. No I/O.

pub mod details;
pub mod record;
pub mod roles;
pub mod snapshot;

pub use details::{
    CandidateReveal, ChefCount, DeathAnnouncement, DemonInfo, EventDetails, Execution, GameEnd,
    GameSetup, Message, MinionInfo, MinionRef, NeighborCheck, Nomination, NominationComplete,
    NominationResult, NoteEntry, NotesUpdate, NotesUpdateCombined, PassEntry, PlayerDeath,
    PlayerPass, PlayerPassCombined, RoleLearned, SeerCheck, SoloPower, TargetedPower, VoteDetail,
};
pub use record::{CompositeEvent, LogRecord, Timestamp};
pub use roles::{display_name, is_demon_role, is_evil_role};
pub use snapshot::{ChoppingBlock, GameStateSnapshot, PlayerState};
