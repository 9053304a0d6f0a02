//! Grimview engine - log loading, event normalization, and replay state
//! derivation for recorded social-deduction games.
//!
//! The pipeline is: fetch the newline-delimited JSON log for a game id,
//! parse each line independently, normalize the record stream into
//! display-ready composite events, and expose per-event snapshots and
//! originator/affected relationships to the presentation layer. Each game
//! selection produces an independent, immutable normalized sequence.

pub mod catalog;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod normalize;
pub mod relevance;
pub mod session;

#[cfg(test)]
mod pipeline_tests;

pub use catalog::{extract_game_metadata, fetch_game_metadata, friendly_model_name, GameMetadata};
pub use error::{FetchError, LoadError};
pub use fetch::{FileLogFetcher, HttpLogFetcher, LogFetcher, DEFAULT_LOG_BASE_URL};
pub use loader::{load_game, parse_log};
pub use normalize::{Normalizer, NormalizerConfig};
pub use relevance::{relevant_players, RelevantPlayers};
pub use session::{ReplaySession, SelectionTicket};
