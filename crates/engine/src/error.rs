//! Error types for the replay pipeline.
//!
//! Nothing in this pipeline is fatal: fetch failures surface as a distinct
//! zero-events state, malformed lines are skipped with a warning, and every
//! other failure mode degrades to a defined fallback in the caller.

use thiserror::Error;

/// Failure to retrieve the raw log text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {status}")]
    Status { status: u16 },

    #[error("could not read log file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to load a game end-to-end.
///
/// Callers must treat both variants as an explicit "no data" state, never
/// as a silently-stale previous game.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch game log '{game_id}': {source}")]
    Fetch {
        game_id: String,
        #[source]
        source: FetchError,
    },

    #[error("game log '{game_id}' contained no parseable events")]
    EmptyLog { game_id: String },
}

impl LoadError {
    pub fn fetch(game_id: impl Into<String>, source: FetchError) -> Self {
        Self::Fetch {
            game_id: game_id.into(),
            source,
        }
    }

    pub fn empty_log(game_id: impl Into<String>) -> Self {
        Self::EmptyLog {
            game_id: game_id.into(),
        }
    }
}
