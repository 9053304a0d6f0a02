//! Log loading: fetch the raw text for a game, parse each line
//! independently, and normalize the result into display-ready events.

use grimview_domain::{CompositeEvent, LogRecord};

use crate::error::LoadError;
use crate::fetch::LogFetcher;
use crate::normalize::Normalizer;

/// Parse newline-delimited JSON into records.
///
/// Blank lines are ignored; a malformed line is skipped with a warning and
/// never aborts the rest of the load. Line order is preserved.
pub fn parse_log(text: &str) -> Vec<LogRecord> {
    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<LogRecord>(line) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(line = index + 1, error = %err, "skipping malformed log line");
            }
        }
    }
    records
}

/// Load one game end-to-end: fetch, parse, normalize.
///
/// Zero parseable records is an error, not an empty timeline - the caller
/// must show an explicit "no data" state rather than a stale game.
pub async fn load_game(
    fetcher: &dyn LogFetcher,
    game_id: &str,
) -> Result<Vec<CompositeEvent>, LoadError> {
    let text = fetcher
        .fetch(game_id)
        .await
        .map_err(|source| LoadError::fetch(game_id, source))?;

    let records = parse_log(&text);
    if records.is_empty() {
        return Err(LoadError::empty_log(game_id));
    }
    tracing::debug!(game_id, raw = records.len(), "parsed game log");

    let events = records.into_iter().map(CompositeEvent::from).collect();
    let normalized = Normalizer::default().normalize(events);
    tracing::debug!(game_id, events = normalized.len(), "normalized game log");
    Ok(normalized)
}
